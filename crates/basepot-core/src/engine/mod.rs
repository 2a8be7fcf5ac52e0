//! # Engine Module
//!
//! Plumbing shared by the workflows.
//!
//! - **Configuration** ([`config`]) - validated pair filter, separation thresholds and binning
//! - **Error Handling** ([`error`]) - the error type returned by every workflow
//! - **Progress Monitoring** ([`progress`]) - callback-based progress events for front ends

pub mod config;
pub mod error;
pub mod progress;
