//! # basepot Core Library
//!
//! Knowledge-based pseudo-energy potentials for RNA base pairs: distances
//! between representative backbone atoms are collected over a corpus of
//! structures, turned into an inverse-Boltzmann statistical potential, and
//! used to score new structures.
//!
//! ## Layers
//!
//! - **[`core`]: The Foundation.** Data models, the PDB reader, table I/O and
//!   the pure statistics of binning, frequencies, energies and scoring.
//!
//! - **[`engine`]: Shared plumbing.** Validated configuration, the error type
//!   of the workflows, and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Training over a corpus, scoring
//!   structures against a trained potential, and the generic distance listing.

pub mod core;
pub mod engine;
pub mod workflows;
