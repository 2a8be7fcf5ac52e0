//! # Core Module
//!
//! Stateless building blocks of the potential: typed atom records, the PDB
//! reader, pair enumeration, binning, frequency statistics, pseudo energies
//! and scoring.
//!
//! - **Data models** ([`models`]) - nucleotides, atom records, pair types and observations
//! - **File I/O** ([`io`]) - PDB parsing and tab-separated potential tables
//! - **Statistics** ([`potential`]) - from distances to a scored structure
//! - **Helpers** ([`utils`]) - geometry and atom-name classification

pub mod io;
pub mod models;
pub mod potential;
pub mod utils;
