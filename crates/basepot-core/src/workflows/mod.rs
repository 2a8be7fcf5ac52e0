//! # Workflows Module
//!
//! Entry points that take structure files from disk to results.
//!
//! - **Training** ([`train`]) - reads a corpus in parallel, merges the per-file
//!   frequency counts and derives the pseudo-energy potential. A per-structure
//!   mode trains one potential for each file.
//! - **Scoring** ([`score`]) - scores structures against a trained potential,
//!   reporting each file separately.
//! - **Distances** ([`distances`]) - the unfiltered residue-distance listing.
//!
//! Every workflow logs through `tracing` and reports progress through a
//! [`crate::engine::progress::ProgressReporter`] where it processes many files.

pub mod distances;
pub mod score;
pub mod train;
