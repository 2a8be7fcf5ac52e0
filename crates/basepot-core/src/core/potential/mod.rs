//! # Potential Module
//!
//! The statistical core: from representative atoms to pseudo energies and back
//! to per-structure scores.
//!
//! ## Pipeline
//!
//! 1. [`distances`] enumerates residue pairs of one structure and keeps the
//!    whitelisted ones within the cutoff as base-pair observations.
//! 2. [`binning`] assigns each distance to a fixed-width bin.
//! 3. [`frequency`] counts observations per (pair type, bin) in a mergeable
//!    accumulator, then finalizes into observed probabilities and the pooled
//!    reference frequency of each bin.
//! 4. [`energy`] turns each cell into `-log10(observed / reference)`, keeping
//!    undefined cells explicit.
//! 5. [`scoring`] looks up the energies of a new structure's observations and
//!    sums them, with an explicit policy for missing cells.
//!
//! ```ignore
//! use basepot::core::potential::{distances, frequency::FrequencyAccumulator};
//!
//! let observations = distances::base_pair_observations(&atoms, &filter);
//! let mut acc = FrequencyAccumulator::new(scheme, filter.whitelist.iter().copied());
//! acc.extend(&observations);
//! let potential = PotentialTable::from_frequencies(&acc.finalize());
//! ```

pub mod binning;
pub mod distances;
pub mod energy;
pub mod frequency;
pub mod scoring;
