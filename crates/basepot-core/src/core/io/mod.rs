//! Reading structure files and reading/writing the tabular artifacts of the
//! pipeline.
//!
//! Structure formats implement [`traits::StructureFile`]; [`pdb`] is the only
//! one supported. [`table`] holds every tab-separated format: per-pair and
//! combined potentials, frequency reports, scores and distance lists.

pub mod pdb;
pub mod table;
pub mod traits;
