//! Typed records flowing through the potential pipeline.
//!
//! - [`residue`] - The fixed nucleotide alphabet and residue-name aliases
//! - [`atom`] - Atom records extracted from structure files
//! - [`pair`] - Base-pair codes and the observations derived from atom pairs

pub mod atom;
pub mod pair;
pub mod residue;
