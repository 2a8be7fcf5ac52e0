use super::residue::Nucleotide;
use nalgebra::Point3;

/// A single atom parsed from an `ATOM`/`HETATM` record.
///
/// Only the fields needed by the distance statistics are kept. Records are
/// immutable once parsed and live only for the duration of one structure's
/// processing pass.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// The atom name with column padding removed (e.g., "C3'").
    pub atom_name: String,
    /// The nucleotide type of the parent residue.
    pub residue_type: Nucleotide,
    /// The residue sequence number from the source file.
    pub residue_index: i32,
    /// The 3D coordinates in the file's native frame.
    pub position: Point3<f64>,
}

impl AtomRecord {
    pub fn new(
        atom_name: &str,
        residue_type: Nucleotide,
        residue_index: i32,
        position: Point3<f64>,
    ) -> Self {
        Self {
            atom_name: atom_name.to_string(),
            residue_type,
            residue_index,
            position,
        }
    }

    /// Absolute difference between the residue sequence numbers of two records.
    #[inline]
    pub fn separation(&self, other: &AtomRecord) -> u32 {
        self.residue_index.abs_diff(other.residue_index)
    }
}
