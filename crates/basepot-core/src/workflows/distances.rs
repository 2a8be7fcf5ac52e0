use crate::core::io::pdb::PdbFile;
use crate::core::io::traits::StructureFile;
use crate::core::models::pair::GenericDistance;
use crate::core::potential::distances::generic_distances;
use crate::engine::error::EngineError;
use std::path::Path;
use tracing::{info, instrument};

/// Lists the distances between all residues of a structure at least
/// `min_separation` apart, without type filtering or cutoff.
#[instrument(skip_all, name = "distance_workflow")]
pub fn run(path: &Path, min_separation: u32) -> Result<Vec<GenericDistance>, EngineError> {
    let atoms = PdbFile::read_from_path(path).map_err(|source| EngineError::Structure {
        path: path.to_path_buf(),
        source,
    })?;
    let distances = generic_distances(&atoms, min_separation);
    info!(
        atoms = atoms.len(),
        pairs = distances.len(),
        "Computed generic distances for {:?}.",
        path
    );
    Ok(distances)
}
