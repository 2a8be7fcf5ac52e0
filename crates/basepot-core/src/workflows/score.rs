use crate::core::io::pdb::PdbFile;
use crate::core::io::traits::StructureFile;
use crate::core::models::atom::AtomRecord;
use crate::core::potential::distances::{PairFilter, base_pair_observations};
use crate::core::potential::energy::PotentialTable;
use crate::core::potential::scoring::{MissingEnergyPolicy, Scorer, StructureScore};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Outcome of scoring one structure file.
#[derive(Debug)]
pub struct ScoreReport {
    pub path: PathBuf,
    pub result: Result<StructureScore, EngineError>,
}

pub fn score_atoms(
    atoms: &[AtomRecord],
    potential: &PotentialTable,
    filter: &PairFilter,
    policy: MissingEnergyPolicy,
) -> Result<StructureScore, EngineError> {
    let observations = base_pair_observations(atoms, filter);
    let score = Scorer::new(potential, policy).score(&observations)?;
    Ok(score)
}

pub fn score_structure(
    path: &Path,
    potential: &PotentialTable,
    filter: &PairFilter,
    policy: MissingEnergyPolicy,
) -> Result<StructureScore, EngineError> {
    let atoms = PdbFile::read_from_path(path).map_err(|source| EngineError::Structure {
        path: path.to_path_buf(),
        source,
    })?;
    let score = score_atoms(&atoms, potential, filter, policy)?;
    if score.is_empty() {
        warn!("{:?} has no scorable base pairs; its energy is 0.", path);
    }
    debug!(
        "{:?}: {} scored pairs, {} substituted, total {}",
        path,
        score.pairs.len(),
        score.substituted_count(),
        score.total
    );
    Ok(score)
}

/// Scores every structure in `paths` against a shared potential.
///
/// Each file gets its own report; a failure in one file does not stop the others.
#[instrument(skip_all, name = "scoring_workflow")]
pub fn run(
    paths: &[PathBuf],
    potential: &PotentialTable,
    filter: &PairFilter,
    policy: MissingEnergyPolicy,
    reporter: &ProgressReporter,
) -> Vec<ScoreReport> {
    info!(
        "Scoring {} structure(s) against a potential of {} cells.",
        paths.len(),
        potential.len()
    );
    reporter.report(Progress::PhaseStart { name: "Scoring" });
    reporter.report(Progress::TaskStart {
        total: paths.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = paths.iter();

    #[cfg(feature = "parallel")]
    let iterator = paths.par_iter();

    let reports: Vec<ScoreReport> = iterator
        .map(|path| {
            let result = score_structure(path, potential, filter, policy);
            reporter.report(Progress::TaskIncrement);
            ScoreReport {
                path: path.clone(),
                result,
            }
        })
        .collect();

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let failed = reports.iter().filter(|r| r.result.is_err()).count();
    info!(
        scored = reports.len() - failed,
        failed, "Scoring complete."
    );
    reports
}
