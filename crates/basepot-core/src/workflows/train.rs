use crate::core::io::pdb::PdbFile;
use crate::core::io::traits::StructureFile;
use crate::core::models::atom::AtomRecord;
use crate::core::potential::distances::base_pair_observations;
use crate::core::potential::energy::PotentialTable;
use crate::core::potential::frequency::{FrequencyAccumulator, FrequencyTable};
use crate::engine::config::PotentialConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A corpus file that could not be read and was left out of the statistics.
#[derive(Debug)]
pub struct SkippedStructure {
    pub path: PathBuf,
    pub error: EngineError,
}

#[derive(Debug)]
pub struct TrainingResult {
    pub frequencies: FrequencyTable,
    pub potential: PotentialTable,
    /// Number of structures that contributed to the statistics.
    pub structures: usize,
    pub skipped: Vec<SkippedStructure>,
}

/// Potential derived from a single structure of the corpus.
#[derive(Debug)]
pub struct StructurePotential {
    pub path: PathBuf,
    pub frequencies: FrequencyTable,
    pub potential: PotentialTable,
}

#[derive(Debug)]
pub struct PerStructureTraining {
    pub potentials: Vec<StructurePotential>,
    pub skipped: Vec<SkippedStructure>,
}

/// Counts the base-pair observations of one structure.
pub fn accumulate_atoms(atoms: &[AtomRecord], config: &PotentialConfig) -> FrequencyAccumulator {
    let observations = base_pair_observations(atoms, &config.pair_filter);
    let mut accumulator = new_accumulator(config);
    accumulator.extend(&observations);
    accumulator
}

pub fn accumulate_structure(
    path: &Path,
    config: &PotentialConfig,
) -> Result<FrequencyAccumulator, EngineError> {
    let atoms = PdbFile::read_from_path(path).map_err(|source| EngineError::Structure {
        path: path.to_path_buf(),
        source,
    })?;
    let accumulator = accumulate_atoms(&atoms, config);
    debug!(
        "{:?}: {} representative atoms, {} binned observations",
        path,
        atoms.len(),
        accumulator.observation_count()
    );
    Ok(accumulator)
}

fn new_accumulator(config: &PotentialConfig) -> FrequencyAccumulator {
    FrequencyAccumulator::new(
        config.binning,
        config.pair_filter.whitelist.iter().copied(),
    )
}

/// Trains one potential pooled over every readable structure in `paths`.
///
/// Unreadable files are logged, recorded in [`TrainingResult::skipped`] and
/// left out. Fails only when no file at all could be read.
#[instrument(skip_all, name = "training_workflow")]
pub fn run(
    paths: &[PathBuf],
    config: &PotentialConfig,
    reporter: &ProgressReporter,
) -> Result<TrainingResult, EngineError> {
    info!("Training pooled potential from {} structure(s).", paths.len());

    let outcomes = accumulate_all(paths, config, reporter);

    reporter.report(Progress::PhaseStart {
        name: "Aggregating Frequencies",
    });
    let mut skipped = Vec::new();
    let mut structures = 0;
    let mut combined = new_accumulator(config);
    for (path, outcome) in paths.iter().zip(outcomes) {
        match outcome {
            Ok(accumulator) => {
                combined = combined.merge(accumulator);
                structures += 1;
            }
            Err(error) => skipped.push(skip(path, error, reporter)),
        }
    }

    if structures == 0 {
        reporter.report(Progress::PhaseFinish);
        return Err(EngineError::EmptyCorpus {
            attempted: paths.len(),
        });
    }

    let frequencies = combined.finalize();
    if frequencies.grand_total() == 0 {
        warn!("No base-pair observations in the corpus; every pseudo energy is undefined.");
    }
    let potential = PotentialTable::from_frequencies(&frequencies);
    reporter.report(Progress::PhaseFinish);

    info!(
        structures,
        skipped = skipped.len(),
        observations = frequencies.grand_total(),
        unbinned = frequencies.unbinned(),
        defined_energies = potential.defined_count(),
        "Training complete."
    );

    Ok(TrainingResult {
        frequencies,
        potential,
        structures,
        skipped,
    })
}

/// Trains a separate potential for each readable structure in `paths`.
#[instrument(skip_all, name = "per_structure_training_workflow")]
pub fn run_per_structure(
    paths: &[PathBuf],
    config: &PotentialConfig,
    reporter: &ProgressReporter,
) -> Result<PerStructureTraining, EngineError> {
    info!("Training one potential per structure for {} file(s).", paths.len());

    let outcomes = accumulate_all(paths, config, reporter);

    let mut potentials = Vec::new();
    let mut skipped = Vec::new();
    for (path, outcome) in paths.iter().zip(outcomes) {
        match outcome {
            Ok(accumulator) => {
                let frequencies = accumulator.finalize();
                let potential = PotentialTable::from_frequencies(&frequencies);
                potentials.push(StructurePotential {
                    path: path.clone(),
                    frequencies,
                    potential,
                });
            }
            Err(error) => skipped.push(skip(path, error, reporter)),
        }
    }

    if potentials.is_empty() {
        return Err(EngineError::EmptyCorpus {
            attempted: paths.len(),
        });
    }

    info!(
        trained = potentials.len(),
        skipped = skipped.len(),
        "Per-structure training complete."
    );
    Ok(PerStructureTraining {
        potentials,
        skipped,
    })
}

fn accumulate_all(
    paths: &[PathBuf],
    config: &PotentialConfig,
    reporter: &ProgressReporter,
) -> Vec<Result<FrequencyAccumulator, EngineError>> {
    reporter.report(Progress::PhaseStart {
        name: "Reading Structures",
    });
    reporter.report(Progress::TaskStart {
        total: paths.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = paths.iter();

    #[cfg(feature = "parallel")]
    let iterator = paths.par_iter();

    let outcomes = iterator
        .map(|path| {
            let outcome = accumulate_structure(path, config);
            reporter.report(Progress::TaskIncrement);
            outcome
        })
        .collect();

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    outcomes
}

fn skip(path: &Path, error: EngineError, reporter: &ProgressReporter) -> SkippedStructure {
    warn!("Skipping {:?}: {}", path, error);
    reporter.message(format!("Skipped {}", path.display()));
    SkippedStructure {
        path: path.to_path_buf(),
        error,
    }
}
