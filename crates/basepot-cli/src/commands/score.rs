use crate::cli::ScoreArgs;
use crate::config::PartialConfig;
use crate::error::{CliError, Result};
use crate::utils::inputs::{expand_inputs, structure_stem};
use basepot::core::io::table::{load_pair_tables, read_potential, write_score};
use basepot::core::potential::binning::BinScheme;
use basepot::core::potential::energy::PotentialTable;
use basepot::core::potential::scoring::MissingEnergyPolicy;
use basepot::engine::progress::ProgressReporter;
use basepot::workflows;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

pub const SCORE_FILE_SUFFIX: &str = "_pseudo_energy.txt";

pub fn run(args: ScoreArgs, reporter: &ProgressReporter) -> Result<()> {
    let partial_config = PartialConfig::load(args.config.as_deref())?;
    let config = partial_config.potential_config(&args.parameters)?;
    let policy = match partial_config.penalty(args.penalty) {
        Some(penalty) => MissingEnergyPolicy::Penalty(penalty),
        None => MissingEnergyPolicy::Fail,
    };
    info!("Missing energies are handled with policy {:?}", policy);

    let potential = load_potential(&args.potential, config.binning)?;
    let inputs = expand_inputs(&args.inputs)?;
    fs::create_dir_all(&args.output)?;

    println!("Scoring {} structure file(s)...", inputs.len());
    let reports = workflows::score::run(&inputs, &potential, &config.pair_filter, policy, reporter);

    let total = reports.len();
    let mut failed = 0;
    for report in reports {
        match report.result {
            Ok(score) => {
                let path = score_output_path(&args.output, &report.path);
                write_score(BufWriter::new(File::create(&path)?), &score, potential.scheme())?;
                let note = if score.is_empty() {
                    " (no scorable pairs)".to_string()
                } else if score.substituted_count() > 0 {
                    format!(" ({} penalised pair(s))", score.substituted_count())
                } else {
                    String::new()
                };
                println!("  {}: {}{}", report.path.display(), score.total, note);
            }
            Err(e) => {
                error!("Failed to score {:?}: {}", &report.path, e);
                eprintln!("  {}: failed ({})", report.path.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(CliError::ScoringFailures { failed, total });
    }
    println!("✓ Scores written to {}", args.output.display());
    Ok(())
}

/// Loads a combined table, or every per-pair table when `path` is a directory.
pub fn load_potential(path: &Path, scheme: BinScheme) -> Result<PotentialTable> {
    let potential = if path.is_dir() {
        info!("Loading per-pair potential tables from {:?}", path);
        load_pair_tables(path, scheme)?
    } else {
        info!("Loading combined potential table from {:?}", path);
        read_potential(BufReader::new(File::open(path)?), scheme)?
    };

    if potential.is_empty() {
        return Err(CliError::Argument(format!(
            "no potential entries found in '{}'",
            path.display()
        )));
    }
    if potential.defined_count() == 0 {
        warn!("The potential has no defined pseudo energies.");
    }
    Ok(potential)
}

fn score_output_path(dir: &Path, structure: &Path) -> PathBuf {
    dir.join(format!("{}{}", structure_stem(structure), SCORE_FILE_SUFFIX))
}
