use crate::cli::TrainArgs;
use crate::config::PartialConfig;
use crate::error::Result;
use crate::utils::inputs::{expand_inputs, structure_stem};
use basepot::core::io::table::{save_pair_tables, write_frequencies, write_potential};
use basepot::core::potential::energy::PotentialTable;
use basepot::core::potential::frequency::FrequencyTable;
use basepot::engine::progress::ProgressReporter;
use basepot::workflows::train::{self, SkippedStructure};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

pub const POTENTIAL_FILE_NAME: &str = "potential.tsv";
pub const FREQUENCY_FILE_NAME: &str = "frequencies.tsv";

pub fn run(args: TrainArgs, reporter: &ProgressReporter) -> Result<()> {
    let partial_config = PartialConfig::load(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.potential_config(&args.parameters)?;

    let inputs = expand_inputs(&args.inputs)?;
    println!("Training on {} structure file(s)...", inputs.len());

    if args.per_structure {
        let result = train::run_per_structure(&inputs, &config, reporter)?;
        for structure in &result.potentials {
            let stem = structure_stem(&structure.path);
            let tag = partial_config.tag_or(args.tag.as_deref(), &stem);
            let dir = args.output.join(&stem);
            write_outputs(&dir, &tag, &structure.frequencies, &structure.potential)?;
            println!(
                "  {} -> {} ({} observations)",
                structure.path.display(),
                dir.display(),
                structure.frequencies.grand_total()
            );
        }
        print_skipped(&result.skipped);
        println!(
            "✓ Trained {} per-structure potential(s) in {}",
            result.potentials.len(),
            args.output.display()
        );
    } else {
        let result = train::run(&inputs, &config, reporter)?;
        let tag = partial_config.tag(args.tag.as_deref());
        write_outputs(&args.output, &tag, &result.frequencies, &result.potential)?;
        print_skipped(&result.skipped);
        println!(
            "✓ Potential from {} structure(s) and {} observations written to {}",
            result.structures,
            result.frequencies.grand_total(),
            args.output.display()
        );
    }

    Ok(())
}

/// Writes the per-pair tables, the combined potential and the frequency report into `dir`.
pub fn write_outputs(
    dir: &Path,
    tag: &str,
    frequencies: &FrequencyTable,
    potential: &PotentialTable,
) -> Result<()> {
    fs::create_dir_all(dir)?;
    let written = save_pair_tables(dir, tag, potential)?;
    info!("Wrote {} per-pair table(s) to {:?}", written.len(), dir);

    let potential_path = dir.join(POTENTIAL_FILE_NAME);
    write_potential(BufWriter::new(File::create(&potential_path)?), potential)?;
    info!("Wrote combined potential to {:?}", &potential_path);

    let frequency_path = dir.join(FREQUENCY_FILE_NAME);
    write_frequencies(BufWriter::new(File::create(&frequency_path)?), frequencies)?;
    info!("Wrote frequency report to {:?}", &frequency_path);
    Ok(())
}

fn print_skipped(skipped: &[SkippedStructure]) {
    if skipped.is_empty() {
        return;
    }
    println!("Warning: {} file(s) could not be read and were skipped:", skipped.len());
    for entry in skipped {
        println!("  {}: {}", entry.path.display(), entry.error);
    }
}
