use crate::cli::DistancesArgs;
use crate::config::PartialConfig;
use crate::error::Result;
use basepot::core::io::table::write_generic_distances;
use basepot::workflows;
use std::fs::File;
use std::io::{self, BufWriter};
use tracing::info;

pub fn run(args: DistancesArgs) -> Result<()> {
    let partial_config = PartialConfig::load(args.config.as_deref())?;
    let config = partial_config.distance_config(args.min_separation)?;

    let distances = workflows::distances::run(&args.input, config.generic_min_separation)?;

    match &args.output {
        Some(path) => {
            write_generic_distances(BufWriter::new(File::create(path)?), &distances)?;
            info!("Wrote {} distance(s) to {:?}", distances.len(), path);
        }
        None => write_generic_distances(io::stdout().lock(), &distances)?,
    }
    Ok(())
}
