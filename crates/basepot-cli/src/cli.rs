use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "basepot developers",
    version,
    about = "basepot - train knowledge-based base-pair distance potentials from RNA structures and score new structures with them.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output and progress bars except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derive a pseudo-energy potential from a corpus of PDB structures.
    Train(TrainArgs),
    /// Score PDB structures against a trained potential.
    Score(ScoreArgs),
    /// List distances between all sufficiently separated residues of one structure.
    Distances(DistancesArgs),
}

/// Overrides for the pair filter and binning, shared by `train` and `score`.
#[derive(Args, Debug, Default, Clone)]
pub struct PotentialArgs {
    /// Minimum residue separation for a pair to be counted.
    #[arg(long, value_name = "INT")]
    pub min_separation: Option<u32>,

    /// Pairs farther apart than this distance (in Angstrom) are ignored.
    #[arg(long, value_name = "FLOAT")]
    pub cutoff: Option<f64>,

    /// Width of each distance bin.
    #[arg(long, value_name = "FLOAT")]
    pub bin_width: Option<f64>,

    /// Number of distance bins.
    #[arg(long, value_name = "INT")]
    pub bin_count: Option<usize>,
}

/// Arguments for the `train` subcommand.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// PDB files, or directories whose *.pdb files are used.
    #[arg(short, long = "input", required = true, num_args = 1.., value_name = "PATH")]
    pub inputs: Vec<PathBuf>,

    /// Directory receiving the trained tables.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output: PathBuf,

    /// Optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Tag inserted into the per-pair file names ({PAIR}_{TAG}_pseudo_energy.txt).
    #[arg(short, long, value_name = "TAG")]
    pub tag: Option<String>,

    /// Train one potential per input structure instead of a pooled one.
    #[arg(long)]
    pub per_structure: bool,

    #[command(flatten)]
    pub parameters: PotentialArgs,
}

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// PDB files, or directories whose *.pdb files are scored.
    #[arg(short, long = "input", required = true, num_args = 1.., value_name = "PATH")]
    pub inputs: Vec<PathBuf>,

    /// A combined potential table, or a directory of per-pair tables.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub potential: PathBuf,

    /// Directory receiving one score file per structure.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output: PathBuf,

    /// Optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Energy substituted for pairs without a defined pseudo energy.
    /// Without it, such pairs make scoring of the structure fail.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub penalty: Option<f64>,

    #[command(flatten)]
    pub parameters: PotentialArgs,
}

/// Arguments for the `distances` subcommand.
#[derive(Args, Debug)]
pub struct DistancesArgs {
    /// The PDB file to analyse.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Output file; the list is printed to stdout when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Minimum residue separation for a pair to be listed.
    #[arg(long, value_name = "INT")]
    pub min_separation: Option<u32>,
}
