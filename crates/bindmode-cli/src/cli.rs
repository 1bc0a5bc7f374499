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
    author = "BindMode Developers",
    version,
    about = "BindMode CLI - Detect and classify non-covalent receptor-ligand interactions from 3D structures.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output and the console summary
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
    /// Analyze the binding mode of a ligand in a receptor.
    Analyze(AnalyzeArgs),
    /// Print the default analysis parameters as a TOML configuration file.
    Defaults,
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to the receptor structure (PDB or PDBQT).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub receptor: PathBuf,

    /// Path to the ligand structure (PDB or PDBQT).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub ligand: PathBuf,

    /// Output directory for report.json and binding_mode_summary.csv.
    #[arg(short, long, default_value = "./bindmode_analysis/", value_name = "DIR")]
    pub output: PathBuf,

    /// Path to an analysis parameter file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Additional residue templates in TOML format, merged over the built-in ones.
    #[arg(short, long, value_name = "PATH")]
    pub templates: Option<PathBuf>,

    /// Set a specific analysis parameter, overriding the config file.
    /// Can be used multiple times. Example: -S salt_bridge_dist_cutoff=4.0
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,

    /// Do not write the residue summary CSV.
    #[arg(long)]
    pub no_csv: bool,
}
