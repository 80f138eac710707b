use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Spline-based quantile mapping.
#[derive(Parser)]
#[command(
    name = "qshift",
    version,
    about = "Correct values so their distribution matches a reference CDF"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Map values from a source distribution onto a target distribution.
    Shift(ShiftArgs),
    /// Check that every spline in a file behaves like a CDF.
    Check(CheckArgs),
    /// Build CDF splines from binned histograms.
    Build(BuildArgs),
}

/// Arguments for the `shift` subcommand.
#[derive(clap::Args)]
pub struct ShiftArgs {
    /// Spline set JSON file holding both CDFs.
    #[arg(short, long)]
    pub splines: PathBuf,

    /// Name of the source CDF (the distribution the input follows).
    #[arg(long)]
    pub source: String,

    /// Name of the target CDF (the reference distribution).
    #[arg(long)]
    pub target: String,

    /// Use bisection instead of the Newton correction.
    #[arg(short, long)]
    pub bisect: bool,

    /// Tail-linearization threshold; 0 disables it.
    #[arg(short = 'l', long = "linear-threshold")]
    pub linear_threshold: Option<f64>,

    /// Number of bisection halvings.
    #[arg(long)]
    pub bisect_steps: Option<usize>,

    /// Optional TOML configuration file with a `[mapping]` table.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Input file with one value per line (default: stdin).
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file for mapped values (default: stdout).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `check` subcommand.
#[derive(clap::Args)]
pub struct CheckArgs {
    /// Spline set JSON file to check.
    #[arg(short, long)]
    pub splines: PathBuf,

    /// Number of sample points per spline.
    #[arg(short = 'n', long, default_value_t = qshift_spline::DEFAULT_REGULARITY_SAMPLES)]
    pub samples: usize,
}

/// Arguments for the `build` subcommand.
#[derive(clap::Args)]
pub struct BuildArgs {
    /// Histogram JSON file (`{"histograms": {name: {edges, counts}}}`).
    #[arg(long)]
    pub histograms: PathBuf,

    /// Path for the spline set JSON output.
    #[arg(short, long)]
    pub output: PathBuf,
}
