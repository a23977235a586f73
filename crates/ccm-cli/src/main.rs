//! ccm - constrained color-correction matrix derivation CLI

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "ccm")]
#[command(author, version, about = "Spectral CCM derivation")]
#[command(long_about = "
Derives a 3x3 color-correction matrix whose spectral sensitivity stays under
a per-wavelength response ceiling while maximizing brightness over a bank of
reflectance samples.

Examples:
  ccm info data/cie_xyz.csv               # Show spectral table info
  ccm solve data/cie_xyz.csv data/reflectance.csv
  ccm solve basis.csv refl.csv -n 100000 --seed 7 --parallel
  ccm solve basis.csv refl.csv --json --dump-ssf ssf.csv
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive a color-correction matrix from spectral data
    #[command(visible_alias = "s")]
    Solve(SolveArgs),

    /// Display spectral table information
    #[command(visible_alias = "i")]
    Info(InfoArgs),
}

#[derive(Args)]
struct SolveArgs {
    /// Sensor basis CSV (wavelength plus 3 response channels)
    basis: PathBuf,

    /// Reflectance CSV (wavelength plus one column per material)
    reflectance: PathBuf,

    /// Target grid start wavelength (nm)
    #[arg(long, default_value_t = 400.0)]
    grid_start: f64,

    /// Target grid end wavelength (nm)
    #[arg(long, default_value_t = 700.0)]
    grid_end: f64,

    /// Target grid point count
    #[arg(long, default_value_t = 301)]
    grid_count: usize,

    /// Iteration budget for the random search
    #[arg(short = 'n', long, default_value_t = 10_000)]
    iterations: usize,

    /// Seed for the candidate generator
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Shard iterations across the thread pool
    #[arg(long)]
    parallel: bool,

    /// Center of the synthetic narrow-band sample (nm)
    #[arg(long, default_value_t = 500.0)]
    band_center: f64,

    /// Width of the synthetic narrow-band sample (nm)
    #[arg(long, default_value_t = 10.0)]
    band_width: f64,

    /// Skip the synthetic narrow-band sample
    #[arg(long)]
    no_band: bool,

    /// Relative tolerance for the neutrality check
    #[arg(long, default_value_t = 1e-6)]
    tolerance: f64,

    /// Write wavelength, SSF channels, and ceiling as CSV for plotting
    #[arg(long)]
    dump_ssf: Option<PathBuf>,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct InfoArgs {
    /// Input spectral table(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Solve(args) => commands::solve::run(args, cli.verbose),
        Commands::Info(args) => commands::info::run(args, cli.verbose),
    }
}
