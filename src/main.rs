use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use slcsp::{calculate_from_paths, logging, write_results, InputPaths};

/// Second Lowest Cost Silver Plan (SLCSP) for each ZIP code
#[derive(Parser, Debug)]
#[command(name = "slcsp")]
#[command(version, about = "Calculate Second Lowest Cost Silver Plan (SLCSP)")]
struct Cli {
    /// Path to plans CSV file (state, rate_area, metal_level, rate)
    #[arg(long)]
    plans: PathBuf,

    /// Path to zips CSV file (zipcode, state, rate_area)
    #[arg(long)]
    zips: PathBuf,

    /// Path to slcsp CSV file listing the target ZIP codes
    #[arg(long)]
    slcsp: PathBuf,

    /// Log to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let start = Instant::now();

    let paths = InputPaths {
        plans: cli.plans,
        zips: cli.zips,
        slcsp: cli.slcsp,
    };
    let calculation = calculate_from_paths(&paths).context("Failed to load input tables")?;

    let stdout = io::stdout();
    write_results(stdout.lock(), &calculation.schema, &calculation.targets()).context("Failed to write results")?;

    info!("{}", calculation.report.summary());
    info!(elapsed = ?start.elapsed(), "SLCSP calculation finished");

    Ok(())
}
