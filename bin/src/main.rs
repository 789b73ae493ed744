//! rankwise CLI binary.
//!
//! Provides a command-line interface over CSV files for resampling, ranking,
//! and combining factors.

mod cmd;
mod io;

use std::{path::PathBuf, process};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "rankwise")]
#[command(about = "Cross-sectional factor ranking and weighted-rank aggregation", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Forward-fill a wide factor CSV onto a trading calendar
    Resample {
        /// Wide factor CSV (first column `date`)
        factor: PathBuf,

        /// Calendar CSV with a `date` column
        #[arg(short, long)]
        calendar: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rank a factor within each date
    Rank {
        /// Wide factor CSV (first column `date`)
        factor: PathBuf,

        /// Resample onto this calendar first
        #[arg(short, long)]
        calendar: Option<PathBuf>,

        /// Rank descending: the highest value gets rank 1
        #[arg(long)]
        negative: bool,

        /// Factor name (defaults to the file stem)
        #[arg(long)]
        name: Option<String>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Combine ranked factors with the weights in a pipeline config
    Combine {
        /// Pipeline config (JSON)
        #[arg(long)]
        config: PathBuf,

        /// Directory holding `<factor>.csv` files (defaults to $RANKWISE_DATA_DIR)
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Resample every factor onto this calendar first
        #[arg(short, long)]
        calendar: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build an equal-weight composite for every k-factor subset
    Sweep {
        /// Pipeline config (JSON)
        #[arg(long)]
        config: PathBuf,

        /// Number of factors per subset
        #[arg(short)]
        k: usize,

        /// Directory holding `<factor>.csv` files (defaults to $RANKWISE_DATA_DIR)
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Resample every factor onto this calendar first
        #[arg(short, long)]
        calendar: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show a reporting quarter's publication window
    Quarter {
        /// A quarter (`2013-Q1`) or a date (`2013-06-30`)
        input: String,
    },
}

fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rankwise=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resample {
            factor,
            calendar,
            output,
        } => {
            cmd::resample::resample_factor(&factor, &calendar, output.as_deref())?;
        }
        Commands::Rank {
            factor,
            calendar,
            negative,
            name,
            output,
        } => {
            cmd::rank::rank_factor(
                &factor,
                calendar.as_deref(),
                negative,
                name.as_deref(),
                output.as_deref(),
            )?;
        }
        Commands::Combine {
            config,
            data_dir,
            calendar,
            output,
        } => {
            cmd::combine::combine_factors(
                &config,
                data_dir.as_deref(),
                calendar.as_deref(),
                output.as_deref(),
            )?;
        }
        Commands::Sweep {
            config,
            k,
            data_dir,
            calendar,
            output,
        } => {
            cmd::sweep::sweep_factors(
                &config,
                k,
                data_dir.as_deref(),
                calendar.as_deref(),
                output.as_deref(),
            )?;
        }
        Commands::Quarter { input } => {
            cmd::quarter::show_quarter(&input)?;
        }
    }

    Ok(())
}
