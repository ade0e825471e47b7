//! Epifit CLI - SIR parameter estimation from observed case counts
//!
//! This is the operational entry point for the epifit workspace.
//!
//! # Commands
//!
//! - `epifit fit --confirmed .. --deaths .. --recovered ..` - Fit SIR
//!   transmission and removal rates to cumulative case-count series
//!
//! # Architecture
//!
//! As the service layer of the workspace, this crate wires preprocessing
//! and the fit driver together behind a stateless batch command: each
//! invocation parses its inputs, runs one fit, prints one JSON object.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod error;

pub use error::{CliError, Result};

/// Epifit SIR Parameter Estimation CLI
#[derive(Parser)]
#[command(name = "epifit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit SIR transmission and removal rates to case-count series
    Fit {
        /// Comma-separated cumulative confirmed case counts
        #[arg(long)]
        confirmed: String,

        /// Comma-separated cumulative death counts
        #[arg(long)]
        deaths: String,

        /// Comma-separated cumulative recovery counts
        #[arg(long)]
        recovered: String,

        /// Total population (pins the initial susceptible count)
        #[arg(long, default_value_t = 1_000_000_000, value_parser = clap::value_parser!(u64).range(1..))]
        population: u64,

        /// Number of leading days to discard before fitting
        #[arg(long, default_value_t = 0)]
        trim: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialise tracing; --verbose raises the default level to debug.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Fit {
            confirmed,
            deaths,
            recovered,
            population,
            trim,
        } => commands::fit::run(&confirmed, &deaths, &recovered, population, trim),
    }
}
