//! treegp CLI - run genetic programming demos from the command line.

// Allow unwrap in tests and print in the CLI binary
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// treegp - strongly typed tree-based genetic programming
#[derive(Parser, Debug)]
#[command(name = "treegp")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Evolve an artificial ant controller on a food trail
    Ant {
        /// Population size (default: 300)
        #[arg(short, long)]
        population: Option<usize>,

        /// Number of generations (default: 40)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Move budget per evaluation (default: 600)
        #[arg(short, long)]
        moves: Option<usize>,

        /// Trail file (default: embedded Santa Fe trail)
        #[arg(short, long)]
        trail: Option<std::path::PathBuf>,

        /// JSON evolution config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let result = match args.command {
        Commands::Ant {
            population,
            generations,
            seed,
            moves,
            trail,
            config,
            format,
        } => cli::ant::execute(&cli::ant::AntArgs {
            population,
            generations,
            seed,
            moves,
            trail,
            config,
            format,
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
