//! Loco CLI - tools for Locomotion save, scenario and object files
//!
//! # Commands
//!
//! - `loco uncompress <path>` - Rewrite a file with every chunk uncompressed
//! - `loco simulate <path> <ticks>` - Load a save and advance it
//! - `loco compare <a> <b>` - Report decoded chunks that differ
//! - `loco info <path>` - Print header, save details and packed objects
//!
//! # Exit codes
//!
//! `0` on success, `1` when `compare` finds differences, `2` on error.
//! `simulate` always exits with `0`.
//!
//! # Configuration (config.toml)
//!
//! ```toml
//! [logging]
//! filter = "info"        # used when RUST_LOG is unset
//!
//! [save]
//! compress = true        # chunk encoding for `simulate -o`
//!
//! [uncompress]
//! keep_backup = false    # copy <path> to <path>.bak before overwriting
//! ```

mod compare;
mod config;
mod info;
mod simulate;
mod uncompress;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::config::Config;

/// Loco CLI - tools for Locomotion save, scenario and object files
#[derive(Parser)]
#[command(name = "loco")]
#[command(about = "Tools for Locomotion save, scenario and object files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite a file with every chunk stored uncompressed
    Uncompress(uncompress::UncompressArgs),

    /// Load a file and advance its game state
    Simulate(simulate::SimulateArgs),

    /// Compare the decoded chunks of two files
    Compare(compare::CompareArgs),

    /// Print a summary of a file
    Info(info::InfoArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = config::load();
    init_logging(&loaded.config);
    if let Some(error) = &loaded.error {
        tracing::warn!("Ignoring config file {}", error);
    }

    let result = run(cli.command, &loaded.config);
    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(command: Commands, config: &Config) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Uncompress(args) => {
            uncompress::execute(args, config)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Simulate(args) => {
            simulate::execute(args, config);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Compare(args) => {
            let identical = compare::execute(args)?;
            Ok(if identical {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
        Commands::Info(args) => {
            info::execute(args)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_logging(config: &Config) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}
