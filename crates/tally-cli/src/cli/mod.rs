//! CLI for the tally source occurrence counter.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tally_core::config;

use commands::{run_check, run_count};

/// Top-level CLI for tally.
#[derive(Debug, Parser)]
#[command(name = "tally")]
#[command(about = "tally: count marker occurrences across files and URLs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Read source identifiers from stdin, one per line, and print per-source
    /// counts plus a total in input order.
    Run {
        /// Run up to N fetch-and-count workers concurrently (default from config).
        #[arg(long, value_name = "N")]
        workers: Option<usize>,
        /// Substring to count (default from config).
        #[arg(long, value_name = "S")]
        pattern: Option<String>,
    },

    /// Resolve and count a single source, surfacing any failure.
    Check {
        /// Local path or URL.
        source: String,
        /// Substring to count (default from config).
        #[arg(long, value_name = "S")]
        pattern: Option<String>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run { workers, pattern } => run_count(&cfg, workers, pattern).await?,
            CliCommand::Check { source, pattern } => run_check(&cfg, &source, pattern).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
