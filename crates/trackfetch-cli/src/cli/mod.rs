//! CLI for trackfetch.

mod commands;
mod input;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use trackfetch_core::config;

use commands::{run_check, run_get, run_info};

/// Top-level CLI for trackfetch.
#[derive(Debug, Parser)]
#[command(name = "trackfetch")]
#[command(about = "Look up a streaming-service link and download the track", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/trackfetch/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Check that a link is well-formed without contacting any server.
    Check {
        /// Track, album or playlist link, or "-" to read it from stdin.
        link: String,
    },

    /// Show the track a link resolves to.
    Info {
        /// Track, album or playlist link, or "-" to read it from stdin.
        link: String,
    },

    /// Resolve a link and save the track as "<artist> - <title>.mp3".
    Get {
        /// Track, album or playlist link, or "-" to read it from stdin.
        link: String,
        /// Directory to save into (default: current directory).
        #[arg(long, short = 'o', value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// Replace an existing file instead of saving as "name (1).mp3".
        #[arg(long)]
        overwrite: bool,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match &cli.config {
            Some(path) => config::load_or_init_at(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Check { link } => run_check(&cfg, &link)?,
            CliCommand::Info { link } => run_info(&cfg, &link).await?,
            CliCommand::Get {
                link,
                output_dir,
                overwrite,
            } => {
                let output_dir = match output_dir {
                    Some(dir) => dir,
                    None => std::env::current_dir()?,
                };
                run_get(&cfg, &link, &output_dir, overwrite).await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
