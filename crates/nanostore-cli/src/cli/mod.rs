//! CLI for the NanoStore client. Each workflow tab is a subcommand.

mod commands;
mod notify;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use nanostore_core::config;
use std::path::PathBuf;

use commands::{run_download, run_renew, run_resolvers, run_upload, run_watch, DownloadArgs, UploadArgs};

/// Top-level CLI for uploading and downloading UHRP content.
#[derive(Debug, Parser)]
#[command(name = "nanostore")]
#[command(about = "NanoStore: upload and download content-addressed files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download content by its UHRP URL through an overlay resolver.
    Download {
        /// UHRP URL of the content.
        locator: String,
        /// Resolver endpoint to use; added to the list if not already known.
        #[arg(long)]
        resolver: Option<String>,
        /// File or directory to save the content to (default: current directory).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Do not wait for the local client presence check.
        #[arg(long)]
        skip_presence_check: bool,
    },

    /// Upload a file to a storage host for a retention period.
    Upload {
        /// Path to the file.
        path: PathBuf,
        /// Retention period in minutes (default from config).
        #[arg(long, value_name = "MINUTES")]
        retention: Option<u64>,
        /// Storage host to use; added to the list if not already known.
        #[arg(long)]
        host: Option<String>,
        /// Do not wait for the local client presence check.
        #[arg(long)]
        skip_presence_check: bool,
    },

    /// Renew hosted content (not yet available).
    Renew,

    /// List configured resolver endpoints and storage hosts.
    Resolvers,

    /// Poll for the local client and report changes until interrupted.
    Watch,

    /// Print shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },

    /// Print a man page (roff).
    Man,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // These do not need config.
        match cli.command {
            CliCommand::Completions { shell } => {
                let mut cmd = Cli::command();
                clap_complete::generate(shell, &mut cmd, "nanostore", &mut std::io::stdout());
                return Ok(());
            }
            CliCommand::Man => {
                clap_mangen::Man::new(Cli::command()).render(&mut std::io::stdout())?;
                return Ok(());
            }
            _ => {}
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Download {
                locator,
                resolver,
                output,
                skip_presence_check,
            } => {
                run_download(
                    &cfg,
                    DownloadArgs {
                        locator,
                        resolver,
                        output,
                        skip_presence_check,
                    },
                )
                .await?
            }
            CliCommand::Upload {
                path,
                retention,
                host,
                skip_presence_check,
            } => {
                run_upload(
                    &cfg,
                    UploadArgs {
                        path,
                        retention,
                        host,
                        skip_presence_check,
                    },
                )
                .await?
            }
            CliCommand::Renew => run_renew()?,
            CliCommand::Resolvers => run_resolvers(&cfg)?,
            CliCommand::Watch => run_watch(&cfg).await?,
            CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
