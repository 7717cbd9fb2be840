//! CLI for the fsup file server uploader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fsup_core::{config, logging};
use std::path::PathBuf;

use commands::{run_config_path, run_upload, UploadArgs};

/// Top-level CLI for fsup.
#[derive(Debug, Parser)]
#[command(name = "fsup")]
#[command(about = "Upload files to an HTTP file server and report where they were stored", long_about = None)]
pub struct Cli {
    /// Log to stderr instead of ~/.local/state/fsup/fsup.log.
    #[arg(long, global = true)]
    pub no_file_logging: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Upload a file, or every matching file in a directory.
    Upload {
        /// File or directory to upload.
        file_or_dir: PathBuf,

        /// File server upload endpoint (default: $FS_URL, then config file).
        #[arg(long)]
        url: Option<String>,

        /// Credentials as user:password (default: $FS_AUTH, then config auth_file).
        #[arg(long, conflicts_with = "auth_file")]
        auth: Option<String>,

        /// File whose first non-empty line is user:password.
        #[arg(long, value_name = "PATH")]
        auth_file: Option<PathBuf>,

        /// Extension filter without the dot; comma-separated list allowed (default from config: "log").
        #[arg(long, value_name = "EXT")]
        file_ext: Option<String>,

        /// Server-side subdirectory sent in the subDir header.
        #[arg(long, default_value = "", conflicts_with = "no_subdir")]
        subdirs: String,

        /// Send no subDir header at all.
        #[arg(long)]
        no_subdir: bool,

        /// List what would be uploaded without sending anything.
        #[arg(long)]
        dry_run: bool,

        /// Print the path -> location mapping as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the location of the config file.
    ConfigPath,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        if cli.no_file_logging {
            logging::init_logging_stderr();
        } else if let Err(e) = logging::init_logging() {
            logging::init_logging_stderr();
            tracing::warn!("file logging unavailable, using stderr: {:#}", e);
        }

        match cli.command {
            CliCommand::Upload {
                file_or_dir,
                url,
                auth,
                auth_file,
                file_ext,
                subdirs,
                no_subdir,
                dry_run,
                json,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let args = UploadArgs {
                    file_or_dir,
                    url,
                    auth,
                    auth_file,
                    file_ext,
                    subdirs: (!no_subdir).then_some(subdirs),
                    dry_run,
                    json,
                };
                run_upload(&cfg, args)?;
            }
            CliCommand::ConfigPath => run_config_path()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
