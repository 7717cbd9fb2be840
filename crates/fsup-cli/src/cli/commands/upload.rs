//! `fsup upload <file-or-dir>` – upload matching files and print their locations.

use anyhow::{Context, Result};
use fsup_core::config::FsupConfig;
use fsup_core::credentials::read_auth_file;
use fsup_core::target::EnvDefaults;
use fsup_core::{upload_to_web_server, UploadOptions, UploadResult};
use std::path::PathBuf;

/// Arguments of the upload command after clap parsing.
#[derive(Debug, Clone)]
pub struct UploadArgs {
    pub file_or_dir: PathBuf,
    pub url: Option<String>,
    pub auth: Option<String>,
    pub auth_file: Option<PathBuf>,
    pub file_ext: Option<String>,
    pub subdirs: Option<String>,
    pub dry_run: bool,
    pub json: bool,
}

impl UploadArgs {
    pub fn options(&self, cfg: &FsupConfig) -> UploadOptions {
        UploadOptions {
            file_ext: self.file_ext.clone().unwrap_or_else(|| cfg.file_ext.clone()),
            subdirs: self.subdirs.clone(),
            dry_run: self.dry_run,
        }
    }
}

pub fn run_upload(cfg: &FsupConfig, args: UploadArgs) -> Result<()> {
    // An explicit --auth-file counts as an explicit credential string.
    let auth = match (&args.auth, &args.auth_file) {
        (Some(a), _) => Some(a.clone()),
        (None, Some(path)) => Some(read_auth_file(path)?),
        (None, None) => None,
    };
    let defaults = EnvDefaults::from_process().with_config(cfg);
    let opts = args.options(cfg);

    let result = upload_to_web_server(
        &args.file_or_dir,
        args.url.as_deref(),
        auth.as_deref(),
        &opts,
        &defaults,
        cfg.curl_options(),
    )
    .with_context(|| format!("upload {}", args.file_or_dir.display()))?;

    print_result(&result, &args)
}

fn print_result(result: &UploadResult, args: &UploadArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }
    if args.dry_run {
        println!("Dry run: nothing was uploaded.");
    } else if result.is_empty() {
        println!("No files to upload.");
    } else {
        for (path, location) in result {
            println!("{} -> {}", path.display(), location);
        }
    }
    Ok(())
}
