//! Upload run: discover files, POST each one in order, collect locations.
//!
//! The run is all-or-nothing. The first failing file aborts the queue and
//! its error is returned; locations of files uploaded before it are only
//! visible in the log.

use crate::client::{CurlFileServer, CurlOptions, FileServer};
use crate::discover::{files_by_extensions, parse_extensions};
use crate::error::UploadError;
use crate::target::{self, EnvDefaults};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Local path → server-assigned location, one entry per uploaded file.
pub type UploadResult = BTreeMap<PathBuf, String>;

/// Per-run options besides the server target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOptions {
    /// Extension filter without the dot; a comma-separated list matches any.
    pub file_ext: String,
    /// Value for the `subDir` header; `None` sends no header.
    pub subdirs: Option<String>,
    /// Discover and log only; nothing is sent.
    pub dry_run: bool,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            file_ext: "log".to_string(),
            subdirs: Some(String::new()),
            dry_run: false,
        }
    }
}

/// Appends a trailing `/` to a non-empty subdirectory. `""` stays `""`.
pub fn normalize_subdir(subdir: Option<&str>) -> Option<String> {
    subdir.map(|s| {
        if s.is_empty() || s.ends_with('/') {
            s.to_string()
        } else {
            format!("{s}/")
        }
    })
}

/// Rejects a subdirectory that cannot travel as a single header value.
fn check_subdir(subdir: Option<&str>) -> Result<(), UploadError> {
    match subdir {
        Some(s) if s.contains(['\r', '\n', '\0']) => Err(UploadError::Config(format!(
            "subdirectory {s:?} contains a line break or NUL"
        ))),
        _ => Ok(()),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Uploads every file under `file_or_dir` matching `opts.file_ext` to `server`,
/// one at a time in discovery order.
pub fn upload_all<S: FileServer + ?Sized>(
    server: &S,
    file_or_dir: &Path,
    opts: &UploadOptions,
) -> Result<UploadResult, UploadError> {
    check_subdir(opts.subdirs.as_deref())?;
    let exts = parse_extensions(&opts.file_ext);
    let files = files_by_extensions(file_or_dir, &exts)?;
    let subdir = normalize_subdir(opts.subdirs.as_deref());

    let mut locations = UploadResult::new();
    tracing::info!(
        path = %file_or_dir.display(),
        file_ext = %opts.file_ext,
        dry_run = opts.dry_run,
        "file server upload"
    );
    if files.is_empty() {
        tracing::info!("No files to upload");
        return Ok(locations);
    }

    tracing::info!(count = files.len(), "uploading files to the file server");
    for file in files {
        let name = display_name(&file);
        if opts.dry_run {
            tracing::info!(file = %name, "dry run: would upload");
            continue;
        }
        tracing::info!(file = %name, "uploading");
        let location = server.upload_file(&file, subdir.as_deref())?;
        tracing::info!(file = %name, location = %location, "uploaded");
        locations.insert(file, location);
    }
    Ok(locations)
}

/// Resolves the server target from `url` / `auth` (falling back to `defaults`),
/// then uploads like [`upload_all`] over libcurl.
///
/// Configuration errors are reported before the file system is touched.
pub fn upload_to_web_server(
    file_or_dir: &Path,
    url: Option<&str>,
    auth: Option<&str>,
    opts: &UploadOptions,
    defaults: &EnvDefaults,
    curl: CurlOptions,
) -> Result<UploadResult, UploadError> {
    let target = target::resolve(url, auth, defaults)?;
    let server = CurlFileServer::new(target, curl);
    tracing::debug!(url = %server.url(), "resolved file server target");
    upload_all(&server, file_or_dir, opts)
}
