//! Error taxonomy for an upload run.

use std::path::PathBuf;

/// Error returned by any step of an upload run. The first error aborts the
/// whole run; nothing uploaded so far is returned alongside it.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// Server URL or credentials could not be resolved, or were invalid.
    #[error("configuration: {0}")]
    Config(String),
    /// Server answered with a non-2xx status.
    #[error("upload of {} failed: HTTP {status}", .file.display())]
    Http { status: u32, file: PathBuf },
    /// Server answered 2xx but did not say where it stored the file.
    #[error("upload of {} succeeded but the response has no `file` header", .file.display())]
    MissingLocationHeader { file: PathBuf },
    /// Source path could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// libcurl failed before a response status was available (connect, timeout, ...).
    #[error("transfer of {} failed: {source}", .file.display())]
    Transport {
        file: PathBuf,
        #[source]
        source: curl::Error,
    },
}

impl UploadError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        UploadError::FileAccess {
            path: path.into(),
            source,
        }
    }
}
