//! Resolution of the file server URL and credentials.
//!
//! Precedence for each value: explicit argument, then environment
//! (`FS_URL`, `FS_AUTH`), then the config file. The environment is read only
//! by [`EnvDefaults::from_process`]; everything else takes explicit values.

use crate::config::FsupConfig;
use crate::credentials::Credentials;
use crate::error::UploadError;
use std::path::PathBuf;

/// Environment variable holding the default file server URL.
pub const URL_ENV: &str = "FS_URL";
/// Environment variable holding default credentials as `user:password`.
pub const AUTH_ENV: &str = "FS_AUTH";

/// Fallback values used when the caller does not pass a URL or credentials.
#[derive(Debug, Clone, Default)]
pub struct EnvDefaults {
    pub url: Option<String>,
    pub auth: Option<String>,
    pub auth_file: Option<PathBuf>,
    pub config_url: Option<String>,
}

impl EnvDefaults {
    /// Reads `FS_URL` and `FS_AUTH` from the process environment. Empty values count as unset.
    pub fn from_process() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            url: read(URL_ENV),
            auth: read(AUTH_ENV),
            ..Self::default()
        }
    }

    /// Adds the config file's `url` and `auth_file` as the last fallback.
    pub fn with_config(mut self, cfg: &FsupConfig) -> Self {
        self.config_url = cfg.url.clone();
        self.auth_file = cfg.auth_file.clone();
        self
    }
}

/// Fully resolved endpoint and credentials for one upload run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerTarget {
    pub url: String,
    pub credentials: Credentials,
}

/// Picks the server URL and validates it as an absolute http(s) URL.
pub fn resolve_url(explicit: Option<&str>, defaults: &EnvDefaults) -> Result<String, UploadError> {
    let raw = explicit
        .map(str::to_string)
        .or_else(|| defaults.url.clone())
        .or_else(|| defaults.config_url.clone())
        .ok_or_else(|| {
            UploadError::Config(format!(
                "no file server URL given; pass --url or set {URL_ENV}"
            ))
        })?;
    let raw = raw.trim().to_string();
    let parsed = url::Url::parse(&raw)
        .map_err(|e| UploadError::Config(format!("invalid file server URL {raw:?}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(raw),
        other => Err(UploadError::Config(format!(
            "file server URL must be http or https, got {other}"
        ))),
    }
}

/// Picks credentials: explicit string, then `FS_AUTH`, then the configured auth file.
pub fn resolve_credentials(
    explicit: Option<&str>,
    defaults: &EnvDefaults,
) -> Result<Credentials, UploadError> {
    if let Some(s) = explicit {
        return s.parse();
    }
    if let Some(s) = &defaults.auth {
        return s.parse();
    }
    if let Some(path) = &defaults.auth_file {
        return Credentials::from_file(path);
    }
    Err(UploadError::Config(format!(
        "no file server credentials given; pass --auth or set {AUTH_ENV}"
    )))
}

/// Resolves both halves of the target. Fails before any upload is attempted.
pub fn resolve(
    url: Option<&str>,
    auth: Option<&str>,
    defaults: &EnvDefaults,
) -> Result<ServerTarget, UploadError> {
    let url = resolve_url(url, defaults)?;
    let credentials = resolve_credentials(auth, defaults)?;
    tracing::debug!(url = %url, username = %credentials.username, "resolved file server target");
    Ok(ServerTarget { url, credentials })
}
