use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::client::CurlOptions;

/// Global configuration loaded from `~/.config/fsup/config.toml`.
///
/// Every field is a fallback: command-line arguments and the `FS_URL` /
/// `FS_AUTH` environment variables take precedence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FsupConfig {
    /// Default file server endpoint.
    #[serde(default)]
    pub url: Option<String>,
    /// File holding `user:password` on its first non-empty line.
    #[serde(default)]
    pub auth_file: Option<PathBuf>,
    /// Default extension filter (comma-separated list allowed).
    #[serde(default = "default_file_ext")]
    pub file_ext: String,
    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds (0 = no limit).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_file_ext() -> String {
    "log".to_string()
}

fn default_connect_timeout() -> u64 {
    15
}

fn default_timeout() -> u64 {
    300
}

impl Default for FsupConfig {
    fn default() -> Self {
        Self {
            url: None,
            auth_file: None,
            file_ext: default_file_ext(),
            connect_timeout_secs: default_connect_timeout(),
            timeout_secs: default_timeout(),
        }
    }
}

impl FsupConfig {
    /// HTTP client timeouts derived from this config.
    pub fn curl_options(&self) -> CurlOptions {
        CurlOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs)),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fsup")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FsupConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FsupConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: FsupConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
