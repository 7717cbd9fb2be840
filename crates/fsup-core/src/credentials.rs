//! Basic-auth credentials for the file server.
//!
//! The textual form is `user:password`, split at the first `:` so passwords
//! may themselves contain colons. The same form is used on the command line,
//! in `FS_AUTH`, and as the first non-empty line of an auth file.

use crate::error::UploadError;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Username/password pair sent as HTTP basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Reads credentials from an auth file.
    pub fn from_file(path: &Path) -> Result<Self, UploadError> {
        read_auth_file(path)?.parse()
    }
}

/// Parses `user:password`. Surrounding whitespace is trimmed from the
/// username only; the password is kept byte for byte, so `"u:p "` yields the
/// password `"p "`. Auth file lines are already trimmed by [`read_auth_file`].
impl FromStr for Credentials {
    type Err = UploadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (user, pass) = s.split_once(':').ok_or_else(|| {
            UploadError::Config("credentials must have the form user:password".to_string())
        })?;
        let user = user.trim();
        if user.is_empty() {
            return Err(UploadError::Config(
                "credentials have an empty username".to_string(),
            ));
        }
        Ok(Credentials::new(user, pass))
    }
}

/// Returns the first non-empty line of an auth file, trimmed, unparsed.
pub fn read_auth_file(path: &Path) -> Result<String, UploadError> {
    let data = fs::read_to_string(path).map_err(|e| UploadError::file_access(path, e))?;
    data.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
        .ok_or_else(|| UploadError::Config(format!("auth file {} is empty", path.display())))
}

// Keep the password out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
