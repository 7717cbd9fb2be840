//! HTTP transport to the file server.
//!
//! Uses the curl crate (libcurl) to POST one file per request as
//! `multipart/form-data` with basic authentication, and reads the
//! server-assigned location from the `file` response header.

mod response;

use crate::credentials::Credentials;
use crate::error::UploadError;
use crate::target::ServerTarget;
use std::fs::File;
use std::path::Path;
use std::time::Duration;

/// Name of the optional request header telling the server where to store the file.
pub const SUBDIR_HEADER: &str = "subDir";
/// Name of the multipart part carrying the file bytes.
pub const FILE_PART: &str = "file";

/// Response body bytes kept for the error log on a failed upload.
const BODY_SNIPPET: usize = 512;

/// Header line for libcurl's list. `Name:` with no value would remove the
/// header, so an empty value uses the `Name;` form, which libcurl sends as `Name:`.
fn subdir_header_line(dir: &str) -> String {
    if dir.is_empty() {
        format!("{};", SUBDIR_HEADER)
    } else {
        format!("{}: {}", SUBDIR_HEADER, dir)
    }
}

/// One raw header line from libcurl. Invalid UTF-8 is replaced rather than
/// dropped so a mangled `file` header still shows up in the logs.
fn header_line(data: &[u8]) -> String {
    String::from_utf8_lossy(data).trim_end().to_string()
}

/// Timeouts applied to each upload request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurlOptions {
    pub connect_timeout: Duration,
    /// Whole-request limit; `None` lets large uploads run as long as they need.
    pub timeout: Option<Duration>,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Some(Duration::from_secs(300)),
        }
    }
}

/// Something that stores one local file and reports where it went.
pub trait FileServer {
    /// Uploads `path`; `subdir` is sent as the `subDir` header when `Some`
    /// (already normalized, may be empty). Returns the server-assigned location.
    fn upload_file(&self, path: &Path, subdir: Option<&str>) -> Result<String, UploadError>;
}

/// libcurl-backed file server client.
#[derive(Debug, Clone)]
pub struct CurlFileServer {
    url: String,
    credentials: Credentials,
    options: CurlOptions,
}

impl CurlFileServer {
    pub fn new(target: ServerTarget, options: CurlOptions) -> Self {
        Self {
            url: target.url,
            credentials: target.credentials,
            options,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl FileServer for CurlFileServer {
    fn upload_file(&self, path: &Path, subdir: Option<&str>) -> Result<String, UploadError> {
        // Surface unreadable files as FileAccess rather than a libcurl read error.
        drop(File::open(path).map_err(|e| UploadError::file_access(path, e))?);

        let transport = |source: curl::Error| UploadError::Transport {
            file: path.to_path_buf(),
            source,
        };

        let mut easy = curl::easy::Easy::new();
        easy.url(&self.url).map_err(transport)?;
        easy.connect_timeout(self.options.connect_timeout)
            .map_err(transport)?;
        if let Some(t) = self.options.timeout {
            easy.timeout(t).map_err(transport)?;
        }

        let mut auth = curl::easy::Auth::new();
        auth.basic(true);
        easy.http_auth(&auth).map_err(transport)?;
        easy.username(&self.credentials.username)
            .map_err(transport)?;
        easy.password(&self.credentials.password)
            .map_err(transport)?;

        // Empty `Expect:` stops libcurl from waiting on `100 Continue` for large bodies.
        let mut list = curl::easy::List::new();
        list.append("Expect:").map_err(transport)?;
        if let Some(dir) = subdir {
            list.append(&subdir_header_line(dir)).map_err(transport)?;
        }
        easy.http_headers(list).map_err(transport)?;

        let mut form = curl::easy::Form::new();
        form.part(FILE_PART).file(path).add().map_err(|e| {
            UploadError::file_access(
                path,
                std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
            )
        })?;
        easy.httppost(form).map_err(transport)?;

        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer
                .header_function(|data| {
                    header_lines.push(header_line(data));
                    true
                })
                .map_err(transport)?;
            transfer
                .write_function(|data| {
                    let room = BODY_SNIPPET.saturating_sub(body.len());
                    body.extend_from_slice(&data[..data.len().min(room)]);
                    Ok(data.len())
                })
                .map_err(transport)?;
            transfer.perform().map_err(transport)?;
        }

        let code = easy.response_code().map_err(transport)?;
        let head = response::parse_head(&header_lines);
        tracing::debug!(file = %path.display(), status = ?head.status, "file server responded");
        if !(200..300).contains(&code) {
            tracing::warn!(
                file = %path.display(),
                status = code,
                body = %String::from_utf8_lossy(&body),
                "file server rejected upload"
            );
            return Err(UploadError::Http {
                status: code,
                file: path.to_path_buf(),
            });
        }

        head.location()
            .map(str::to_string)
            .ok_or_else(|| UploadError::MissingLocationHeader {
                file: path.to_path_buf(),
            })
    }
}
