//! Parse HTTP response header lines collected by libcurl.

/// Name of the response header carrying the server-assigned location.
pub(crate) const LOCATION_HEADER: &str = "file";

/// Status and headers of the final response (interim `1xx` blocks dropped).
#[derive(Debug, Clone, Default)]
pub(crate) struct ResponseHead {
    pub status: Option<u32>,
    pub headers: Vec<(String, String)>,
}

impl ResponseHead {
    /// First header named `name` (case-insensitive), trimmed.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Location reported by the file server; an empty value counts as absent.
    pub fn location(&self) -> Option<&str> {
        self.header(LOCATION_HEADER).filter(|v| !v.is_empty())
    }
}

/// Parse collected header lines. Each `HTTP/` status line starts a new block,
/// so only the last response (after any `100 Continue` or redirect) is kept.
pub(crate) fn parse_head(lines: &[String]) -> ResponseHead {
    let mut head = ResponseHead::default();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            head = ResponseHead {
                status: line
                    .split_whitespace()
                    .nth(1)
                    .and_then(|c| c.parse::<u32>().ok()),
                headers: Vec::new(),
            };
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            head.headers
                .push((name.trim().to_string(), value.trim().to_string()));
        }
    }
    head
}
