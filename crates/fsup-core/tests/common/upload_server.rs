//! Minimal HTTP/1.1 server that accepts multipart uploads for integration tests.
//!
//! Records every request (method, headers, body) and answers with a `file`
//! header naming a location, unless told to fail or omit it.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct UploadServerOptions {
    /// Zero-based request index answered with `fail_status` instead of 200.
    pub fail_at: Option<usize>,
    pub fail_status: u16,
    /// If false, successful responses omit the `file` header.
    pub send_location: bool,
}

impl Default for UploadServerOptions {
    fn default() -> Self {
        Self {
            fail_at: None,
            fail_status: 500,
            send_location: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// Location returned in the `file` header, if any.
    pub location: Option<String>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body_contains(&self, needle: &[u8]) -> bool {
        self.body.windows(needle.len()).any(|w| w == needle)
    }
}

pub struct UploadServer {
    pub url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl UploadServer {
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start() -> UploadServer {
    start_with_options(UploadServerOptions::default())
}

pub fn start_with_options(opts: UploadServerOptions) -> UploadServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);
    thread::spawn(move || {
        // Connections are handled in order: the client uploads one file at a time.
        for stream in listener.incoming().flatten() {
            handle(stream, &recorded, opts);
        }
    });
    UploadServer {
        url: format!("http://127.0.0.1:{}/FileServer/upload", port),
        requests,
    }
}

fn handle(mut stream: TcpStream, recorded: &Mutex<Vec<CapturedRequest>>, opts: UploadServerOptions) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));

    let mut data = Vec::new();
    let mut buf = [0u8; 8192];
    let header_end = loop {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => data.extend_from_slice(&buf[..n]),
        }
        if let Some(pos) = find(&data, b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&data[..header_end]).into_owned();
    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or("");
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let path = parts.next().unwrap_or("").to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = data[header_end + 4..].to_vec();
    while body.len() < content_length {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => body.extend_from_slice(&buf[..n]),
        }
    }

    let mut requests = recorded.lock().unwrap();
    let index = requests.len();
    let subdir = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("subdir"))
        .map(|(_, v)| v.clone())
        .unwrap_or_default();

    let (status, location) = if opts.fail_at == Some(index) {
        (format!("{} Error", opts.fail_status), None)
    } else if opts.send_location {
        ("200 OK".to_string(), Some(format!("/data/{}upload_{}", subdir, index)))
    } else {
        ("200 OK".to_string(), None)
    };

    requests.push(CapturedRequest {
        method,
        path,
        headers,
        body,
        location: location.clone(),
    });
    drop(requests);

    let location_header = location
        .map(|l| format!("file: {}\r\n", l))
        .unwrap_or_default();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: 0\r\nConnection: close\r\n{}\r\n",
        status, location_header
    );
    let _ = stream.write_all(response.as_bytes());
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
