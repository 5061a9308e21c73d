//! Minimal HTTP/1.1 server standing in for a resolver, its hosts and a storage host.
//!
//! Routes:
//! - `POST /lookup` -> JSON array of candidate URLs (`/missing` first, then `/content`).
//! - `GET /content` -> the configured body with the configured Content-Type.
//! - `POST /upload` -> upload ticket pointing at `PUT /put`.
//! - `PUT /put` -> stores the body, 200.
//! - `PUT /moved` -> 307 to `/put`.
//! - `GET /status` -> 200 (presence endpoint).
//! Anything else is 404.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ServerOptions {
    pub body: Vec<u8>,
    pub content_type: &'static str,
    /// If false, `/lookup` returns an empty array.
    pub advertise: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            body: b"hello".to_vec(),
            content_type: "text/plain",
            advertise: true,
        }
    }
}

/// Requests seen by the server, as (method, path, body).
pub type Log = Arc<Mutex<Vec<(String, String, Vec<u8>)>>>;

/// Starts the server in a background thread. Returns the base URL
/// (e.g. "http://127.0.0.1:12345") and the request log.
pub fn start(opts: ServerOptions) -> (String, Log) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let base = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let opts = Arc::new(opts);
    {
        let base = base.clone();
        let log = Arc::clone(&log);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let opts = Arc::clone(&opts);
                let log = Arc::clone(&log);
                let base = base.clone();
                thread::spawn(move || handle(stream, &base, &opts, &log));
            }
        });
    }
    (base, log)
}

/// A URL on which nothing listens (connection refused).
pub fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/status", port)
}

fn handle(mut stream: TcpStream, base: &str, opts: &ServerOptions, log: &Log) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let (method, path, body) = match read_request(&mut stream) {
        Some(r) => r,
        None => return,
    };
    log.lock()
        .unwrap()
        .push((method.clone(), path.clone(), body.clone()));

    let mut extra = String::new();
    let (status, content_type, payload): (&str, &str, Vec<u8>) = match (method.as_str(), path.as_str()) {
        ("POST", "/lookup") => {
            let json = if opts.advertise {
                format!(r#"["{base}/missing", {{"url": "{base}/content"}}]"#)
            } else {
                "[]".to_string()
            };
            ("200 OK", "application/json", json.into_bytes())
        }
        ("GET", "/content") => ("200 OK", opts.content_type, opts.body.clone()),
        ("POST", "/upload") => {
            let json = format!(
                r#"{{"uploadURL": "{base}/put", "publicURL": "{base}/cdn/1", "uhrpURL": "uhrp://uploaded"}}"#
            );
            ("200 OK", "application/json", json.into_bytes())
        }
        ("PUT", "/put") => ("200 OK", "text/plain", Vec::new()),
        ("PUT", "/moved") => {
            extra = format!("Location: {base}/put\r\n");
            ("307 Temporary Redirect", "text/plain", Vec::new())
        }
        ("GET", "/status") => ("200 OK", "application/json", b"{}".to_vec()),
        _ => ("404 Not Found", "text/plain", b"not found".to_vec()),
    };
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        status,
        content_type,
        payload.len(),
        extra
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&payload);
}

/// Reads request line, headers and a Content-Length body.
fn read_request(stream: &mut TcpStream) -> Option<(String, String, Vec<u8>)> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = std::str::from_utf8(&buf[..header_end]).ok()?.to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();
    let content_length = lines
        .filter_map(|l| l.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buf[header_end..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }
    body.truncate(content_length);
    Some((method, path, body))
}
