//! Blocking HTTP exchanges over libcurl.
//!
//! Every capability that talks to the network (resolver lookup, content GET,
//! upload ticket + PUT, presence probe) goes through [`request`]. Runs in the
//! current thread; call from `spawn_blocking` if used from async code.

mod parse;

use anyhow::Context;
use std::str;
use std::time::Duration;
use url::Url;

use crate::config::NanostoreConfig;
use crate::retry::{RetryPolicy, TransportError};

/// Per-capability transport settings.
#[derive(Debug, Clone, Copy)]
pub struct TransportOptions {
    pub connect_timeout: Duration,
    /// Whole-transfer limit. `None` leaves the transfer unbounded.
    pub timeout: Option<Duration>,
    pub retry: RetryPolicy,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: None,
            retry: RetryPolicy::single_attempt(),
        }
    }
}

impl TransportOptions {
    pub fn from_config(cfg: &NanostoreConfig) -> Self {
        Self {
            connect_timeout: cfg.connect_timeout(),
            timeout: None,
            retry: cfg.retry_policy(),
        }
    }
}

/// A 2xx response with its body fully buffered.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    /// `Content-Type` of the final response (after redirects), if any.
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Decode the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, TransportError> {
        serde_json::from_slice(&self.body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

pub(crate) enum Method<'a> {
    Get,
    PostJson(&'a [u8]),
    Put { body: &'a [u8], content_type: &'a str },
}

pub fn get(url: &str, opts: &TransportOptions) -> Result<HttpResponse, TransportError> {
    request(url, Method::Get, opts)
}

pub fn post_json(url: &str, body: &[u8], opts: &TransportOptions) -> Result<HttpResponse, TransportError> {
    request(url, Method::PostJson(body), opts)
}

pub fn put(
    url: &str,
    body: &[u8],
    content_type: &str,
    opts: &TransportOptions,
) -> Result<HttpResponse, TransportError> {
    request(url, Method::Put { body, content_type }, opts)
}

pub(crate) fn request(
    url: &str,
    method: Method<'_>,
    opts: &TransportOptions,
) -> Result<HttpResponse, TransportError> {
    let mut header_lines: Vec<String> = Vec::new();
    let mut body: Vec<u8> = Vec::new();
    let mut upload: &[u8] = &[];

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(opts.connect_timeout)?;
    if let Some(t) = opts.timeout {
        easy.timeout(t)?;
    }

    let mut list = curl::easy::List::new();
    match method {
        Method::Get => easy.get(true)?,
        Method::PostJson(payload) => {
            easy.post(true)?;
            easy.post_fields_copy(payload)?;
            list.append("Content-Type: application/json")?;
            list.append("Expect:")?;
            easy.http_headers(list)?;
        }
        Method::Put { body: payload, content_type } => {
            // The body is streamed once; a redirect would need a rewind.
            easy.follow_location(false)?;
            easy.upload(true)?;
            easy.in_filesize(payload.len() as u64)?;
            list.append(&format!("Content-Type: {}", content_type))?;
            list.append("Expect:")?;
            easy.http_headers(list)?;
            upload = payload;
        }
    }

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                header_lines.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.read_function(|buf| {
            let n = buf.len().min(upload.len());
            buf[..n].copy_from_slice(&upload[..n]);
            upload = &upload[n..];
            Ok(n)
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    if !(200..300).contains(&status) {
        return Err(TransportError::Http(status));
    }

    Ok(HttpResponse {
        status,
        content_type: parse::content_type(&header_lines),
        body,
    })
}

/// Joins `segment` under an endpoint's path, treating the endpoint as a directory
/// (`http://host:3002/api` + `lookup` = `http://host:3002/api/lookup`).
pub fn join_endpoint(base: &str, segment: &str) -> anyhow::Result<Url> {
    let mut url =
        Url::parse(base.trim()).with_context(|| format!("invalid endpoint URL: {}", base))?;
    if !url.path().ends_with('/') {
        let dir = format!("{}/", url.path());
        url.set_path(&dir);
    }
    url.join(segment)
        .with_context(|| format!("cannot join {} onto {}", segment, base))
}
