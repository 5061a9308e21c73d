//! Overlay lookup followed by a plain GET from the advertised hosts.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::ContentResolver;
use crate::http::{self, TransportOptions};
use crate::media::OCTET_STREAM;
use crate::registry::ResolverEndpoint;
use crate::retrieve::{ContentRef, RetrievedPayload};
use crate::retry::run_with_retry;

#[derive(Serialize)]
struct LookupRequest<'a> {
    provider: &'a str,
    query: LookupQuery<'a>,
}

#[derive(Serialize)]
struct LookupQuery<'a> {
    #[serde(rename = "UHRPUrl")]
    uhrp_url: &'a str,
}

/// One entry of a lookup answer: a bare URL or an object carrying one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Candidate {
    Url(String),
    Hosted { url: String },
}

impl Candidate {
    fn into_url(self) -> String {
        match self {
            Candidate::Url(u) | Candidate::Hosted { url: u } => u,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HttpContentResolver {
    options: TransportOptions,
}

impl HttpContentResolver {
    pub fn new(options: TransportOptions) -> Self {
        Self { options }
    }

    /// Hosting URLs the resolver advertises for `locator`, in its order.
    pub fn lookup(&self, locator: &ContentRef, resolver: &ResolverEndpoint) -> Result<Vec<String>> {
        let url = http::join_endpoint(resolver.as_str(), "lookup")?;
        let body = serde_json::to_vec(&LookupRequest {
            provider: "UHRP",
            query: LookupQuery {
                uhrp_url: locator.as_str(),
            },
        })?;
        let resp = run_with_retry(&self.options.retry, || {
            http::post_json(url.as_str(), &body, &self.options)
        })
        .with_context(|| format!("lookup at {}", url))?;
        let candidates: Vec<Candidate> = resp.json().context("lookup response")?;
        Ok(candidates
            .into_iter()
            .map(Candidate::into_url)
            .filter(|u| !u.trim().is_empty())
            .collect())
    }
}

impl ContentResolver for HttpContentResolver {
    fn resolve(&self, locator: &ContentRef, resolver: &ResolverEndpoint) -> Result<RetrievedPayload> {
        let candidates = self.lookup(locator, resolver)?;
        if candidates.is_empty() {
            anyhow::bail!("no host advertises {}", locator);
        }

        let mut last_err = None;
        for candidate in &candidates {
            match run_with_retry(&self.options.retry, || http::get(candidate, &self.options)) {
                Ok(resp) => {
                    tracing::debug!(host = %candidate, bytes = resp.body.len(), "content fetched");
                    return Ok(RetrievedPayload {
                        media_type: resp
                            .content_type
                            .unwrap_or_else(|| OCTET_STREAM.to_string()),
                        data: resp.body,
                    });
                }
                Err(e) => {
                    tracing::debug!(host = %candidate, "candidate failed: {}", e);
                    last_err = Some(e);
                }
            }
        }

        let tried = candidates.len();
        match last_err {
            Some(e) => Err(anyhow::Error::new(e).context(format!("all {} advertised hosts failed", tried))),
            None => anyhow::bail!("no host advertises {}", locator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_request_wire_shape() {
        let body = serde_json::to_value(LookupRequest {
            provider: "UHRP",
            query: LookupQuery {
                uhrp_url: "uhrp://abc123",
            },
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"provider": "UHRP", "query": {"UHRPUrl": "uhrp://abc123"}})
        );
    }

    #[test]
    fn candidates_accept_strings_and_objects() {
        let parsed: Vec<Candidate> =
            serde_json::from_str(r#"["https://a/x", {"url": "https://b/y", "expiry": 5}]"#).unwrap();
        let urls: Vec<String> = parsed.into_iter().map(Candidate::into_url).collect();
        assert_eq!(urls, ["https://a/x", "https://b/y"]);
    }
}
