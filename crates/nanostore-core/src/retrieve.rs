//! Retrieval: map a content locator plus resolver endpoint to a display handle.
//!
//! One attempt per call. No timeout or cancellation is imposed here; the
//! capability decides how long resolution takes.

use anyhow::Context;
use std::fmt;
use std::sync::Arc;

use crate::capability::ContentResolver;
use crate::display::DisplayHandle;
use crate::input::{non_empty, InputError};
use crate::registry::ResolverEndpoint;

/// User-supplied content locator (e.g. `uhrp://...`). Only non-emptiness is
/// checked here; whether it names real content is the resolver's call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentRef(String);

impl ContentRef {
    pub fn parse(input: &str) -> Result<Self, InputError> {
        non_empty(input, InputError::EmptyLocator).map(ContentRef)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bytes and declared media type returned by a resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievedPayload {
    pub media_type: String,
    pub data: Vec<u8>,
}

/// Any retrieval failure. The user sees one generic message; the cause is kept for logs.
#[derive(Debug, thiserror::Error)]
#[error("An error occurred during download")]
pub struct RetrievalError(#[source] anyhow::Error);

impl RetrievalError {
    pub fn cause(&self) -> &anyhow::Error {
        &self.0
    }
}

/// Resolves `content_ref` through `endpoint` and wraps the bytes in a display handle.
pub async fn retrieve(
    capability: &Arc<dyn ContentResolver>,
    content_ref: &ContentRef,
    endpoint: &ResolverEndpoint,
) -> Result<DisplayHandle, RetrievalError> {
    tracing::debug!(locator = %content_ref, resolver = %endpoint, "retrieving content");

    let result = tokio::task::spawn_blocking({
        let capability = Arc::clone(capability);
        let content_ref = content_ref.clone();
        let endpoint = endpoint.clone();
        move || -> anyhow::Result<DisplayHandle> {
            let payload = capability
                .resolve(&content_ref, &endpoint)
                .with_context(|| format!("resolve {} via {}", content_ref, endpoint))?;
            DisplayHandle::create(payload)
        }
    })
    .await
    .context("retrieval task join")
    .and_then(|r| r);

    match result {
        Ok(handle) => {
            tracing::info!(
                locator = %content_ref,
                bytes = handle.len(),
                media_type = handle.media_type(),
                "content retrieved"
            );
            Ok(handle)
        }
        Err(e) => {
            tracing::warn!(locator = %content_ref, "retrieval failed: {:#}", e);
            Err(RetrievalError(e))
        }
    }
}
