//! Two-step upload: ask the host for an upload ticket, then PUT the bytes.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::StoragePublisher;
use crate::checksum::sha256_bytes;
use crate::http::{self, TransportOptions};
use crate::publish::{PublishReceipt, PublishRequest};
use crate::registry::ResolverEndpoint;
use crate::retry::run_with_retry;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TicketRequest {
    file_size: u64,
    retention_period: u64,
}

#[derive(Debug, Deserialize)]
struct UploadTicket {
    #[serde(rename = "uploadURL")]
    upload_url: String,
    #[serde(rename = "publicURL")]
    public_url: String,
    #[serde(rename = "uhrpURL", default)]
    uhrp_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct HttpStoragePublisher {
    options: TransportOptions,
}

impl HttpStoragePublisher {
    pub fn new(options: TransportOptions) -> Self {
        Self { options }
    }
}

impl StoragePublisher for HttpStoragePublisher {
    fn publish(&self, request: &PublishRequest, endpoint: &ResolverEndpoint) -> Result<PublishReceipt> {
        let file = request.file();
        let size = file.data.len() as u64;

        let url = http::join_endpoint(endpoint.as_str(), "upload")?;
        let body = serde_json::to_vec(&TicketRequest {
            file_size: size,
            retention_period: request.retention_minutes(),
        })?;
        let ticket: UploadTicket = run_with_retry(&self.options.retry, || {
            http::post_json(url.as_str(), &body, &self.options)?.json()
        })
        .with_context(|| format!("upload ticket from {}", url))?;

        run_with_retry(&self.options.retry, || {
            http::put(&ticket.upload_url, &file.data, &file.media_type, &self.options)
        })
        .with_context(|| format!("PUT {}", ticket.upload_url))?;

        Ok(PublishReceipt {
            public_url: ticket.public_url,
            uhrp_url: ticket.uhrp_url.filter(|u| !u.trim().is_empty()),
            size,
            sha256: sha256_bytes(&file.data),
        })
    }
}
