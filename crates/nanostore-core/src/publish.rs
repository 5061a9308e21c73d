//! Publish: hand a local file to a storage host for a retention period.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use crate::capability::StoragePublisher;
use crate::input::InputError;
use crate::media::media_type_for_path;
use crate::registry::ResolverEndpoint;

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub data: Vec<u8>,
}

impl SelectedFile {
    /// Reads `path` fully; the media type is guessed from its extension.
    pub fn read(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.bin".to_string());
        Ok(Self {
            name,
            media_type: media_type_for_path(path).to_string(),
            data,
        })
    }
}

/// One upload: a non-empty file and a positive retention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    file: SelectedFile,
    retention_minutes: u64,
}

impl PublishRequest {
    pub fn new(file: SelectedFile, retention_minutes: u64) -> Result<Self, InputError> {
        if file.data.is_empty() {
            return Err(InputError::EmptyFile);
        }
        if retention_minutes == 0 {
            return Err(InputError::ZeroRetention);
        }
        Ok(Self {
            file,
            retention_minutes,
        })
    }

    pub fn file(&self) -> &SelectedFile {
        &self.file
    }

    pub fn retention_minutes(&self) -> u64 {
        self.retention_minutes
    }
}

/// What the storage host gave back for a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    /// HTTP URL the content is served from.
    pub public_url: String,
    /// Content locator, when the host reports one.
    pub uhrp_url: Option<String>,
    pub size: u64,
    /// Lowercase hex SHA-256 of the bytes sent.
    pub sha256: String,
}

impl PublishReceipt {
    /// The locator to hand to other users: the UHRP URL if known, else the public URL.
    pub fn locator(&self) -> &str {
        self.uhrp_url.as_deref().unwrap_or(&self.public_url)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("An error occurred during upload")]
pub struct PublishError(#[source] anyhow::Error);

impl PublishError {
    pub fn cause(&self) -> &anyhow::Error {
        &self.0
    }
}

/// Publishes `request` to `endpoint`. One attempt per call, no timeout of its own.
pub async fn publish(
    capability: &Arc<dyn StoragePublisher>,
    request: PublishRequest,
    endpoint: &ResolverEndpoint,
) -> Result<PublishReceipt, PublishError> {
    let name = request.file().name.clone();
    tracing::debug!(
        file = %name,
        bytes = request.file().data.len(),
        retention_minutes = request.retention_minutes(),
        host = %endpoint,
        "publishing file"
    );

    let result = tokio::task::spawn_blocking({
        let capability = Arc::clone(capability);
        let endpoint = endpoint.clone();
        move || {
            capability
                .publish(&request, &endpoint)
                .with_context(|| format!("publish via {}", endpoint))
        }
    })
    .await
    .context("publish task join")
    .and_then(|r| r);

    match result {
        Ok(receipt) => {
            tracing::info!(file = %name, locator = receipt.locator(), "file published");
            Ok(receipt)
        }
        Err(e) => {
            tracing::warn!(file = %name, "publish failed: {:#}", e);
            Err(PublishError(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn file(data: &[u8]) -> SelectedFile {
        SelectedFile {
            name: "a.txt".to_string(),
            media_type: "text/plain".to_string(),
            data: data.to_vec(),
        }
    }

    #[test]
    fn request_requires_bytes_and_retention() {
        assert_eq!(PublishRequest::new(file(b""), 60), Err(InputError::EmptyFile));
        assert_eq!(PublishRequest::new(file(b"x"), 0), Err(InputError::ZeroRetention));
        let req = PublishRequest::new(file(b"x"), 60).unwrap();
        assert_eq!(req.retention_minutes(), 60);
    }

    #[test]
    fn selected_file_reads_name_and_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"png bytes").unwrap();
        let sel = SelectedFile::read(&path).unwrap();
        assert_eq!(sel.name, "photo.png");
        assert_eq!(sel.media_type, "image/png");
        assert_eq!(sel.data, b"png bytes");
    }

    #[test]
    fn receipt_prefers_uhrp_locator() {
        let mut r = PublishReceipt {
            public_url: "https://host/cdn/x".to_string(),
            uhrp_url: None,
            size: 1,
            sha256: String::new(),
        };
        assert_eq!(r.locator(), "https://host/cdn/x");
        r.uhrp_url = Some("uhrp://x".to_string());
        assert_eq!(r.locator(), "uhrp://x");
    }
}
