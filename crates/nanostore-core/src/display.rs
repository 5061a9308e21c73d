//! Display handles: retrieved bytes made locally addressable.
//!
//! A [`DisplayHandle`] owns a temporary file holding the payload and exposes a
//! `file://` URL a renderer can load. Dropping the handle deletes the file.
//! [`DisplaySlot`] owns at most one handle and releases the old one on install.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use url::Url;

use crate::media::extension_for_media_type;
use crate::retrieve::RetrievedPayload;

#[derive(Debug)]
pub struct DisplayHandle {
    file: NamedTempFile,
    media_type: String,
    len: u64,
    url: Url,
}

impl DisplayHandle {
    /// Writes `payload` to a fresh temp file named after its media type.
    pub fn create(payload: RetrievedPayload) -> Result<Self> {
        let suffix = format!(".{}", extension_for_media_type(&payload.media_type));
        let mut file = tempfile::Builder::new()
            .prefix("nanostore-")
            .suffix(&suffix)
            .tempfile()
            .context("create display file")?;
        file.write_all(&payload.data).context("write display file")?;
        file.flush().context("flush display file")?;

        let url = Url::from_file_path(file.path())
            .map_err(|_| anyhow::anyhow!("display path is not absolute: {}", file.path().display()))?;

        Ok(Self {
            file,
            media_type: payload.media_type,
            len: payload.data.len() as u64,
            url,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        fs::read(self.path()).with_context(|| format!("read {}", self.path().display()))
    }

    /// Copies the payload out of the handle. A directory `dest` gets
    /// `download.<ext>` inside it. Returns the written path.
    pub fn save_to(&self, dest: &Path) -> Result<PathBuf> {
        let target = if dest.is_dir() {
            dest.join(format!("download.{}", extension_for_media_type(&self.media_type)))
        } else {
            dest.to_path_buf()
        };
        fs::copy(self.path(), &target)
            .with_context(|| format!("copy display file to {}", target.display()))?;
        Ok(target)
    }
}

/// Holds the handle currently on display.
#[derive(Debug, Default)]
pub struct DisplaySlot {
    current: Option<DisplayHandle>,
}

impl DisplaySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Releases the previous handle, then keeps `handle` as the current one.
    pub fn install(&mut self, handle: DisplayHandle) -> &DisplayHandle {
        if let Some(prev) = self.current.take() {
            tracing::debug!(url = %prev.url(), "releasing superseded display handle");
            drop(prev);
        }
        self.current.insert(handle)
    }

    pub fn current(&self) -> Option<&DisplayHandle> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
