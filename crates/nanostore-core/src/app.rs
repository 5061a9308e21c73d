//! The top-level container: both forms, the displayed content and the
//! liveness gate shared by them.

use std::sync::Arc;
use tokio::sync::watch;
use url::Url;

use crate::display::{DisplayHandle, DisplaySlot};
use crate::form::{DownloadForm, Notifier, Submission, UploadForm};
use crate::liveness::Liveness;
use crate::publish::PublishReceipt;

/// Workflow tabs. `Renew` is listed but not yet available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Download,
    Upload,
    Renew,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Download, Tab::Upload, Tab::Renew];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Download => "Download",
            Tab::Upload => "Upload",
            Tab::Renew => "Renew (coming soon)",
        }
    }

    pub fn is_enabled(self) -> bool {
        !matches!(self, Tab::Renew)
    }
}

pub struct App {
    download: DownloadForm,
    upload: UploadForm,
    display: DisplaySlot,
    liveness: watch::Receiver<Liveness>,
    notifier: Arc<dyn Notifier>,
}

impl App {
    pub fn new(
        download: DownloadForm,
        upload: UploadForm,
        liveness: watch::Receiver<Liveness>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            download,
            upload,
            display: DisplaySlot::new(),
            liveness,
            notifier,
        }
    }

    pub fn download_form(&self) -> &DownloadForm {
        &self.download
    }

    pub fn download_form_mut(&mut self) -> &mut DownloadForm {
        &mut self.download
    }

    pub fn upload_form(&self) -> &UploadForm {
        &self.upload
    }

    pub fn upload_form_mut(&mut self) -> &mut UploadForm {
        &mut self.upload
    }

    pub fn liveness(&self) -> Liveness {
        *self.liveness.borrow()
    }

    /// Whether the blocking "client not found" prompt is up.
    pub fn prompt_visible(&self) -> bool {
        self.liveness().prompt_visible()
    }

    /// Content currently on display, if any download has succeeded.
    pub fn displayed(&self) -> Option<&DisplayHandle> {
        self.display.current()
    }

    /// Submits the download form; on success the new content replaces what
    /// was displayed. Returns the display URL.
    pub async fn download(&mut self) -> Submission<Url> {
        if self.prompt_visible() {
            return Submission::Blocked;
        }
        match self.download.submit(self.notifier.as_ref()).await {
            Submission::Done(handle) => Submission::Done(self.display.install(handle).url().clone()),
            other => other.map(|h| h.url().clone()),
        }
    }

    pub async fn upload(&self) -> Submission<PublishReceipt> {
        if self.prompt_visible() {
            return Submission::Blocked;
        }
        self.upload.submit(self.notifier.as_ref()).await
    }
}
