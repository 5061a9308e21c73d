use std::sync::Arc;

use super::{InFlight, Notifier, Submission};
use crate::capability::StoragePublisher;
use crate::publish::{publish, PublishReceipt, PublishRequest, SelectedFile};
use crate::registry::ResolverRegistry;

/// File picker, retention input and host choice, submitting to a [`StoragePublisher`].
pub struct UploadForm {
    registry: ResolverRegistry,
    file: Option<SelectedFile>,
    retention_minutes: u64,
    loading: InFlight,
    capability: Arc<dyn StoragePublisher>,
}

impl UploadForm {
    pub fn new(
        registry: ResolverRegistry,
        retention_minutes: u64,
        capability: Arc<dyn StoragePublisher>,
    ) -> Self {
        Self {
            registry,
            file: None,
            retention_minutes,
            loading: InFlight::new(),
            capability,
        }
    }

    pub fn registry(&self) -> &ResolverRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ResolverRegistry {
        &mut self.registry
    }

    pub fn set_file(&mut self, file: SelectedFile) {
        self.file = Some(file);
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn set_retention_minutes(&mut self, minutes: u64) {
        self.retention_minutes = minutes;
    }

    pub fn retention_minutes(&self) -> u64 {
        self.retention_minutes
    }

    pub fn inputs_valid(&self) -> bool {
        self.file.as_ref().is_some_and(|f| !f.data.is_empty())
            && self.retention_minutes > 0
            && !self.registry.active().as_str().is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_busy()
    }

    /// Whether the upload action is enabled.
    pub fn can_submit(&self) -> bool {
        self.inputs_valid() && !self.is_loading()
    }

    /// Publishes the selected file to the active host.
    pub async fn submit(&self, notifier: &dyn Notifier) -> Submission<PublishReceipt> {
        let request = match self
            .file
            .clone()
            .ok_or(crate::input::InputError::EmptyFile)
            .and_then(|f| PublishRequest::new(f, self.retention_minutes))
        {
            Ok(r) => r,
            Err(_) => return Submission::Disabled,
        };
        let _loading = match self.loading.try_begin() {
            Some(guard) => guard,
            None => return Submission::Busy,
        };
        let endpoint = self.registry.active().clone();

        match publish(&self.capability, request, &endpoint).await {
            Ok(receipt) => {
                notifier.success(&format!("File uploaded: {}", receipt.locator()));
                Submission::Done(receipt)
            }
            Err(e) => {
                notifier.error(&e.to_string());
                Submission::Failed
            }
        }
    }
}
