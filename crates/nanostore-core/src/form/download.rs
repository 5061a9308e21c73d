use std::sync::Arc;

use super::{InFlight, Notifier, Submission};
use crate::capability::ContentResolver;
use crate::display::DisplayHandle;
use crate::registry::ResolverRegistry;
use crate::retrieve::{retrieve, ContentRef};

/// Locator input plus resolver choice, submitting to a [`ContentResolver`].
pub struct DownloadForm {
    registry: ResolverRegistry,
    locator: String,
    loading: InFlight,
    capability: Arc<dyn ContentResolver>,
}

impl DownloadForm {
    pub fn new(registry: ResolverRegistry, capability: Arc<dyn ContentResolver>) -> Self {
        Self {
            registry,
            locator: String::new(),
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

    pub fn locator(&self) -> &str {
        &self.locator
    }

    pub fn set_locator(&mut self, locator: impl Into<String>) {
        self.locator = locator.into();
    }

    pub fn inputs_valid(&self) -> bool {
        !self.locator.trim().is_empty() && !self.registry.active().as_str().is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_busy()
    }

    /// Whether the download action is enabled.
    pub fn can_submit(&self) -> bool {
        self.inputs_valid() && !self.is_loading()
    }

    /// Retrieves the entered locator through the active resolver.
    pub async fn submit(&self, notifier: &dyn Notifier) -> Submission<DisplayHandle> {
        let content_ref = match ContentRef::parse(&self.locator) {
            Ok(c) => c,
            Err(_) => return Submission::Disabled,
        };
        let _loading = match self.loading.try_begin() {
            Some(guard) => guard,
            None => return Submission::Busy,
        };
        let endpoint = self.registry.active().clone();

        match retrieve(&self.capability, &content_ref, &endpoint).await {
            Ok(handle) => Submission::Done(handle),
            Err(e) => {
                notifier.error(&e.to_string());
                Submission::Failed
            }
        }
    }
}
