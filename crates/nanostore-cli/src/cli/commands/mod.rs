//! CLI command handlers, one per file, plus the session setup they share.

mod download;
mod renew;
mod resolvers;
mod upload;
mod watch;

pub use download::{run_download, DownloadArgs};
pub use renew::run_renew;
pub use resolvers::run_resolvers;
pub use upload::{run_upload, UploadArgs};
pub use watch::run_watch;

use anyhow::{anyhow, Result};
use nanostore_core::app::App;
use nanostore_core::capability::{HttpContentResolver, HttpPresenceProbe, HttpStoragePublisher};
use nanostore_core::config::NanostoreConfig;
use nanostore_core::form::{DownloadForm, Submission, UploadForm};
use nanostore_core::http::TransportOptions;
use nanostore_core::liveness::{Liveness, LivenessMonitor};
use nanostore_core::registry::{AddOutcome, ResolverRegistry};
use std::sync::Arc;

use super::notify::ConsoleNotifier;

pub(crate) const CLIENT_MISSING: &str =
    "MetaNet Client not found. Start the MetaNet Client and try again.";

/// The app plus the liveness monitor feeding it.
pub(crate) struct Session {
    pub(crate) app: App,
    monitor: Option<LivenessMonitor>,
}

impl Session {
    pub(crate) async fn close(self) {
        if let Some(monitor) = self.monitor {
            monitor.stop().await;
        }
    }
}

/// Builds both forms from config and, unless skipped, waits for the first
/// presence check. Fails if the local client is missing.
pub(crate) async fn open_session(cfg: &NanostoreConfig, skip_presence_check: bool) -> Result<Session> {
    let options = TransportOptions::from_config(cfg);
    let download = DownloadForm::new(
        ResolverRegistry::new(&cfg.resolvers)?,
        Arc::new(HttpContentResolver::new(options)),
    );
    let upload = UploadForm::new(
        ResolverRegistry::new(&cfg.publishers)?,
        cfg.default_retention_minutes,
        Arc::new(HttpStoragePublisher::new(options)),
    );

    let (liveness, monitor) = if skip_presence_check {
        let (_tx, rx) = tokio::sync::watch::channel(Liveness::Present);
        (rx, None)
    } else {
        let probe = HttpPresenceProbe::new(&cfg.presence.url, cfg.presence.probe_timeout());
        let monitor = LivenessMonitor::start(Arc::new(probe), cfg.presence.interval());
        monitor.first_check().await;
        (monitor.subscribe(), Some(monitor))
    };

    let session = Session {
        app: App::new(download, upload, liveness, Arc::new(ConsoleNotifier)),
        monitor,
    };
    if session.app.prompt_visible() {
        session.close().await;
        return Err(anyhow!(CLIENT_MISSING));
    }
    Ok(session)
}

/// Selects `endpoint`, adding it to the registry first if it is new.
pub(crate) fn choose_endpoint(registry: &mut ResolverRegistry, endpoint: &str) -> Result<()> {
    match registry.add(endpoint) {
        AddOutcome::Added => tracing::info!("using new endpoint {}", registry.active()),
        AddOutcome::Duplicate => registry.select(endpoint)?,
        AddOutcome::Empty => anyhow::bail!("endpoint must not be empty"),
    }
    Ok(())
}

/// Error for a submission that did not complete. `Failed` has already been
/// reported through the notifier, so its message is short.
pub(crate) fn incomplete<T>(outcome: &Submission<T>, action: &str) -> anyhow::Error {
    match outcome {
        Submission::Disabled => anyhow!("{action}: required input is missing"),
        Submission::Busy => anyhow!("{action}: already in progress"),
        Submission::Blocked => anyhow!(CLIENT_MISSING),
        Submission::Failed | Submission::Done(_) => anyhow!("{action} failed"),
    }
}
