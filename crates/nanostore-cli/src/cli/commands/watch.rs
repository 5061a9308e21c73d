//! `nanostore watch` – run the liveness monitor in the foreground.

use anyhow::Result;
use nanostore_core::capability::HttpPresenceProbe;
use nanostore_core::config::NanostoreConfig;
use nanostore_core::liveness::{Liveness, LivenessMonitor};
use std::sync::Arc;

use super::CLIENT_MISSING;

fn describe(state: Liveness) -> &'static str {
    match state {
        Liveness::Unknown => "checking...",
        Liveness::Present => "MetaNet Client is running.",
        Liveness::Missing => CLIENT_MISSING,
    }
}

pub async fn run_watch(cfg: &NanostoreConfig) -> Result<()> {
    let probe = HttpPresenceProbe::new(&cfg.presence.url, cfg.presence.probe_timeout());
    let monitor = LivenessMonitor::start(Arc::new(probe), cfg.presence.interval());
    let mut rx = monitor.subscribe();
    println!(
        "Watching {} every {} ms (Ctrl-C to stop)",
        cfg.presence.url, cfg.presence.interval_ms
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = *rx.borrow_and_update();
                println!("{}", describe(state));
            }
        }
    }

    monitor.stop().await;
    Ok(())
}
