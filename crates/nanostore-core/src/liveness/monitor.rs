//! Background task polling a [`PresenceCheck`] on a fixed interval.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

use super::Liveness;
use crate::capability::PresenceCheck;

/// Handle to a running monitor. Publishes [`Liveness`] through a watch channel.
///
/// Must be created inside a Tokio runtime. Call [`LivenessMonitor::stop`] on
/// teardown; dropping the handle aborts the task as well.
pub struct LivenessMonitor {
    state: watch::Receiver<Liveness>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl LivenessMonitor {
    /// Starts polling. The first check runs one `interval` after start.
    pub fn start(probe: Arc<dyn PresenceCheck>, interval: Duration) -> Self {
        let (state_tx, state_rx) = watch::channel(Liveness::Unknown);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(run_monitor(probe, interval, state_tx, shutdown_rx));
        tracing::debug!(interval_ms = interval.as_millis() as u64, "liveness monitor started");
        Self {
            state: state_rx,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }

    pub fn state(&self) -> Liveness {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Liveness> {
        self.state.clone()
    }

    /// Waits for the first completed check. Returns `Missing` if the monitor
    /// stopped before any check finished.
    pub async fn first_check(&self) -> Liveness {
        let mut rx = self.state.clone();
        // Bound so the `wait_for` borrow ends before `rx` is dropped.
        let state = match rx.wait_for(|s| *s != Liveness::Unknown).await {
            Ok(s) => *s,
            Err(_) => Liveness::Missing,
        };
        state
    }

    /// Stops polling and waits for the task to exit. No check is scheduled
    /// afterwards and an in-flight check's result is discarded. The blocking
    /// probe itself runs to completion on its own thread, bounded by the
    /// probe's timeout.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        tracing::debug!("liveness monitor stopped");
    }
}

impl Drop for LivenessMonitor {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run_monitor(
    probe: Arc<dyn PresenceCheck>,
    interval: Duration,
    state_tx: watch::Sender<Liveness>,
    mut shutdown: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            _ = &mut shutdown => return,
            _ = tokio::time::sleep(interval) => {}
        }

        let check = tokio::task::spawn_blocking({
            let probe = Arc::clone(&probe);
            move || probe.check_presence()
        });
        let result = tokio::select! {
            _ = &mut shutdown => return,
            joined = check => joined
                .unwrap_or_else(|e| Err(anyhow::anyhow!("presence check task: {}", e))),
        };

        if let Err(e) = &result {
            tracing::warn!("presence check failed, treating client as missing: {:#}", e);
        }
        let next = Liveness::from_check(&result);
        state_tx.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            tracing::info!(from = ?*current, to = ?next, "client liveness changed");
            *current = next;
            true
        });
    }
}
