//! Liveness of the local client and the background poll that tracks it.
//!
//! The monitor never overlaps checks: the next check is scheduled one
//! interval after the previous one resolved. A check that errors (as opposed
//! to answering "absent") counts as [`Liveness::Missing`].

mod monitor;

pub use monitor::LivenessMonitor;

use crate::capability::PRESENCE_ABSENT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    /// No check has completed yet. The prompt stays hidden.
    Unknown,
    Present,
    Missing,
}

impl Liveness {
    /// State after a presence check returned `result`.
    pub fn from_check(result: &anyhow::Result<i32>) -> Self {
        match result {
            Ok(PRESENCE_ABSENT) => Liveness::Missing,
            Ok(_) => Liveness::Present,
            Err(_) => Liveness::Missing,
        }
    }

    /// Whether the blocking "client not found" prompt should be shown.
    pub fn prompt_visible(self) -> bool {
        self == Liveness::Missing
    }
}
