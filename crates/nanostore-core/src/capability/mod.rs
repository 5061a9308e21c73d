//! External capabilities the orchestrators delegate to.
//!
//! The traits are blocking and `Send + Sync`; orchestrators call them from
//! `spawn_blocking`. HTTP implementations live in the submodules.

mod presence;
mod publisher;
mod resolver;

pub use presence::HttpPresenceProbe;
pub use publisher::HttpStoragePublisher;
pub use resolver::HttpContentResolver;

use crate::publish::{PublishReceipt, PublishRequest};
use crate::registry::ResolverEndpoint;
use crate::retrieve::{ContentRef, RetrievedPayload};

/// Status returned by a presence check when the local client is absent.
pub const PRESENCE_ABSENT: i32 = 0;
/// Status returned by [`HttpPresenceProbe`] when the client answered.
pub const PRESENCE_FOUND: i32 = 1;

/// Turns a content locator into bytes using a resolver endpoint.
pub trait ContentResolver: Send + Sync {
    fn resolve(&self, locator: &ContentRef, resolver: &ResolverEndpoint)
        -> anyhow::Result<RetrievedPayload>;
}

/// Stores a file on a host for a retention period.
pub trait StoragePublisher: Send + Sync {
    fn publish(&self, request: &PublishRequest, endpoint: &ResolverEndpoint)
        -> anyhow::Result<PublishReceipt>;
}

/// Asks whether the local client is running. [`PRESENCE_ABSENT`] means it is
/// not; any other status means it is. `Err` means the question could not be asked.
pub trait PresenceCheck: Send + Sync {
    fn check_presence(&self) -> anyhow::Result<i32>;
}
