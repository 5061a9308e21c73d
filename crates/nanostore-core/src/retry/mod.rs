//! Retry and backoff policy for capability HTTP calls.
//!
//! Error classification (timeouts, throttling, connection failures) and
//! exponential backoff decisions live here so the resolver, publisher and
//! presence probe share one policy. The default policy makes a single attempt.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::TransportError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
