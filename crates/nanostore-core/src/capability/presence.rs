//! Presence probe for the local client: a GET against its status endpoint.

use anyhow::Result;
use std::time::Duration;

use super::{PresenceCheck, PRESENCE_ABSENT, PRESENCE_FOUND};
use crate::http::{self, TransportOptions};
use crate::retry::{classify_curl_error, ErrorKind, RetryPolicy, TransportError};

#[derive(Debug, Clone)]
pub struct HttpPresenceProbe {
    url: String,
    options: TransportOptions,
}

impl HttpPresenceProbe {
    /// Probes `url`. Each check is bounded by `timeout` so a wedged client
    /// cannot stall the monitor.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            options: TransportOptions {
                connect_timeout: timeout,
                timeout: Some(timeout),
                retry: RetryPolicy::single_attempt(),
            },
        }
    }
}

impl PresenceCheck for HttpPresenceProbe {
    /// Refused, timed-out or non-2xx answers mean the client is absent.
    /// Anything else (bad URL, curl setup failure) is an error.
    fn check_presence(&self) -> Result<i32> {
        match http::get(&self.url, &self.options) {
            Ok(_) => Ok(PRESENCE_FOUND),
            Err(TransportError::Http(code)) => {
                tracing::trace!(code, "presence endpoint answered non-2xx");
                Ok(PRESENCE_ABSENT)
            }
            Err(TransportError::Curl(e))
                if matches!(
                    classify_curl_error(&e),
                    ErrorKind::Connection | ErrorKind::Timeout
                ) =>
            {
                Ok(PRESENCE_ABSENT)
            }
            Err(e) => Err(anyhow::Error::new(e).context(format!("probe {}", self.url))),
        }
    }
}
