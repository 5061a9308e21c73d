//! Download and upload forms: input state, submit gating and notifications.
//!
//! A form refuses to submit while its inputs are empty or while a previous
//! submission is still in flight. Failures are reported once through the
//! [`Notifier`] and the form returns to idle.

mod download;
mod gate;
mod upload;

pub use download::DownloadForm;
pub use gate::{InFlight, InFlightGuard};
pub use upload::UploadForm;

/// Fire-and-forget user notifications.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifier that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}

/// Outcome of pressing a form's submit action.
#[derive(Debug)]
pub enum Submission<T> {
    /// Required inputs are empty; nothing was invoked.
    Disabled,
    /// A previous submission from this form is still running.
    Busy,
    /// The local client is missing; the blocking prompt is up.
    Blocked,
    /// The capability failed; one error notification was sent.
    Failed,
    Done(T),
}

impl<T> Submission<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Submission<U> {
        match self {
            Submission::Disabled => Submission::Disabled,
            Submission::Busy => Submission::Busy,
            Submission::Blocked => Submission::Blocked,
            Submission::Failed => Submission::Failed,
            Submission::Done(v) => Submission::Done(f(v)),
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Submission::Done(_))
    }

    pub fn into_done(self) -> Option<T> {
        match self {
            Submission::Done(v) => Some(v),
            _ => None,
        }
    }
}
