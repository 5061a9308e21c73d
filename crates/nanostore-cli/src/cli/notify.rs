//! Console notifier: success to stdout, errors to stderr.

use nanostore_core::form::Notifier;

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        tracing::info!("{}", message);
        println!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::warn!("{}", message);
        eprintln!("{message}");
    }
}
