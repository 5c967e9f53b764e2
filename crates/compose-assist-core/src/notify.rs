//! User-visible notifications.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

/// Message shown when an activation produced no reply.
pub const FAILURE_ALERT: &str = "Failed to generate AI reply. Please try again.";

/// Blocking, user-visible alert of the host.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Reports alerts through the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn alert(&self, message: &str) {
        warn!(target: "compose_assist::alert", "{message}");
    }
}

/// Keeps every alert for later inspection.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    alerts: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_shares_alerts() {
        let notifier = RecordingNotifier::new();
        let clone = notifier.clone();
        clone.alert(FAILURE_ALERT);
        assert_eq!(notifier.alerts(), vec![FAILURE_ALERT.to_string()]);
    }
}
