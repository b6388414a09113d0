/// Logging-only NotificationPublisher.

use crate::application::ports::{NotificationPublisher, RunSummary};

/// Publishes run summaries to the structured-logging stream rather than any
/// external channel. Delivery "failure" doesn't exist for this adapter, so
/// the caller's "log and never abort" contract is trivially satisfied.
#[derive(Debug, Clone, Default)]
pub struct LoggingNotificationPublisher;

impl LoggingNotificationPublisher {
    pub fn new() -> Self {
        Self
    }
}

impl NotificationPublisher for LoggingNotificationPublisher {
    fn publish_run_summary(&self, summary: &RunSummary) {
        tracing::info!(
            total_scheduled = summary.total_scheduled,
            total_failed = summary.total_failed,
            care_receivers_processed = summary.care_receivers_processed,
            "assignment run complete"
        );
    }
}
