/// Port for post-run notification dispatch (SPEC_FULL §6, out of scope for
/// its own internals — a logging-only adapter is the in-tree default).

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub total_scheduled: usize,
    pub total_failed: usize,
    pub care_receivers_processed: usize,
}

pub trait NotificationPublisher {
    /// Delivery failures must be logged and never abort the caller.
    fn publish_run_summary(&self, summary: &RunSummary);
}
