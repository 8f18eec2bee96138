//! Progress-callback trait for per-section summarisation events.
//!
//! Inject an [`Arc<dyn SummarizeProgressCallback>`] via
//! [`crate::config::SummarizeConfigBuilder::progress_callback`] to receive
//! events as [`crate::summarize::summarize_sections`] works through a
//! document. Callers can forward events to a terminal progress bar, a log,
//! or a job-status record without the library knowing anything about how the
//! host application reports progress.
//!
//! All methods have default no-op implementations so callers only override
//! what they care about. Sections are summarised strictly one at a time, so
//! events arrive in order from a single task.

use std::sync::Arc;

/// Called by the summarisation pipeline as it works through a document.
pub trait SummarizeProgressCallback: Send + Sync {
    /// Called once before any section is summarised.
    ///
    /// # Arguments
    /// * `pending` — sections that will be summarised in this run
    /// * `resumed` — sections already covered by a resume checkpoint
    fn on_run_start(&self, pending: usize, resumed: usize) {
        let _ = (pending, resumed);
    }

    /// Called just before the first API call for a section is sent.
    fn on_section_start(&self, section_id: u32, heading: &str) {
        let _ = (section_id, heading);
    }

    /// Called when a section's summary has been merged and checkpointed.
    ///
    /// # Arguments
    /// * `section_id` — the section just completed
    /// * `completed`  — summaries accumulated so far, resumed ones included
    /// * `total`      — sections in the document
    fn on_section_complete(&self, section_id: u32, completed: usize, total: usize) {
        let _ = (section_id, completed, total);
    }

    /// Called once after every pending section has been summarised.
    fn on_run_complete(&self, total: usize) {
        let _ = total;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl SummarizeProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::SummarizeConfig`].
pub type ProgressCallback = Arc<dyn SummarizeProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TrackingCallback {
        starts: AtomicUsize,
        completes: AtomicUsize,
        pending_seen: AtomicUsize,
    }

    impl SummarizeProgressCallback for TrackingCallback {
        fn on_run_start(&self, pending: usize, _resumed: usize) {
            self.pending_seen.store(pending, Ordering::SeqCst);
        }

        fn on_section_start(&self, _section_id: u32, _heading: &str) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_section_complete(&self, _section_id: u32, _completed: usize, _total: usize) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_run_start(3, 1);
        cb.on_section_start(2, "Section 2 Claims");
        cb.on_section_complete(2, 2, 4);
        cb.on_run_complete(4);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback {
            starts: AtomicUsize::new(0),
            completes: AtomicUsize::new(0),
            pending_seen: AtomicUsize::new(0),
        };

        tracker.on_run_start(2, 1);
        tracker.on_section_start(2, "Section 2");
        tracker.on_section_complete(2, 2, 3);
        tracker.on_section_start(3, "Section 3");
        tracker.on_section_complete(3, 3, 3);
        tracker.on_run_complete(3);

        assert_eq!(tracker.pending_seen.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.starts.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: ProgressCallback = Arc::new(NoopProgressCallback);
        cb.on_run_start(5, 0);
        cb.on_section_start(1, "Section 1");
        cb.on_section_complete(1, 1, 5);
    }
}
