//! Detection Observers
//!
//! Replaces ad-hoc printing with an explicit observer abstraction: the
//! detector notifies every registered observer when an emergence event is
//! logged, and the caller decides whether and how to surface it.

use crate::models::EmergenceEvent;

/// Callback interface for detection notifications.
///
/// Notification is a side effect only; it is not part of the data
/// contract and observers must not assume they see events exactly once
/// across detector instances.
pub trait DetectionObserver: Send + Sync {
    /// Called after an emergence event has been appended to the log.
    fn on_detection(&self, event: &EmergenceEvent);
}

/// Observer that logs detections through `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl DetectionObserver for TracingObserver {
    fn on_detection(&self, event: &EmergenceEvent) {
        tracing::info!(
            turn = event.turn,
            pattern = %event.pattern,
            boundary = event.measurements.boundary,
            resonance = event.measurements.resonance,
            "emergence pattern detected"
        );
    }
}
