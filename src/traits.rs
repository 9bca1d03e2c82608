use crate::domain::tracking_item::TrackingItem;

/// Observer for records the tree builder could not place.
pub trait TreeDiagnostics {
    /// Called once per record whose parent key is not present in the input.
    fn on_orphan(&mut self, item: &TrackingItem);
}

/// Default observer: orphans are dropped without a trace.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentDiagnostics;

impl TreeDiagnostics for SilentDiagnostics {
    fn on_orphan(&mut self, _item: &TrackingItem) {}
}

/// Logs every dropped record as a warning and counts them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingDiagnostics {
    pub dropped: usize,
}

impl TreeDiagnostics for LoggingDiagnostics {
    fn on_orphan(&mut self, item: &TrackingItem) {
        self.dropped += 1;
        log::warn!("Dropping tracking record '{}': parent '{}' not found.", item.key, item.parent);
    }
}
