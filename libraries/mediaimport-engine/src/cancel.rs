//! Cooperative cancellation for import runs

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag a host can set to stop a running import
///
/// The importer checks it once per file pair; records created before the
/// check are kept. A request is consumed by the run it stops, so the next
/// run on the same importer starts uncancelled.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Clear a pending request, for every clone
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }
}
