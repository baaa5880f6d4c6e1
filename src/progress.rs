use crate::tree::FoundMap;
use std::sync::{Mutex, PoisonError};

/// A read-only view of a newly discovered element/recipe combination, handed
/// to a [`ProgressObserver`]. Never retained by the engine after the call
/// returns.
#[derive(Debug)]
pub struct Discovery<'a> {
    /// The element that was just resolved or produced.
    pub element: &'a str,
    /// The ordered path of elements the search walked to get here.
    pub path: &'a [String],
    /// Snapshot of the search attempt's partial found-map.
    pub found: &'a FoundMap,
}

/// Observer hook for external visualization of search progress.
///
/// Every strategy reports each newly discovered element/recipe combination
/// through the registered observer. Delivery is serialized across concurrent
/// workers, but ordering across workers is not guaranteed. Observers are used
/// only for reporting, never for control flow, and must not block
/// indefinitely or they will stall the calling worker.
pub trait ProgressObserver: Send + Sync {
    fn on_discover(&self, discovery: &Discovery<'_>);
}

/// Default observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_discover(&self, _discovery: &Discovery<'_>) {}
}

/// Wraps an observer so concurrent workers deliver events one at a time.
pub(crate) struct SerializedObserver {
    observer: std::sync::Arc<dyn ProgressObserver>,
    lock: Mutex<()>,
}

impl SerializedObserver {
    pub(crate) fn new(observer: std::sync::Arc<dyn ProgressObserver>) -> Self {
        Self {
            observer,
            lock: Mutex::new(()),
        }
    }

    pub(crate) fn notify(&self, element: &str, path: &[String], found: &FoundMap) {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.observer.on_discover(&Discovery {
            element,
            path,
            found,
        });
    }
}
