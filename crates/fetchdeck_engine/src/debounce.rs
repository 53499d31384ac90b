//! Debounced search: a single-slot register of the pending search task.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use fetchdeck_logging::deck_trace;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(500);

/// Holds at most one scheduled search.
///
/// Scheduling replaces the slot and cancels the previous task if it is still
/// waiting out its delay. A task that has started running is never cancelled.
pub struct SearchDebouncer {
    delay: Duration,
    runtime: Handle,
    pending: Mutex<Option<CancellationToken>>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration, runtime: Handle) -> Self {
        Self {
            delay,
            runtime,
            pending: Mutex::new(None),
        }
    }

    pub fn schedule<F, Fut>(&self, search: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let waiting = token.clone();
        let delay = self.delay;

        let mut slot = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = slot.replace(token) {
            previous.cancel();
        }
        self.runtime.spawn(async move {
            tokio::select! {
                _ = waiting.cancelled() => {
                    deck_trace!("Pending search cancelled before it started");
                    return;
                }
                _ = tokio::time::sleep(delay) => {}
            }
            search().await;
        });
    }

    /// Cancel the pending search, if it has not started.
    pub fn cancel(&self) {
        let mut slot = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = slot.take() {
            previous.cancel();
        }
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
