//! Cooperative cancellation for long-running reads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag.
///
/// Clones observe the same flag. Readers check it between chunks, so a
/// cancelled operation stops at its next read boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    parent: Option<Arc<CancelToken>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trigger cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Cancelled when either this token or any ancestor is.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
            || self.parent.as_ref().is_some_and(|p| p.is_cancelled())
    }

    /// Token that also observes `self`. Cancelling the child leaves the
    /// parent untouched.
    pub fn child(&self) -> CancelToken {
        CancelToken {
            cancelled: Arc::default(),
            parent: Some(Arc::new(self.clone())),
        }
    }
}
