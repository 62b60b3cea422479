//! Cooperative cancellation for long settle loops.
//!
//! The flag is polled once per update step, so a cancelled recall stops
//! within one matrix-vector product.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "std")]
use std::time::{Duration, Instant};

/// Shared cancellation flag with an optional wall-clock deadline.
///
/// Clones share the flag; cancelling one cancels all of them.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    #[cfg(feature = "std")]
    deadline: Option<Instant>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that also expires `timeout` from now.
    #[cfg(feature = "std")]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        if self.flag.load(Ordering::Acquire) {
            return true;
        }
        #[cfg(feature = "std")]
        if let Some(deadline) = self.deadline {
            return Instant::now() >= deadline;
        }
        false
    }
}
