//! Cooperative cancellation
//!
//! One token per evaluation. Long loops poll it and unwind with NaN or a
//! partial result once it is set.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_cancel(&self) {
        tracing::info!("cancellation requested");
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn clear_cancel(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
