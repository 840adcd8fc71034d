use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Shared, read-only-after-construction cancellation flag, polled at
/// directory, file, and chunk boundaries.
#[derive(Debug, Clone)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Spawns a background watchdog that cancels the token after `timeout`
    /// elapses. The thread exits as soon as it fires; there is nothing to
    /// join because cancellation is checked cooperatively, not awaited.
    pub fn arm_timeout(&self, timeout: Duration) {
        let flag = Arc::clone(&self.flag);
        std::thread::spawn(move || {
            std::thread::sleep(timeout);
            flag.store(true, Ordering::Relaxed);
        });
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
