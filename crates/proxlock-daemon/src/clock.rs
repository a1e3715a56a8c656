//! Injectable time source for the tick loop and keystroke cadence

use std::time::{Duration, Instant};

use async_trait::async_trait;

/// Monotonic time plus cooperative sleeping
///
/// Everything that measures elapsed time or holds a key goes through this
/// trait, so tests can simulate the passage of time without real delays.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Milliseconds since a fixed origin (boot)
    fn now_ms(&self) -> u64;

    /// Cooperative sleep; yields the tick loop for `duration`
    async fn sleep(&self, duration: Duration);
}

/// Tokio-backed clock measuring from construction time
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
