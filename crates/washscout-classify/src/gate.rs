//! Process-wide pacing for LLM calls.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

/// Fixed-interval gate: consecutive [`RateGate::wait`] calls return at least
/// `interval` apart, no matter how many workers share the gate.
#[derive(Debug)]
pub struct RateGate {
    interval: Duration,
    last_tick: Mutex<Option<Instant>>,
}

impl RateGate {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: Mutex::new(None),
        }
    }

    /// Gate that never waits.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::new(Duration::ZERO)
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub async fn wait(&self) {
        let mut last = self.last_tick.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.interval {
                sleep(self.interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}
