//! Wait behavior - add latency before response.

use std::time::Duration;

/// Fixed latency applied before every response on a route
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaitBehavior {
    delay_ms: u64,
}

impl WaitBehavior {
    pub const fn from_millis(delay_ms: u64) -> Self {
        Self { delay_ms }
    }

    pub fn duration_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn is_zero(&self) -> bool {
        self.delay_ms == 0
    }

    /// Suspend the calling task for the configured delay; zero returns immediately
    pub async fn wait(&self) {
        if !self.is_zero() {
            tokio::time::sleep(self.duration()).await;
        }
    }
}
