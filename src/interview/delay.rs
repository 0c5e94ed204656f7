//! Thinking pause
//!
//! A short cosmetic pause before the final diagnosis is shown. The session
//! keeps input locked until the pause has elapsed.

use async_trait::async_trait;
use std::time::Duration;

/// Pause inserted before scoring
#[async_trait]
pub trait ThinkingDelay: Send + Sync {
    async fn wait(&self);
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy)]
pub struct TimedDelay {
    duration: Duration,
}

impl TimedDelay {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

#[async_trait]
impl ThinkingDelay for TimedDelay {
    async fn wait(&self) {
        tracing::trace!(ms = self.duration.as_millis() as u64, "Thinking");
        tokio::time::sleep(self.duration).await;
    }
}

/// Returns immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl ThinkingDelay for NoDelay {
    async fn wait(&self) {}
}
