//! Per-call wall clock.

use std::time::Instant;

/// Monotonic clock started when a call is dispatched.
#[derive(Debug, Clone, Copy)]
pub struct RequestClock {
    started: Instant,
}

impl RequestClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}
