//! Interval schedule for polling long-running jobs.

use std::time::Duration;

use crate::AsyncJobConfig;

/// Endless iterator over the waits between job status checks.
///
/// Starts at `check_time_ms`, grows by `scale_percent` after each step and
/// stays at `max_time_ms` once reached. Use `take` or `take_while` to bound it.
///
/// A zero `check_time_ms` or `max_time_ms` falls back to the default, and a
/// `scale_percent` below 100 is treated as 100, so waits never shrink.
#[derive(Debug, Clone)]
pub struct PollSchedule {
    next_ms: u64,
    scale_percent: u64,
    max_ms: u64,
}

impl PollSchedule {
    /// Schedule for the given settings.
    pub fn new(settings: AsyncJobConfig) -> Self {
        let defaults = AsyncJobConfig::default();
        let nonzero = |value: u64, default: u64| if value == 0 { default } else { value };
        let max_ms = nonzero(settings.max_time_ms, defaults.max_time_ms);
        Self {
            next_ms: nonzero(settings.check_time_ms, defaults.check_time_ms).min(max_ms),
            scale_percent: settings.scale_percent.max(100),
            max_ms,
        }
    }

    /// The wait the next call to `next` will yield.
    pub fn peek(&self) -> Duration { Duration::from_millis(self.next_ms) }
}

impl Iterator for PollSchedule {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let current = self.next_ms;
        let mut scaled = current.saturating_mul(self.scale_percent) / 100;
        if self.scale_percent > 100 {
            scaled = scaled.max(current.saturating_add(1));
        }
        self.next_ms = scaled.min(self.max_ms);
        Some(Duration::from_millis(current))
    }
}
