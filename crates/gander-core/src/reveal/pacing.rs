//! Per-tick pacing for reveals

use std::time::Duration;

/// Delay schedule: `base_delay + revealed * increment`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealPacing {
    pub base_delay: Duration,
    pub increment: Duration,
}

impl RevealPacing {
    pub fn new(base_delay: Duration, increment: Duration) -> Self {
        Self {
            base_delay,
            increment,
        }
    }

    /// No delay at all, reveals as fast as the runtime schedules ticks
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Delay before revealing the next character
    pub fn delay_for(&self, revealed: usize) -> Duration {
        let steps = u32::try_from(revealed).unwrap_or(u32::MAX);
        self.base_delay
            .saturating_add(self.increment.saturating_mul(steps))
    }
}

impl Default for RevealPacing {
    fn default() -> Self {
        Self::new(Duration::from_millis(10), Duration::from_micros(10))
    }
}
