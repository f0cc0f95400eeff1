//! Retry interval calculators.

use std::time::Duration;

use super::Jitter;

/// Computes how long to wait before the next retry attempt.
///
/// Implementations must be pure in `attempt` (apart from consuming entropy
/// for jitter) and safe to share across concurrent calls.
pub trait RetryIntervalCalculator: Send + Sync {
    /// Returns the wait before attempt `attempt + 1`, given that `attempt`
    /// physical attempts have already failed (so the first retry passes 0).
    fn next_interval(&self, attempt: u32) -> Duration;
}

/// Exponential backoff: `jitter(backoff_factor * 2^attempt)`.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use slack_lib::retry::{BackoffIntervalCalculator, Jitter, RetryIntervalCalculator};
///
/// let calc = BackoffIntervalCalculator::default().jitter(Jitter::None);
/// assert_eq!(calc.next_interval(0), Duration::from_millis(500));
/// assert_eq!(calc.next_interval(3), Duration::from_secs(4));
/// ```
#[derive(Debug, Clone)]
pub struct BackoffIntervalCalculator {
    backoff_factor: Duration,
    jitter: Jitter,
    max_interval: Option<Duration>,
}

impl Default for BackoffIntervalCalculator {
    fn default() -> Self {
        Self {
            backoff_factor: Duration::from_millis(500),
            jitter: Jitter::default(),
            max_interval: None,
        }
    }
}

impl BackoffIntervalCalculator {
    /// Sets the base factor the exponential curve grows from.
    pub fn backoff_factor(mut self, factor: Duration) -> Self {
        self.backoff_factor = factor;
        self
    }

    /// Sets the jitter strategy.
    pub fn jitter(mut self, jitter: Jitter) -> Self {
        self.jitter = jitter;
        self
    }

    /// Caps the interval before jitter is applied, bounding worst-case wait.
    pub fn max_interval(mut self, max: Duration) -> Self {
        self.max_interval = Some(max);
        self
    }
}

impl RetryIntervalCalculator for BackoffIntervalCalculator {
    fn next_interval(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.min(31));
        let mut base = self.backoff_factor.saturating_mul(factor);
        if let Some(max) = self.max_interval {
            base = base.min(max);
        }
        self.jitter.apply(base)
    }
}

/// Constant interval regardless of attempt number.
#[derive(Debug, Clone)]
pub struct FixedIntervalCalculator {
    interval: Duration,
}

impl FixedIntervalCalculator {
    /// Creates a calculator that always returns `interval`.
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl RetryIntervalCalculator for FixedIntervalCalculator {
    fn next_interval(&self, _attempt: u32) -> Duration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_backoff_doubles() {
        let calc = BackoffIntervalCalculator::default().jitter(Jitter::None);
        for attempt in 0..10 {
            assert_eq!(
                calc.next_interval(attempt),
                Duration::from_millis(500) * 2u32.pow(attempt)
            );
        }
    }

    #[test]
    fn test_custom_factor() {
        let calc = BackoffIntervalCalculator::default()
            .backoff_factor(Duration::from_secs(2))
            .jitter(Jitter::None);
        assert_eq!(calc.next_interval(0), Duration::from_secs(2));
        assert_eq!(calc.next_interval(2), Duration::from_secs(8));
    }

    #[test]
    fn test_max_interval_cap() {
        let calc = BackoffIntervalCalculator::default()
            .jitter(Jitter::None)
            .max_interval(Duration::from_secs(3));
        assert_eq!(calc.next_interval(0), Duration::from_millis(500));
        assert_eq!(calc.next_interval(10), Duration::from_secs(3));
    }

    #[test]
    fn test_huge_attempt_does_not_overflow() {
        let calc = BackoffIntervalCalculator::default().jitter(Jitter::None);
        // Saturates instead of panicking.
        let _ = calc.next_interval(u32::MAX);
    }

    #[test]
    fn test_random_jitter_bounded_by_base() {
        let calc = BackoffIntervalCalculator::default().jitter(Jitter::Random);
        for _ in 0..50 {
            assert!(calc.next_interval(1) <= Duration::from_secs(1));
        }
    }

    #[test]
    fn test_fixed_interval_ignores_attempt() {
        let calc = FixedIntervalCalculator::new(Duration::from_millis(250));
        assert_eq!(calc.next_interval(0), Duration::from_millis(250));
        assert_eq!(calc.next_interval(7), Duration::from_millis(250));
    }
}
