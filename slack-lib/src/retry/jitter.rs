//! Jitter strategies for retry intervals.

use std::time::Duration;

/// Perturbation applied to a computed backoff interval.
///
/// Randomizing the wait desynchronizes concurrent callers that failed at the
/// same moment, so they don't all retry in lockstep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Jitter {
    /// Multiply the base duration by a uniform random factor in `[0, 1)`.
    #[default]
    Random,
    /// Return the base duration unchanged. Deterministic, used in tests.
    None,
}

impl Jitter {
    /// Applies the strategy to a base duration.
    pub fn apply(&self, base: Duration) -> Duration {
        match self {
            Self::Random => base.mul_f64(rand::random::<f64>()),
            Self::None => base,
        }
    }
}
