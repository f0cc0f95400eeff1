//! Per-call retry state.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;

use crate::http::HttpRequest;

/// Mutable record for one logical call.
///
/// Created fresh by the orchestrator at the start of each call and dropped
/// when the call terminates; never shared across calls, so no locking is
/// involved. Handlers write their retry requests here instead of holding any
/// per-call data themselves.
#[derive(Debug, Default)]
pub struct RetryState {
    current_attempt: u32,
    next_interval: Option<Duration>,
    header_overrides: HeaderMap,
}

impl RetryState {
    /// Creates state for a new logical call, at attempt 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attempts that have already failed.
    pub fn current_attempt(&self) -> u32 {
        self.current_attempt
    }

    /// Advances the attempt counter. Called once per retry round by the
    /// orchestrator, after all approving handlers have been consulted.
    pub fn increment_attempt(&mut self) {
        self.current_attempt += 1;
    }

    /// Requests a wait before the next attempt.
    ///
    /// When several handlers approve the same round, the longest requested
    /// delay wins, so the most conservative policy is honored.
    pub fn request_interval(&mut self, interval: Duration) {
        self.next_interval = Some(match self.next_interval {
            Some(current) => current.max(interval),
            None => interval,
        });
    }

    /// Takes the delay recorded for this round, resetting it for the next.
    pub fn take_next_interval(&mut self) -> Option<Duration> {
        self.next_interval.take()
    }

    /// Stages a header override for all future attempts.
    ///
    /// This is the side-channel through which a handler rotates a value (an
    /// auth token, typically) without mutating the in-flight request.
    pub fn override_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.header_overrides.insert(name, value);
    }

    /// Clones the base request with staged header overrides applied.
    pub(crate) fn request_for_attempt(&self, base: &HttpRequest) -> HttpRequest {
        let mut request = base.clone();
        for (name, value) in self.header_overrides.iter() {
            request.headers.insert(name.clone(), value.clone());
        }
        request
    }
}
