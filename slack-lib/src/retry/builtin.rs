//! Built-in retry handlers.

use crate::http::HttpRequest;
use crate::http::HttpResponse;
use crate::http::TransportError;

use super::BackoffIntervalCalculator;
use super::RetryHandler;
use super::RetryIntervalCalculator;
use super::RetryState;

/// Retries transport-level connection failures (refused, reset, DNS).
///
/// The default policy of a freshly built client: one retry with exponential
/// backoff and random jitter. Timeouts are deliberately not matched; a
/// caller that wants them retried registers its own handler.
pub struct ConnectionErrorRetryHandler {
    max_retry_count: u32,
    interval: BackoffIntervalCalculator,
}

impl Default for ConnectionErrorRetryHandler {
    fn default() -> Self {
        Self {
            max_retry_count: 1,
            interval: BackoffIntervalCalculator::default(),
        }
    }
}

impl ConnectionErrorRetryHandler {
    /// Sets the retry budget.
    pub fn max_retry_count(mut self, n: u32) -> Self {
        self.max_retry_count = n;
        self
    }

    /// Sets the interval calculator.
    pub fn interval(mut self, interval: BackoffIntervalCalculator) -> Self {
        self.interval = interval;
        self
    }
}

impl RetryHandler for ConnectionErrorRetryHandler {
    fn max_retry_count(&self) -> u32 {
        self.max_retry_count
    }

    fn can_retry(
        &self,
        state: &RetryState,
        _request: &HttpRequest,
        _response: Option<&HttpResponse>,
        error: Option<&TransportError>,
    ) -> bool {
        if state.current_attempt() >= self.max_retry_count {
            return false;
        }
        error.is_some_and(TransportError::is_connection_error)
    }

    fn prepare_for_next_attempt(
        &self,
        state: &mut RetryState,
        _request: &HttpRequest,
        _response: Option<&HttpResponse>,
        _error: Option<&TransportError>,
    ) {
        state.request_interval(self.interval.next_interval(state.current_attempt()));
    }
}

/// Retries HTTP 429 responses, honoring the server's `Retry-After` hint.
///
/// When the response carries a parseable `Retry-After` header its value is
/// used as the wait; otherwise the configured exponential backoff applies.
pub struct RateLimitErrorRetryHandler {
    max_retry_count: u32,
    interval: BackoffIntervalCalculator,
}

impl Default for RateLimitErrorRetryHandler {
    fn default() -> Self {
        Self {
            max_retry_count: 1,
            interval: BackoffIntervalCalculator::default(),
        }
    }
}

impl RateLimitErrorRetryHandler {
    /// Sets the retry budget.
    pub fn max_retry_count(mut self, n: u32) -> Self {
        self.max_retry_count = n;
        self
    }

    /// Sets the fallback interval calculator used when the server supplies
    /// no `Retry-After`.
    pub fn interval(mut self, interval: BackoffIntervalCalculator) -> Self {
        self.interval = interval;
        self
    }
}

impl RetryHandler for RateLimitErrorRetryHandler {
    fn max_retry_count(&self) -> u32 {
        self.max_retry_count
    }

    fn can_retry(
        &self,
        state: &RetryState,
        _request: &HttpRequest,
        response: Option<&HttpResponse>,
        _error: Option<&TransportError>,
    ) -> bool {
        if state.current_attempt() >= self.max_retry_count {
            return false;
        }
        response.is_some_and(|r| r.status == 429)
    }

    fn prepare_for_next_attempt(
        &self,
        state: &mut RetryState,
        _request: &HttpRequest,
        response: Option<&HttpResponse>,
        _error: Option<&TransportError>,
    ) {
        let wait = response
            .and_then(HttpResponse::retry_after)
            .unwrap_or_else(|| self.interval.next_interval(state.current_attempt()));
        state.request_interval(wait);
    }
}
