//! The retry policy trait.

use crate::http::HttpRequest;
use crate::http::HttpResponse;
use crate::http::TransportError;

use super::RetryState;

/// A pluggable retry policy.
///
/// Handlers are registered on a client in order; after every physical
/// attempt the orchestrator shows each one the outcome and retries when any
/// handler approves. Exactly one of `response` / `error` is `Some` for a
/// given attempt.
///
/// Handler instances are shared read-only across concurrently executing
/// calls: all per-call mutation goes through the [`RetryState`] the
/// orchestrator passes in.
///
/// # Contract
///
/// `can_retry` is a pure predicate — calling it twice with the same inputs
/// returns the same answer and mutates nothing. It must return `false`
/// whenever `state.current_attempt() >= self.max_retry_count()`, whatever
/// the outcome looks like. A panic in either method is a programming error
/// and propagates, aborting the call.
pub trait RetryHandler: Send + Sync {
    /// Per-handler retry budget for one logical call.
    fn max_retry_count(&self) -> u32 {
        1
    }

    /// Decides whether this handler wants another attempt.
    fn can_retry(
        &self,
        state: &RetryState,
        request: &HttpRequest,
        response: Option<&HttpResponse>,
        error: Option<&TransportError>,
    ) -> bool;

    /// Records this handler's preparation for the next attempt.
    ///
    /// Called in registration order, once per retry round, and only after
    /// `can_retry` returned `true` and the orchestrator decided to retry.
    /// Typical work: [`RetryState::request_interval`] with a computed or
    /// server-supplied delay, and optionally
    /// [`RetryState::override_header`] to rotate a value for future
    /// attempts.
    fn prepare_for_next_attempt(
        &self,
        state: &mut RetryState,
        request: &HttpRequest,
        response: Option<&HttpResponse>,
        error: Option<&TransportError>,
    );
}
