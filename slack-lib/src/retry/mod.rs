//! Pluggable retry framework.
//!
//! A logical call (one request as seen by the caller) may be realized as
//! several physical attempts. The [`RetryOrchestrator`] loops around a
//! [`Transport`](crate::http::Transport), consulting an ordered list of
//! [`RetryHandler`] policies after every attempt; approving handlers record
//! their wishes on the per-call [`RetryState`], and the interval before the
//! next attempt comes from a [`RetryIntervalCalculator`] (exponential
//! backoff with [`Jitter`]) or a server-supplied hint.

mod builtin;
mod handler;
mod interval;
mod jitter;
mod orchestrator;
mod state;

pub use builtin::ConnectionErrorRetryHandler;
pub use builtin::RateLimitErrorRetryHandler;
pub use handler::RetryHandler;
pub use interval::BackoffIntervalCalculator;
pub use interval::FixedIntervalCalculator;
pub use interval::RetryIntervalCalculator;
pub use jitter::Jitter;
pub use orchestrator::RetryOrchestrator;
pub use state::RetryState;
