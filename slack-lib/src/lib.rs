//! Slack Web API client library
//!
//! An async Rust client for the Slack Web API with a pluggable retry
//! framework: transient failures (connection errors, rate limits) are
//! retried according to an ordered list of per-client
//! [`RetryHandler`](retry::RetryHandler) policies with exponential backoff
//! and jitter.

pub mod api;
pub mod auth;
pub mod error;
pub mod http;
pub mod retry;

mod client;

pub use client::*;
