//! Error types

mod api;
mod auth;
mod slack;

pub use api::*;
pub use auth::*;
pub use slack::*;

use std::time::Duration;

/// Top-level error type for all client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error during an API call.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Error obtaining an access token.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Failed to serialize a request payload.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Rate limited and the retry budget is exhausted.
    #[error("Rate limited (retry after {retry_after:?})")]
    RateLimit {
        /// Server-requested wait before trying again, if supplied.
        retry_after: Option<Duration>,
    },
}

impl Error {
    /// Returns the Slack error code if this wraps an API error response.
    pub fn slack_error_code(&self) -> Option<&str> {
        match self {
            Self::Api(api) => api.error_code(),
            _ => None,
        }
    }
}
