//! Authentication error types

/// Errors that can occur while obtaining an access token.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The token was rejected by the API.
    #[error("Invalid token: {code}")]
    InvalidToken {
        /// Slack error code (`invalid_auth`, `token_revoked`, ...).
        code: String,
    },

    /// Access token expired and refresh failed.
    #[error("Token expired and refresh failed: {message}")]
    TokenExpired { message: String },

    /// Network error while fetching or refreshing a token.
    #[error("Network error during auth: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to parse a token response.
    #[error("Auth response parse error: {0}")]
    Parse(String),
}
