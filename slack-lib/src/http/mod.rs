//! HTTP request/response model and the transport seam.

mod transport;

pub use transport::ReqwestTransport;
pub use transport::Transport;
pub use transport::TransportError;

use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;
use reqwest::Method;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

/// Body of an outgoing request.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// URL-encoded form fields.
    Form(Vec<(String, String)>),
    /// JSON payload.
    Json(serde_json::Value),
    /// Raw bytes (file uploads and the like).
    Bytes(Vec<u8>),
}

/// One outgoing HTTP request.
///
/// A request is immutable once an attempt starts. Retry handlers that need to
/// change later attempts (for example to rotate an auth token) stage header
/// overrides on the per-call [`RetryState`](crate::retry::RetryState); the
/// orchestrator applies them to the clone used for the next attempt.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute request URL.
    pub url: String,
    /// Request headers (keys are case-insensitive).
    pub headers: HeaderMap,
    /// Optional request body.
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    /// Creates a request with no headers and no body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

/// One completed HTTP response.
///
/// Present only when the round-trip finished without a transport-level
/// failure; otherwise the attempt yields a [`TransportError`] instead.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Returns `true` for 2xx status codes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserializes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Returns the body as text, lossily decoded.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parses the `Retry-After` header.
    ///
    /// Accepts both the delay-seconds form (`Retry-After: 2`) and the
    /// HTTP-date form; a date in the past yields a zero duration.
    pub fn retry_after(&self) -> Option<Duration> {
        let value = self.headers.get("Retry-After")?.to_str().ok()?;

        if let Ok(seconds) = value.trim().parse::<u64>() {
            return Some(Duration::from_secs(seconds));
        }

        let date = DateTime::parse_from_rfc2822(value).ok()?;
        let delta = date.with_timezone(&Utc) - Utc::now();
        Some(delta.to_std().unwrap_or(Duration::ZERO))
    }
}
