//! Transport trait and the reqwest-backed implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::HttpRequest;
use super::HttpResponse;
use super::RequestBody;

/// Errors raised when a request fails before a response is obtained.
///
/// Mutually exclusive with [`HttpResponse`] for a given attempt: a call
/// either produced a response (whatever its status) or one of these.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// Failed to establish or keep the connection (refused, reset, TLS).
    #[error("Connection error: {0}")]
    Connection(String),

    /// Name resolution failed.
    ///
    /// reqwest folds DNS failures into its connect errors, so
    /// [`ReqwestTransport`] reports them as [`Connection`](Self::Connection);
    /// this variant is produced by transports that can tell the two apart.
    /// Both count as connection errors for retry classification.
    #[error("DNS resolution failed: {0}")]
    Dns(String),

    /// The request timed out.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Any other transport-level failure.
    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Returns `true` for connection-level failures (connection refused or
    /// reset, DNS), the conditions
    /// [`ConnectionErrorRetryHandler`](crate::retry::ConnectionErrorRetryHandler)
    /// considers transient.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Dns(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if error.is_connect() {
            Self::Connection(error.to_string())
        } else {
            Self::Other(error.to_string())
        }
    }
}

/// The seam between the retry orchestrator and the actual network stack.
///
/// One physical attempt per call to `send`. Implementations must be safe to
/// share across concurrently executing logical calls.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs one network round-trip.
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Production [`Transport`] backed by a shared [`reqwest::Client`].
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    /// Creates a transport around an existing client.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Sets a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .headers(request.headers.clone());

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder = match &request.body {
            Some(RequestBody::Form(fields)) => builder.form(fields),
            Some(RequestBody::Json(value)) => builder.json(value),
            Some(RequestBody::Bytes(bytes)) => builder.body(bytes.clone()),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
