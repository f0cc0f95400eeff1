//! Main SlackClient

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::header::HeaderValue;
use url::Url;

use crate::auth::TokenProvider;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::http::HttpResponse;
use crate::http::ReqwestTransport;
use crate::http::Transport;
use crate::http::TransportError;
use crate::retry::ConnectionErrorRetryHandler;
use crate::retry::RetryHandler;
use crate::retry::RetryOrchestrator;

const DEFAULT_BASE_URL: &str = "https://slack.com/api";

/// The main client for the Slack Web API.
///
/// Cheap to clone (uses `Arc` internally) and safe to share across tasks.
/// Each client instance carries its own ordered retry handler list; there is
/// no process-wide retry configuration.
///
/// # Example
///
/// ```ignore
/// use slack_lib::{SlackClient, auth::StaticTokenProvider};
/// use slack_lib::retry::RateLimitErrorRetryHandler;
///
/// let client = SlackClient::builder()
///     .token_provider(StaticTokenProvider::new("xoxb-..."))
///     .retry_handler(RateLimitErrorRetryHandler::default())
///     .build();
///
/// let identity = client.auth_test().await?;
/// ```
#[derive(Clone)]
pub struct SlackClient {
    pub(crate) inner: Arc<SlackClientInner>,
}

pub(crate) struct SlackClientInner {
    pub(crate) base_url: String,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) retry: RetryOrchestrator,
}

/// Transport layer that resolves the bearer token for each physical attempt.
///
/// Wrapping the transport rather than stamping the token once per logical
/// call means a provider that rotates or refreshes tokens takes effect on
/// retried attempts. A request that already carries an `Authorization`
/// header (for example one staged by a retry handler) is sent as-is.
struct AuthorizingTransport {
    provider: Arc<dyn TokenProvider>,
    inner: Arc<dyn Transport>,
}

#[async_trait]
impl Transport for AuthorizingTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        if request.headers.contains_key(AUTHORIZATION) {
            return self.inner.send(request).await;
        }
        let token = self
            .provider
            .get_token()
            .await
            .map_err(|e| TransportError::Other(format!("token acquisition failed: {e}")))?;
        let bearer = HeaderValue::from_str(&token.as_bearer())
            .map_err(|_| TransportError::Other("token contains invalid characters".into()))?;
        let mut request = request.clone();
        request.headers.insert(AUTHORIZATION, bearer);
        self.inner.send(&request).await
    }
}

impl SlackClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> SlackClientBuilder<Missing> {
        SlackClientBuilder::new()
    }

    /// Returns the base URL API methods are resolved against.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Resolves a Web API method name (`chat.postMessage`) to its URL.
    pub(crate) fn method_url(&self, method: &str) -> Result<String, ApiError> {
        let mut url = Url::parse(&self.inner.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.inner.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.inner.base_url.clone()))?
            .pop_if_empty()
            .push(method);
        Ok(url.into())
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`SlackClient`].
///
/// Uses the typestate pattern so the one required field, the
/// [`TokenProvider`], is enforced at compile time.
pub struct SlackClientBuilder<Provider> {
    token_provider: Provider,
    base_url: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
    transport: Option<Arc<dyn Transport>>,
    retry_handlers: Vec<Arc<dyn RetryHandler>>,
}

impl SlackClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            token_provider: Missing,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            connect_timeout: None,
            http_client: None,
            transport: None,
            retry_handlers: vec![Arc::new(ConnectionErrorRetryHandler::default())],
        }
    }

    /// Sets the token provider for authentication.
    pub fn token_provider<T: TokenProvider + 'static>(
        self,
        provider: T,
    ) -> SlackClientBuilder<Set<Arc<dyn TokenProvider>>> {
        SlackClientBuilder {
            token_provider: Set(Arc::new(provider) as Arc<dyn TokenProvider>),
            base_url: self.base_url,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
            transport: self.transport,
            retry_handlers: self.retry_handlers,
        }
    }
}

impl Default for SlackClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> SlackClientBuilder<P> {
    /// Overrides the API base URL.
    ///
    /// Defaults to `https://slack.com/api`. Mostly useful for pointing at a
    /// local stub server in tests.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets a custom transport, bypassing reqwest entirely.
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Appends a retry handler to the registration order.
    ///
    /// Handlers are consulted in the order they were added. The default list
    /// contains a single [`ConnectionErrorRetryHandler`].
    pub fn retry_handler<H: RetryHandler + 'static>(mut self, handler: H) -> Self {
        self.retry_handlers.push(Arc::new(handler));
        self
    }

    /// Replaces the retry handler list entirely.
    pub fn retry_handlers(mut self, handlers: Vec<Arc<dyn RetryHandler>>) -> Self {
        self.retry_handlers = handlers;
        self
    }

    /// Disables all retries.
    pub fn no_retry(mut self) -> Self {
        self.retry_handlers.clear();
        self
    }
}

impl SlackClientBuilder<Set<Arc<dyn TokenProvider>>> {
    /// Builds the [`SlackClient`].
    ///
    /// This method is only available once a token provider has been set.
    pub fn build(self) -> SlackClient {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => {
                let http_client = self.http_client.unwrap_or_else(|| {
                    let mut builder = Client::builder();
                    if let Some(timeout) = self.connect_timeout {
                        builder = builder.connect_timeout(timeout);
                    }
                    builder.build().expect("Failed to build HTTP client")
                });
                let mut transport = ReqwestTransport::new(http_client);
                if let Some(timeout) = self.timeout {
                    transport = transport.with_timeout(timeout);
                }
                Arc::new(transport)
            }
        };

        SlackClient {
            inner: Arc::new(SlackClientInner {
                base_url: self.base_url,
                transport: Arc::new(AuthorizingTransport {
                    provider: self.token_provider.0,
                    inner: transport,
                }),
                retry: RetryOrchestrator::new(self.retry_handlers),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::auth::StaticTokenProvider;

    #[test]
    fn test_method_url() {
        let client = SlackClient::builder()
            .token_provider(StaticTokenProvider::new("xoxb-test"))
            .build();
        assert_eq!(
            client.method_url("chat.postMessage").unwrap(),
            "https://slack.com/api/chat.postMessage"
        );
    }

    #[test]
    fn test_method_url_with_trailing_slash() {
        let client = SlackClient::builder()
            .token_provider(StaticTokenProvider::new("xoxb-test"))
            .base_url("http://localhost:8888/api/")
            .build();
        assert_eq!(
            client.method_url("auth.test").unwrap(),
            "http://localhost:8888/api/auth.test"
        );
    }

    #[test]
    fn test_method_url_invalid_base() {
        let client = SlackClient::builder()
            .token_provider(StaticTokenProvider::new("xoxb-test"))
            .base_url("not a url")
            .build();
        assert!(client.method_url("auth.test").is_err());
    }
}
