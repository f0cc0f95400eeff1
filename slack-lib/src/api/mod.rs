//! Web API method calls
//!
//! The Web API is a flat list of methods (`auth.test`, `chat.postMessage`,
//! ...) that all share one calling convention: POST the arguments, get back
//! a JSON envelope with an `ok` flag. [`SlackClient::api_call`] implements
//! that convention once; the typed wrappers here are thin conveniences over
//! it. Every call runs through the client's retry orchestrator, so transient
//! failures are handled the same way for all methods.

use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderValue;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;

use crate::SlackClient;
use crate::error::ApiError;
use crate::error::AuthError;
use crate::error::Error;
use crate::error::SlackErrorDetail;
use crate::http::HttpRequest;
use crate::http::HttpResponse;
use crate::http::RequestBody;

/// Error codes that mean the token itself is bad, surfaced as [`AuthError`]
/// rather than a generic API error.
const TOKEN_ERROR_CODES: &[&str] = &[
    "invalid_auth",
    "not_authed",
    "account_inactive",
    "token_revoked",
    "token_expired",
];

impl SlackClient {
    /// Calls any Web API method.
    ///
    /// Returns the response payload (the envelope minus the `ok` flag) on
    /// success. Errors follow the taxonomy in [`crate::error`]: transport
    /// failures and non-2xx statuses that survived the retry loop, 429 as
    /// [`Error::RateLimit`], `ok: false` envelopes as typed API errors
    /// carrying the Slack error code.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let payload = client
    ///     .api_call("conversations.list", serde_json::json!({"limit": 200}))
    ///     .await?;
    /// ```
    pub async fn api_call(&self, method: &str, params: impl Serialize) -> Result<Value, Error> {
        let url = self.method_url(method)?;
        let params = serde_json::to_value(params)?;

        // The bearer token is not stamped here: the client's transport layer
        // resolves it per physical attempt, so rotated tokens reach retries.
        let mut request = HttpRequest::new(Method::POST, url);
        request.headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        request.body = Some(RequestBody::Json(params));

        let response = self
            .inner
            .retry
            .execute(self.inner.transport.as_ref(), &request)
            .await
            .map_err(ApiError::from)?;

        decode_response(&response)
    }

    /// Checks authentication and returns the calling identity.
    ///
    /// The cheapest way to validate a token and connectivity.
    pub async fn auth_test(&self) -> Result<AuthTestResponse, Error> {
        let payload = self.api_call("auth.test", json!({})).await?;
        serde_json::from_value(payload)
            .map_err(|e| ApiError::parse(format!("auth.test payload: {e}")).into())
    }

    /// Posts a message to a channel.
    pub async fn post_message(
        &self,
        channel: &str,
        text: &str,
    ) -> Result<PostMessageResponse, Error> {
        let payload = self
            .api_call(
                "chat.postMessage",
                json!({ "channel": channel, "text": text }),
            )
            .await?;
        serde_json::from_value(payload)
            .map_err(|e| ApiError::parse(format!("chat.postMessage payload: {e}")).into())
    }
}

/// Classifies a terminal response from the retry loop.
fn decode_response(response: &HttpResponse) -> Result<Value, Error> {
    if response.status == 429 {
        return Err(Error::RateLimit {
            retry_after: response.retry_after(),
        });
    }
    if !response.is_success() {
        return Err(ApiError::http(response.status, response.text()).into());
    }

    let envelope: ApiEnvelope = response
        .json()
        .map_err(|e| ApiError::parse_with_body(e.to_string(), response.text()))?;

    if envelope.ok {
        return Ok(envelope.rest);
    }

    let code = envelope.error.unwrap_or_else(|| "unknown_error".to_string());
    if TOKEN_ERROR_CODES.contains(&code.as_str()) {
        return Err(AuthError::InvalidToken { code }.into());
    }

    let detail = SlackErrorDetail {
        code,
        warning: envelope.warning,
        messages: envelope
            .response_metadata
            .map(|m| m.messages)
            .unwrap_or_default(),
        needed: envelope.needed,
        provided: envelope.provided,
    };
    Err(ApiError::http_with_detail(response.status, detail).into())
}

/// The common Web API response envelope.
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    warning: Option<String>,
    #[serde(default)]
    needed: Option<String>,
    #[serde(default)]
    provided: Option<String>,
    #[serde(default)]
    response_metadata: Option<ResponseMetadata>,
    #[serde(flatten)]
    rest: Value,
}

#[derive(Debug, Deserialize)]
struct ResponseMetadata {
    #[serde(default)]
    messages: Vec<String>,
}

/// Response from `auth.test`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthTestResponse {
    /// Workspace URL.
    pub url: String,
    /// Workspace name.
    pub team: String,
    /// Authenticated user or bot name.
    pub user: String,
    /// Workspace ID.
    pub team_id: String,
    /// Authenticated user ID.
    pub user_id: String,
    /// Bot ID, present for bot tokens.
    #[serde(default)]
    pub bot_id: Option<String>,
}

/// Response from `chat.postMessage`.
#[derive(Debug, Clone, Deserialize)]
pub struct PostMessageResponse {
    /// Channel the message was posted to.
    pub channel: String,
    /// Timestamp identifying the message within the channel.
    pub ts: String,
    /// The posted message object as returned by the API.
    #[serde(default)]
    pub message: Option<Value>,
}
