use std::sync::Arc;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::credentials::CredentialProvider;
use super::error::{ApiError, AuthFailure};

// Unreserved characters stay readable in a path segment
const SEGMENT_ENCODE_SET: &AsciiSet =
    &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Thin JSON client over one backend base URL.
///
/// Every call reads the bearer token from the injected [`CredentialProvider`].
/// Nothing is cached or retried, and no timeout is configured: a request that never
/// completes keeps its caller waiting.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(concat!("travel-mate/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http, base_url: base_url.into().trim_end_matches('/').to_string(), credentials })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// The current token, or `AuthRequired` without touching the network.
    pub fn require_credential(&self) -> Result<String, ApiError> {
        self.credentials.token().ok_or_else(ApiError::missing_credential)
    }

    /// Issue a request, attaching the bearer token when one is available.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        self.execute(method, path, &[], body, self.credentials.token()).await
    }

    pub async fn request_with_query(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        self.execute(method, path, query, body, self.credentials.token()).await
    }

    /// Like [`request`](Self::request) but fails fast when no token is present.
    pub async fn request_authenticated(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let token = self.require_credential()?;
        self.execute(method, path, &[], body, Some(token)).await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
        token: Option<String>,
    ) -> Result<Value, ApiError> {
        let url = self.url(path);
        tracing::debug!(%method, %url, authenticated = token.is_some(), "sending request");

        let mut builder = self.http.request(method.clone(), &url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(%method, %url, error = %e, "request did not complete");
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| ApiError::Network(e.to_string()))?;
        tracing::debug!(%method, %url, status = status.as_u16(), "received response");

        if !status.is_success() {
            let message = error_message(&bytes);
            tracing::warn!(%method, %url, status = status.as_u16(), ?message, "request failed");
            if status == StatusCode::UNAUTHORIZED {
                return Err(ApiError::AuthRequired { failure: AuthFailure::Rejected, message });
            }
            return Err(ApiError::Http { status: status.as_u16(), message });
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| ApiError::MalformedResponse(e.to_string()))
    }
}

/// Percent-encode an opaque id for use as one URL path segment.
pub(crate) fn encode_segment(id: &str) -> String {
    utf8_percent_encode(id, SEGMENT_ENCODE_SET).to_string()
}

/// Decode a successful payload into its typed form.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::MalformedResponse(e.to_string()))
}

/// Human-readable message from a JSON error body (`message`, then `error`).
fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .filter(|message| !message.trim().is_empty())
        .map(str::to_string)
}
