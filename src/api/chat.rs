use async_trait::async_trait;
use reqwest::Method;

use super::backend::ChatBackend;
use super::client::{ApiClient, decode};
use super::error::ApiError;
use crate::models::{ChatReply, ChatRequest};

#[async_trait]
impl ChatBackend for ApiClient {
    /// `POST /chat`; refuses to send anything when no session token exists.
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError> {
        let body = serde_json::to_value(request)
            .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;
        let value = self
            .request_authenticated(Method::POST, "/chat", Some(&body))
            .await
            .map_err(|e| e.with_fallback("Backend request failed"))?;
        decode(value)
    }
}
