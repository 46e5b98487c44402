use async_trait::async_trait;

use super::error::ApiError;
use crate::models::{ChatReply, ChatRequest, HistoryPage};

/// History endpoints the viewer depends on.
#[async_trait]
pub trait HistoryBackend: Send + Sync {
    async fn fetch_history(&self, page: u32, limit: u32) -> Result<HistoryPage, ApiError>;

    async fn delete_history(&self, id: &str) -> Result<(), ApiError>;
}

/// Chat endpoint the chatbot session depends on.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError>;
}
