use async_trait::async_trait;
use reqwest::Method;

use super::backend::HistoryBackend;
use super::client::{ApiClient, decode, encode_segment};
use super::error::ApiError;
use crate::models::HistoryPage;

#[async_trait]
impl HistoryBackend for ApiClient {
    async fn fetch_history(&self, page: u32, limit: u32) -> Result<HistoryPage, ApiError> {
        let query = [("page".to_string(), page.to_string()), ("limit".to_string(), limit.to_string())];
        let value = self
            .request_with_query(Method::GET, "/history", &query, None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch chat history"))?;
        decode(value)
    }

    async fn delete_history(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/history/{}", encode_segment(id));
        self.request(Method::DELETE, &path, None)
            .await
            .map_err(|e| e.with_fallback("Failed to delete chat"))?;
        Ok(())
    }
}
