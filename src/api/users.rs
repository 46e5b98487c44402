use reqwest::Method;
use serde_json::{Value, json};

use super::client::{ApiClient, encode_segment};
use super::error::ApiError;

/// User profile and liked-places endpoints. Payloads are passed through as JSON.
impl ApiClient {
    pub async fn get_profile(&self) -> Result<Value, ApiError> {
        self.request(Method::GET, "/users/profile", None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch profile"))
    }

    pub async fn update_profile(&self, data: &Value) -> Result<Value, ApiError> {
        self.request(Method::PUT, "/users/profile", Some(data))
            .await
            .map_err(|e| e.with_fallback("Failed to update profile"))
    }

    pub async fn get_user_logs(&self, params: &[(String, String)]) -> Result<Value, ApiError> {
        self.request_with_query(Method::GET, "/users/logs", params, None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch logs"))
    }

    pub async fn get_liked_places(&self) -> Result<Value, ApiError> {
        self.request(Method::GET, "/users/liked-places", None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch liked places"))
    }

    pub async fn like_place(&self, place_id: &str, rating: u8) -> Result<Value, ApiError> {
        let body = json!({ "placeId": place_id, "rating": rating });
        self.request(Method::POST, "/users/liked-places", Some(&body))
            .await
            .map_err(|e| e.with_fallback("Failed to rate place"))
    }

    pub async fn unlike_place(&self, place_id: &str) -> Result<Value, ApiError> {
        let path = format!("/users/liked-places/{}", encode_segment(place_id));
        self.request(Method::DELETE, &path, None)
            .await
            .map_err(|e| e.with_fallback("Failed to unlike place"))
    }
}
