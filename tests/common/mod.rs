//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Value, json};
use tempfile::TempDir;
use travel_mate_client::{ApiClient, StaticToken};
use wiremock::MockServer;

pub const TOKEN: &str = "test-token";

/// Client for `server` carrying the test bearer token
pub fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri(), Arc::new(StaticToken::new(Some(TOKEN.to_string()))))
        .expect("Failed to build client")
}

/// Client for `server` with no session token at all
pub fn anonymous_client(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri(), Arc::new(StaticToken::default())).expect("Failed to build client")
}

/// A history record as the backend serializes it
pub fn record_json(id: &str) -> Value {
    json!({
        "id": id,
        "prompt": format!("Question {}", id),
        "response": format!("Answer {}", id),
        "createdAt": "2024-05-01T10:00:00Z"
    })
}

/// One page of the history endpoint
pub fn history_body(ids: &[&str], total_pages: u32) -> Value {
    json!({
        "chats": ids.iter().map(|id| record_json(id)).collect::<Vec<_>>(),
        "pagination": { "totalPages": total_pages }
    })
}

pub fn chat_success(response: &str) -> Value {
    json!({ "success": true, "response": response })
}

/// Builder for a temporary home with config, token and places files
pub struct HomeDirBuilder {
    temp_dir: TempDir,
}

impl HomeDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn with_token(self, token: &str) -> Self {
        std::fs::write(self.token_path(), token).expect("Failed to write token");
        self
    }

    pub fn with_places(self, places: &Value) -> Self {
        std::fs::write(self.places_path(), places.to_string()).expect("Failed to write places");
        self
    }

    pub fn token_path(&self) -> PathBuf {
        self.temp_dir.path().join("token")
    }

    pub fn places_path(&self) -> PathBuf {
        self.temp_dir.path().join("places.json")
    }
}

impl Default for HomeDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}
