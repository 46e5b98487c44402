//! Travel Mate client - terminal front end for the Travel Mate tourism backend
//!
//! This library provides the client side of the Travel Mate service:
//!
//! - [`ApiClient`]: JSON-over-HTTP access with bearer credentials and normalized errors
//! - [`HistoryViewer`]: paginated browsing and deletion of past chatbot conversations
//! - [`ChatSession`]: the turn-based tourism chatbot, with places as context
//! - A ratatui front end and a clap CLI over the above
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use travel_mate_client::{ApiClient, HistoryViewer, StaticToken};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let token = StaticToken::new(Some("session-token".to_string()));
//! let client = ApiClient::new("http://localhost:5000/api/gemini", Arc::new(token))?;
//!
//! let mut viewer = HistoryViewer::default();
//! viewer.load(&client).await;
//! println!("{} conversations on page {}", viewer.items().len(), viewer.current_page());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod chat;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod history;
pub mod logging;
pub mod models;
pub mod parsers;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use api::{
    ApiClient, ApiError, ChatBackend, CredentialProvider, HistoryBackend, StaticToken, TokenFile,
};
pub use chat::ChatSession;
pub use config::Config;
pub use history::HistoryViewer;
