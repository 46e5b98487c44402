//! HTTP access to the Travel Mate backend.
//!
//! [`ApiClient`] owns request construction, bearer credentials and error
//! normalization into [`ApiError`]. The history and chat endpoints are exposed
//! through the [`HistoryBackend`] and [`ChatBackend`] traits so the state machines
//! can be driven by test doubles; the user endpoints are inherent methods.

pub mod backend;
mod chat;
pub mod client;
pub mod credentials;
pub mod error;
mod history;
mod users;

pub use backend::{ChatBackend, HistoryBackend};
pub use client::ApiClient;
pub use credentials::{CredentialProvider, StaticToken, TokenFile};
pub use error::{ApiError, AuthFailure};
