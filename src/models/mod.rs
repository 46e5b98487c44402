//! Data models for the Travel Mate backend.
//!
//! - [`ChatRecord`] / [`Page`] - past conversations served by the history endpoint
//! - [`Turn`] / [`Transcript`] - the live chatbot conversation
//! - [`ChatRequest`] / [`ChatReply`] - wire payloads of the chat endpoint
//! - [`Place`] - points of interest used as chatbot context
//!
//! Wire quirks (ids that are numbers or strings, timestamps that are epoch
//! milliseconds or RFC3339) are handled by the `deserializers` module.

pub mod chat;
pub mod history;
pub mod place;

pub use chat::{ChatReply, ChatRequest, Role, Transcript, Turn};
pub use history::{ChatRecord, HistoryPage, Page, Pagination};
pub use place::Place;
