//! Turn-based chatbot session.
//!
//! A send happens in two phases. [`ChatSession::begin_send`] appends the user's turn
//! right away and returns the request to execute; [`ChatSession::finish_send`]
//! appends the assistant's answer (or an error turn) once the backend replies. The
//! user's turn is never rolled back, even when the send fails.

use super::context::places_context;
use crate::api::{ApiError, AuthFailure, ChatBackend};
use crate::models::{ChatReply, ChatRequest, Place, Transcript, Turn};

pub const GREETING: &str = "👋 Hi! I'm your Lebanon tourism assistant! Ask me about places to visit, restaurants, hotels, or anything about traveling in Lebanon!";

/// Example questions offered before the first message.
pub const QUICK_QUESTIONS: &[&str] = &[
    "Best restaurants in Beirut?",
    "Hotels in Byblos?",
    "Things to do in Baalbek?",
    "Beaches near Jounieh?",
];

/// Prefix of every assistant turn that reports a failure.
pub const FAILURE_MARKER: &str = "❌";

pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to use the chatbot";
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";
pub const BACKEND_FAILED_MESSAGE: &str = "Backend request failed";
pub const NO_RESPONSE_MESSAGE: &str = "Failed to get response";
pub const GENERIC_ERROR_MESSAGE: &str = "Sorry, I encountered an error. Please make sure you're logged in and the backend is running!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendState {
    Idle,
    Sending,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    transcript: Transcript,
    visible: bool,
    send_state: SendState,
    input: String,
    places: Vec<Place>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ChatSession {
    pub fn new(places: Vec<Place>) -> Self {
        Self {
            transcript: Transcript::new(GREETING),
            visible: false,
            send_state: SendState::Idle,
            input: String::new(),
            places,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the chat window. Does not affect a send in flight.
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn send_state(&self) -> SendState {
        self.send_state
    }

    pub fn is_sending(&self) -> bool {
        self.send_state == SendState::Sending
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn set_places(&mut self, places: Vec<Place>) {
        self.places = places;
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    /// Quick-start questions, offered only while the transcript holds just the greeting.
    pub fn suggestions(&self) -> &'static [&'static str] {
        if self.transcript.only_greeting() { QUICK_QUESTIONS } else { &[] }
    }

    /// Put suggestion `index` in the input and send it immediately.
    pub fn select_suggestion(&mut self, index: usize) -> Option<ChatRequest> {
        let question = self.suggestions().get(index)?;
        self.set_input(*question);
        self.submit_input()
    }

    /// Send whatever is in the input buffer.
    pub fn submit_input(&mut self) -> Option<ChatRequest> {
        let text = self.input.clone();
        self.begin_send(&text)
    }

    /// Start sending `text`. Blank text, or a send already in flight, is a no-op
    /// returning `None`; otherwise the user's turn is appended immediately.
    pub fn begin_send(&mut self, text: &str) -> Option<ChatRequest> {
        let message = text.trim();
        if message.is_empty() || self.is_sending() {
            return None;
        }

        self.input.clear();
        self.transcript.push(Turn::user(message));
        self.send_state = SendState::Sending;
        tracing::debug!(turns = self.transcript.len(), "sending chat message");

        Some(ChatRequest { message: message.to_string(), places_context: places_context(&self.places) })
    }

    /// Append the outcome of the send started by [`begin_send`](Self::begin_send).
    pub fn finish_send(&mut self, result: Result<ChatReply, ApiError>) {
        let content = match result {
            Ok(ChatReply { success: true, response: Some(response), .. }) => response,
            Ok(ChatReply { success: true, response: None, .. }) => failure(NO_RESPONSE_MESSAGE),
            Ok(ChatReply { success: false, error, .. }) => {
                let message = error.filter(|e| !e.trim().is_empty());
                failure(message.as_deref().unwrap_or(NO_RESPONSE_MESSAGE))
            }
            Err(e) => {
                tracing::warn!(error = %e, "chat request failed");
                failure(error_message(&e))
            }
        };

        self.transcript.push(Turn::assistant(content));
        self.send_state = SendState::Idle;
    }

    /// Send `text` and wait for the answer. Returns `false` when the call was a no-op.
    pub async fn send_message<B>(&mut self, text: &str, backend: &B) -> bool
    where
        B: ChatBackend + ?Sized,
    {
        let Some(request) = self.begin_send(text) else {
            return false;
        };
        let result = backend.send_chat(&request).await;
        self.finish_send(result);
        true
    }
}

fn failure(message: &str) -> String {
    format!("{} {}", FAILURE_MARKER, message)
}

fn error_message(error: &ApiError) -> &'static str {
    match error {
        ApiError::AuthRequired { failure: AuthFailure::MissingCredential, .. } => LOGIN_REQUIRED_MESSAGE,
        ApiError::AuthRequired { failure: AuthFailure::Rejected, .. } => SESSION_EXPIRED_MESSAGE,
        ApiError::Http { .. } => BACKEND_FAILED_MESSAGE,
        ApiError::Network(_) | ApiError::MalformedResponse(_) => GENERIC_ERROR_MESSAGE,
    }
}
