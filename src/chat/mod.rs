//! Tourism chatbot: the [`ChatSession`] transcript state machine and the places
//! context it sends with each question.

pub mod context;
pub mod session;

pub use context::{MAX_CONTEXT_PLACES, places_context};
pub use session::{ChatSession, GREETING, QUICK_QUESTIONS, SendState};
