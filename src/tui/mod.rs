//! Interactive screens: the chat-history browser and the tourism chatbot.

mod app;
mod events;
mod layout;
mod rendering;
mod terminal;

use std::sync::Arc;

use anyhow::{Context, Result};
pub use app::{App, Screen};
use tokio::runtime::Handle;

use crate::api::{ChatBackend, HistoryBackend};
use crate::models::Place;
use terminal::TerminalSession;

/// Browse, expand and delete past conversations.
pub fn run_history(
    history: Arc<dyn HistoryBackend>,
    chat: Arc<dyn ChatBackend>,
    page_size: u32,
) -> Result<()> {
    let app = App::new(Screen::History, history, chat, runtime()?).with_page_size(page_size);
    run_app(app)
}

/// Talk to the tourism assistant, with `places` as context.
pub fn run_chat(
    history: Arc<dyn HistoryBackend>,
    chat: Arc<dyn ChatBackend>,
    places: Vec<Place>,
) -> Result<()> {
    let app = App::new(Screen::Chat, history, chat, runtime()?).with_places(places);
    run_app(app)
}

fn runtime() -> Result<Handle> {
    Handle::try_current().context("Interactive screens must run inside the tokio runtime")
}

fn run_app(mut app: App) -> Result<()> {
    let mut session = TerminalSession::enter()?;
    let result = app.run(session.terminal_mut());
    session.leave()?;
    result
}
