//! TUI application state and event handling.
//!
//! One [`App`] drives either screen: the paginated chat-history browser or the
//! tourism chatbot. The event loop is synchronous; backend calls are spawned on the
//! tokio runtime and their results come back over a channel, which the loop drains
//! every tick before drawing. The history viewer and chat session decide what a
//! late or failed result means, the app only routes them.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Utc;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::events::{Action, KeyMode, poll_event};
use super::rendering::{ChatRenderState, HistoryRenderState, render_chat, render_history};
use crate::api::{ApiError, ChatBackend, HistoryBackend};
use crate::chat::ChatSession;
use crate::clipboard::copy_to_clipboard;
use crate::history::{DeleteTicket, FetchTicket, HistoryViewer};
use crate::models::{ChatReply, ChatRequest, HistoryPage, Place};

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Longest chat input accepted from the keyboard
const MAX_INPUT_CHARS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    History,
    Chat,
}

/// Result of a spawned backend call
enum Completion {
    Fetched(FetchTicket, Result<HistoryPage, ApiError>),
    Deleted(DeleteTicket, Result<(), ApiError>),
    Replied(Result<ChatReply, ApiError>),
}

/// Record the delete modal is asking about, captured when it opened
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingConfirm {
    id: String,
    prompt: String,
}

pub struct App {
    screen: Screen,
    viewer: HistoryViewer,
    session: ChatSession,
    history: Arc<dyn HistoryBackend>,
    chat: Arc<dyn ChatBackend>,
    runtime: Handle,
    completions_tx: UnboundedSender<Completion>,
    completions_rx: UnboundedReceiver<Completion>,
    selected_idx: usize,
    confirming: Option<PendingConfirm>,
    should_quit: bool,
    status_message: Option<StatusMessage>,
    // Dirty state tracking for efficient rendering
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(
        screen: Screen,
        history: Arc<dyn HistoryBackend>,
        chat: Arc<dyn ChatBackend>,
        runtime: Handle,
    ) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        Self {
            screen,
            viewer: HistoryViewer::default(),
            session: ChatSession::default(),
            history,
            chat,
            runtime,
            completions_tx,
            completions_rx,
            selected_idx: 0,
            confirming: None,
            should_quit: false,
            status_message: None,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.viewer = HistoryViewer::with_page_size(page_size);
        self
    }

    pub fn with_places(mut self, places: Vec<Place>) -> Self {
        self.session.set_places(places);
        self
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Fetch the first history page, or open the chat panel.
    fn start(&mut self) {
        match self.screen {
            Screen::History => {
                let ticket = self.viewer.refresh();
                self.spawn_fetch(ticket);
            }
            Screen::Chat => {
                if !self.session.is_visible() {
                    self.session.toggle();
                }
            }
        }
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    fn check_and_clear_expired_status(&mut self) {
        if self.status_message.as_ref().is_some_and(|msg| Instant::now() >= msg.expires_at) {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    fn key_mode(&self) -> KeyMode {
        match self.screen {
            Screen::History if self.confirming.is_some() => KeyMode::Confirming,
            Screen::History => KeyMode::Browse,
            Screen::Chat => KeyMode::Typing,
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.start();

        while !self.should_quit {
            self.check_and_clear_expired_status();
            self.process_completions();

            // Draw if dirty or if it's been >100ms (relative times and resizes)
            let now = Instant::now();
            if self.needs_redraw || now.duration_since(self.last_draw_time) >= Duration::from_millis(100)
            {
                terminal.draw(|f| self.draw(f))?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(100), self.key_mode())?;
            self.handle_action(action);
        }

        Ok(())
    }

    fn draw(&self, frame: &mut ratatui::Frame) {
        match self.screen {
            Screen::History => {
                let records = self.viewer.records(&Utc::now());
                let state = HistoryRenderState {
                    records: &records,
                    selected_idx: self.selected_idx,
                    current_page: self.viewer.current_page(),
                    total_pages: self.viewer.total_pages(),
                    loading: self.viewer.is_loading(),
                    error: self.viewer.error(),
                    confirming_delete: self.confirming.as_ref().map(|c| c.prompt.as_str()),
                    status_message: self.status_message.as_ref(),
                };
                render_history(frame, &state);
            }
            Screen::Chat => {
                let state = ChatRenderState {
                    turns: self.session.transcript().turns(),
                    visible: self.session.is_visible(),
                    sending: self.session.is_sending(),
                    suggestions: self.session.suggestions(),
                    input: self.session.input(),
                    status_message: self.status_message.as_ref(),
                };
                render_chat(frame, &state);
            }
        }
    }

    fn spawn_fetch(&self, ticket: FetchTicket) {
        let backend = Arc::clone(&self.history);
        let tx = self.completions_tx.clone();
        self.runtime.spawn(async move {
            let result = backend.fetch_history(ticket.page, ticket.limit).await;
            // Receiver gone means the app has exited
            let _ = tx.send(Completion::Fetched(ticket, result));
        });
    }

    fn spawn_delete(&self, ticket: DeleteTicket) {
        let backend = Arc::clone(&self.history);
        let tx = self.completions_tx.clone();
        self.runtime.spawn(async move {
            let result = backend.delete_history(&ticket.id).await;
            let _ = tx.send(Completion::Deleted(ticket, result));
        });
    }

    fn spawn_send(&self, request: ChatRequest) {
        let backend = Arc::clone(&self.chat);
        let tx = self.completions_tx.clone();
        self.runtime.spawn(async move {
            let result = backend.send_chat(&request).await;
            let _ = tx.send(Completion::Replied(result));
        });
    }

    /// Apply every backend result that has arrived since the last tick.
    fn process_completions(&mut self) {
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.apply_completion(completion);
        }
    }

    fn apply_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Fetched(ticket, result) => {
                if let Some(next) = self.viewer.complete_fetch(ticket, result) {
                    self.spawn_fetch(next);
                }
                self.clamp_selection();
            }
            Completion::Deleted(ticket, result) => {
                let deleted = result.is_ok();
                if let Some(fetch) = self.viewer.complete_delete(ticket, result) {
                    self.spawn_fetch(fetch);
                }
                for notification in self.viewer.drain_notifications() {
                    self.set_status(
                        format!("✗ {}", notification.text),
                        MessageType::Error,
                        STATUS_ERROR_DURATION_MS,
                    );
                }
                if deleted {
                    self.set_status("✓ Chat deleted", MessageType::Success, STATUS_SUCCESS_DURATION_MS);
                }
            }
            Completion::Replied(result) => self.session.finish_send(result),
        }
        self.needs_redraw = true;
    }

    fn handle_action(&mut self, action: Action) {
        if action == Action::Quit {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::History => self.handle_history_action(action),
            Screen::Chat => self.handle_chat_action(action),
        }
    }

    fn handle_history_action(&mut self, action: Action) {
        match action {
            Action::MoveUp => self.move_selection(-1),
            Action::MoveDown => self.move_selection(1),
            Action::PreviousPage => {
                let ticket = self.viewer.previous_page();
                self.change_page(ticket);
            }
            Action::NextPage => {
                let ticket = self.viewer.next_page();
                self.change_page(ticket);
            }
            Action::ToggleExpand => {
                if let Some(id) = self.selected_id() {
                    self.viewer.toggle_expand(&id);
                    self.needs_redraw = true;
                }
            }
            Action::Delete => {
                if self.viewer.is_deleting() {
                    return;
                }
                if let Some(record) = self.viewer.items().get(self.selected_idx) {
                    self.confirming =
                        Some(PendingConfirm { id: record.id.clone(), prompt: record.prompt.clone() });
                    self.needs_redraw = true;
                }
            }
            Action::ConfirmYes => {
                self.needs_redraw = true;
                if let Some(pending) = self.confirming.take() {
                    // The modal already asked, about this id
                    let ticket = self.viewer.begin_delete(&pending.id, &mut |_: &str| true);
                    if let Some(ticket) = ticket {
                        self.spawn_delete(ticket);
                    }
                }
            }
            Action::ConfirmNo => {
                self.confirming = None;
                self.needs_redraw = true;
            }
            Action::Refresh => {
                let ticket = self.viewer.refresh();
                self.spawn_fetch(ticket);
                self.needs_redraw = true;
            }
            Action::CopyToClipboard => self.copy_selected(),
            _ => {}
        }
    }

    fn handle_chat_action(&mut self, action: Action) {
        // Only Tab reaches a hidden panel
        if !self.session.is_visible() && action != Action::ToggleChat {
            return;
        }

        match action {
            Action::ToggleChat => self.session.toggle(),
            Action::TypeChar(c) => {
                if self.session.input().chars().count() < MAX_INPUT_CHARS {
                    self.session.push_char(c);
                }
            }
            Action::DeleteChar => self.session.pop_char(),
            Action::Submit => {
                if let Some(request) = self.session.submit_input() {
                    self.spawn_send(request);
                }
            }
            Action::Suggestion(index) => {
                if let Some(request) = self.session.select_suggestion(index) {
                    self.spawn_send(request);
                }
            }
            Action::None => return,
            _ => {}
        }
        self.needs_redraw = true;
    }

    fn change_page(&mut self, ticket: Option<FetchTicket>) {
        if let Some(ticket) = ticket {
            self.selected_idx = 0;
            self.spawn_fetch(ticket);
            self.needs_redraw = true;
        }
    }

    fn selected_id(&self) -> Option<String> {
        self.viewer.items().get(self.selected_idx).map(|record| record.id.clone())
    }

    fn move_selection(&mut self, delta: isize) {
        let total = self.viewer.items().len();
        if total == 0 {
            self.selected_idx = 0;
            return;
        }

        let old_idx = self.selected_idx;
        let new_idx = self.selected_idx.saturating_add_signed(delta);
        self.selected_idx = new_idx.min(total - 1);

        if old_idx != self.selected_idx {
            self.needs_redraw = true;
        }
    }

    fn clamp_selection(&mut self) {
        let total = self.viewer.items().len();
        self.selected_idx = self.selected_idx.min(total.saturating_sub(1));
    }

    fn copy_selected(&mut self) {
        let Some(record) = self.viewer.items().get(self.selected_idx) else {
            self.set_status("✗ No conversation to copy", MessageType::Error, STATUS_ERROR_DURATION_MS);
            return;
        };

        match copy_to_clipboard(&record.response) {
            Ok(()) => {
                self.set_status("✓ Copied to clipboard", MessageType::Success, STATUS_SUCCESS_DURATION_MS)
            }
            Err(e) => self.set_status(
                format!("✗ Clipboard error: {}", e),
                MessageType::Error,
                STATUS_ERROR_DURATION_MS,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::TimeZone;

    use super::*;
    use crate::api::AuthFailure;
    use crate::chat::QUICK_QUESTIONS;
    use crate::models::{ChatRecord, Pagination, Role};

    fn record(id: &str) -> ChatRecord {
        ChatRecord {
            id: id.to_string(),
            prompt: format!("prompt {}", id),
            response: format!("response {}", id),
            created_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        }
    }

    fn page_of(ids: &[&str], total_pages: u32) -> HistoryPage {
        HistoryPage {
            chats: ids.iter().map(|id| record(id)).collect(),
            pagination: Some(Pagination { total_pages: Some(total_pages) }),
        }
    }

    /// Serves pages from a list, records every call
    struct FakeHistory {
        pages: Mutex<Vec<Result<HistoryPage, ApiError>>>,
        delete_result: Mutex<Option<Result<(), ApiError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeHistory {
        fn new(pages: Vec<Result<HistoryPage, ApiError>>) -> Arc<Self> {
            Arc::new(Self {
                pages: Mutex::new(pages),
                delete_result: Mutex::new(None),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HistoryBackend for FakeHistory {
        async fn fetch_history(&self, page: u32, limit: u32) -> Result<HistoryPage, ApiError> {
            self.calls.lock().unwrap().push(format!("fetch {} {}", page, limit));
            let mut pages = self.pages.lock().unwrap();
            if pages.is_empty() { Ok(page_of(&[], 1)) } else { pages.remove(0) }
        }

        async fn delete_history(&self, id: &str) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push(format!("delete {}", id));
            self.delete_result.lock().unwrap().take().unwrap_or(Ok(()))
        }
    }

    struct FakeChat {
        reply: Mutex<Option<Result<ChatReply, ApiError>>>,
    }

    #[async_trait]
    impl ChatBackend for FakeChat {
        async fn send_chat(&self, _request: &ChatRequest) -> Result<ChatReply, ApiError> {
            self.reply.lock().unwrap().take().unwrap_or_else(|| Err(ApiError::missing_credential()))
        }
    }

    fn fake_chat(reply: Result<ChatReply, ApiError>) -> Arc<FakeChat> {
        Arc::new(FakeChat { reply: Mutex::new(Some(reply)) })
    }

    fn history_app(history: Arc<FakeHistory>) -> App {
        let chat = fake_chat(Err(ApiError::missing_credential()));
        App::new(Screen::History, history, chat, Handle::current())
    }

    fn chat_app(chat: Arc<FakeChat>) -> App {
        let mut app = App::new(Screen::Chat, FakeHistory::new(vec![]), chat, Handle::current());
        app.start();
        app
    }

    /// Wait for one spawned call and apply its result
    async fn settle(app: &mut App) {
        let completion = app.completions_rx.recv().await.expect("channel open");
        app.apply_completion(completion);
    }

    #[tokio::test]
    async fn test_start_loads_first_page() {
        let history = FakeHistory::new(vec![Ok(page_of(&["1", "2"], 2))]);
        let mut app = history_app(history.clone());

        app.start();
        assert!(app.viewer.is_loading());
        settle(&mut app).await;

        assert_eq!(app.viewer.items().len(), 2);
        assert_eq!(app.viewer.total_pages(), 2);
        assert_eq!(history.calls(), vec!["fetch 1 10"]);
    }

    #[tokio::test]
    async fn test_chat_screen_does_not_fetch_history() {
        let history = FakeHistory::new(vec![]);
        let chat = fake_chat(Err(ApiError::missing_credential()));
        let mut app = App::new(Screen::Chat, history.clone(), chat, Handle::current());

        app.start();

        assert!(app.completions_rx.try_recv().is_err());
        assert!(history.calls().is_empty());
    }

    #[tokio::test]
    async fn test_move_selection_bounds() {
        let history = FakeHistory::new(vec![Ok(page_of(&["1", "2", "3"], 1))]);
        let mut app = history_app(history);
        app.start();
        settle(&mut app).await;

        app.handle_action(Action::MoveUp);
        assert_eq!(app.selected_idx, 0);

        app.handle_action(Action::MoveDown);
        app.handle_action(Action::MoveDown);
        app.handle_action(Action::MoveDown);
        assert_eq!(app.selected_idx, 2);
    }

    #[tokio::test]
    async fn test_next_page_fetches_and_resets_selection() {
        let history =
            FakeHistory::new(vec![Ok(page_of(&["1", "2"], 2)), Ok(page_of(&["3"], 2))]);
        let mut app = history_app(history.clone()).with_page_size(2);
        app.start();
        settle(&mut app).await;
        app.handle_action(Action::MoveDown);

        app.handle_action(Action::NextPage);
        assert_eq!(app.selected_idx, 0);
        settle(&mut app).await;

        assert_eq!(app.viewer.current_page(), 2);
        assert_eq!(app.viewer.items()[0].id, "3");
        assert_eq!(history.calls(), vec!["fetch 1 2", "fetch 2 2"]);

        // Already on the last page
        app.handle_action(Action::NextPage);
        assert!(app.completions_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_toggle_expand_selected_record() {
        let history = FakeHistory::new(vec![Ok(page_of(&["1", "2"], 1))]);
        let mut app = history_app(history);
        app.start();
        settle(&mut app).await;

        app.handle_action(Action::MoveDown);
        app.handle_action(Action::ToggleExpand);
        assert!(app.viewer.is_expanded("2"));

        app.handle_action(Action::ToggleExpand);
        assert!(!app.viewer.is_expanded("2"));
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let history = FakeHistory::new(vec![Ok(page_of(&["1", "2"], 1))]);
        let mut app = history_app(history.clone());
        app.start();
        settle(&mut app).await;

        app.handle_action(Action::Delete);
        assert_eq!(app.confirming.as_ref().map(|c| c.id.as_str()), Some("1"));
        assert_eq!(app.key_mode(), KeyMode::Confirming);

        app.handle_action(Action::ConfirmNo);
        assert!(app.confirming.is_none());
        assert_eq!(history.calls(), vec!["fetch 1 10"]);
    }

    #[tokio::test]
    async fn test_confirmed_delete_refetches_page() {
        let history = FakeHistory::new(vec![Ok(page_of(&["1", "2"], 1)), Ok(page_of(&["2"], 1))]);
        let mut app = history_app(history.clone());
        app.start();
        settle(&mut app).await;

        app.handle_action(Action::Delete);
        app.handle_action(Action::ConfirmYes);
        settle(&mut app).await; // delete
        settle(&mut app).await; // re-fetch

        assert_eq!(history.calls(), vec!["fetch 1 10", "delete 1", "fetch 1 10"]);
        assert_eq!(app.viewer.items().len(), 1);
        let status = app.status_message.as_ref().unwrap();
        assert_eq!(status.message_type, MessageType::Success);
    }

    #[tokio::test]
    async fn test_failed_delete_shows_error_and_keeps_page() {
        let history = FakeHistory::new(vec![Ok(page_of(&["1", "2"], 1))]);
        *history.delete_result.lock().unwrap() =
            Some(Err(ApiError::Http { status: 500, message: Some("Failed to delete chat".into()) }));
        let mut app = history_app(history.clone());
        app.start();
        settle(&mut app).await;

        app.handle_action(Action::Delete);
        app.handle_action(Action::ConfirmYes);
        settle(&mut app).await;

        assert_eq!(app.viewer.items().len(), 2);
        let status = app.status_message.as_ref().unwrap();
        assert_eq!(status.message_type, MessageType::Error);
        assert!(status.text.contains("Failed to delete chat"));
        assert_eq!(history.calls(), vec!["fetch 1 10", "delete 1"]);
    }

    #[tokio::test]
    async fn test_selection_clamped_when_page_shrinks() {
        let history = FakeHistory::new(vec![Ok(page_of(&["1", "2", "3"], 1)), Ok(page_of(&["1"], 1))]);
        let mut app = history_app(history);
        app.start();
        settle(&mut app).await;
        app.handle_action(Action::MoveDown);
        app.handle_action(Action::MoveDown);

        app.handle_action(Action::Refresh);
        settle(&mut app).await;

        assert_eq!(app.selected_idx, 0);
    }

    #[tokio::test]
    async fn test_copy_with_no_records() {
        let history = FakeHistory::new(vec![Ok(page_of(&[], 1))]);
        let mut app = history_app(history);
        app.start();
        settle(&mut app).await;

        app.handle_action(Action::CopyToClipboard);

        let status = app.status_message.as_ref().unwrap();
        assert_eq!(status.message_type, MessageType::Error);
        assert!(status.text.contains("No conversation"));
    }

    #[tokio::test]
    async fn test_chat_submit_round_trip() {
        let reply = ChatReply { success: true, response: Some("Visit Byblos.".into()), error: None };
        let mut app = chat_app(fake_chat(Ok(reply)));

        for c in "Where to go?".chars() {
            app.handle_action(Action::TypeChar(c));
        }
        app.handle_action(Action::Submit);
        assert!(app.session.is_sending());
        settle(&mut app).await;

        let turns = app.session.transcript().turns();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[1].content, "Where to go?");
        assert_eq!(turns[2].role, Role::Assistant);
        assert_eq!(turns[2].content, "Visit Byblos.");
    }

    #[tokio::test]
    async fn test_chat_suggestion_sends_question() {
        let rejected = ApiError::AuthRequired { failure: AuthFailure::Rejected, message: None };
        let mut app = chat_app(fake_chat(Err(rejected)));

        app.handle_action(Action::Suggestion(0));
        settle(&mut app).await;

        let turns = app.session.transcript().turns();
        assert_eq!(turns[1].content, QUICK_QUESTIONS[0]);
        assert_eq!(turns[2].content, "❌ Session expired. Please log in again.");
    }

    #[tokio::test]
    async fn test_hidden_chat_ignores_typing() {
        let mut app = chat_app(fake_chat(Err(ApiError::missing_credential())));

        app.handle_action(Action::ToggleChat);
        app.handle_action(Action::TypeChar('a'));
        assert_eq!(app.session.input(), "");

        app.handle_action(Action::ToggleChat);
        app.handle_action(Action::TypeChar('a'));
        assert_eq!(app.session.input(), "a");
    }

    #[tokio::test]
    async fn test_delete_targets_record_shown_when_modal_opened() {
        let history = FakeHistory::new(vec![
            Ok(page_of(&["1", "2"], 2)),
            Ok(page_of(&["21", "22"], 2)),
            Ok(page_of(&["21", "22"], 2)),
        ]);
        let mut app = history_app(history.clone());
        app.start();
        settle(&mut app).await;

        // Page 2 arrives while the modal for record "1" is open
        app.handle_action(Action::NextPage);
        assert_eq!(app.viewer.items()[0].id, "1");
        app.handle_action(Action::Delete);
        settle(&mut app).await;
        assert_eq!(app.viewer.items()[0].id, "21");

        app.handle_action(Action::ConfirmYes);
        settle(&mut app).await;

        assert!(app.confirming.is_none());
        assert_eq!(history.calls()[..3], ["fetch 1 10", "fetch 2 10", "delete 1"]);
    }

    #[tokio::test]
    async fn test_confirm_modal_shows_record_prompt() {
        let history = FakeHistory::new(vec![Ok(page_of(&["7"], 1))]);
        let mut app = history_app(history);
        app.start();
        settle(&mut app).await;

        app.handle_action(Action::Delete);

        let pending = app.confirming.as_ref().unwrap();
        assert_eq!(pending.prompt, "prompt 7");
    }

    #[tokio::test]
    async fn test_hidden_chat_ignores_submit_and_suggestions() {
        let mut app = chat_app(fake_chat(Err(ApiError::missing_credential())));
        app.handle_action(Action::TypeChar('h'));
        app.handle_action(Action::TypeChar('i'));
        app.handle_action(Action::ToggleChat);

        app.handle_action(Action::DeleteChar);
        app.handle_action(Action::Submit);
        app.handle_action(Action::Suggestion(0));

        assert_eq!(app.session.input(), "hi");
        assert_eq!(app.session.transcript().len(), 1);
        assert!(!app.session.is_sending());
        assert!(app.completions_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_quit() {
        let mut app = chat_app(fake_chat(Err(ApiError::missing_credential())));
        assert!(!app.should_quit);

        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_status_message_expiry() {
        let mut app = chat_app(fake_chat(Err(ApiError::missing_credential())));

        app.set_status("Test", MessageType::Success, 0);
        std::thread::sleep(Duration::from_millis(5));
        app.check_and_clear_expired_status();

        assert!(app.status_message.is_none());
    }
}
