//! Paginated chat-history state machine.
//!
//! The viewer never performs I/O by itself. Operations that need the backend hand out
//! a ticket ([`FetchTicket`], [`DeleteTicket`]); the caller executes it and feeds the
//! outcome back through `complete_*`. Each fetch ticket is tagged with the page it was
//! issued for, and a completion whose tag no longer matches the requested page is
//! dropped, so a slow response can never overwrite a newer page.
//!
//! The async helpers at the bottom ([`HistoryViewer::load`] and friends) run tickets
//! against a [`HistoryBackend`] for callers that can simply await.

use chrono::{DateTime, Utc};

use super::format::{RecordView, render_record};
use crate::api::{ApiError, HistoryBackend};
use crate::models::{ChatRecord, HistoryPage, Page};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Question put to the user before deleting a record.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this chat?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing requested yet.
    Idle,
    Loading,
    Loaded,
    /// Last fetch failed; previously loaded items remain visible.
    Error(String),
}

/// Interactive yes/no confirmation.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// A page fetch to execute, tagged with the page it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub page: u32,
    pub limit: u32,
}

/// A confirmed delete to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTicket {
    pub id: String,
}

/// Out-of-band message for the view (delete failures).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct HistoryViewer {
    state: ViewState,
    page: Option<Page>,
    requested_page: u32,
    total_pages: Option<u32>,
    page_size: u32,
    expanded: Option<String>,
    pending_delete: Option<String>,
    notifications: Vec<Notification>,
}

impl Default for HistoryViewer {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl HistoryViewer {
    /// An idle viewer on page 1 that has not fetched anything yet.
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            state: ViewState::Idle,
            page: None,
            requested_page: 1,
            total_pages: None,
            page_size: page_size.max(1),
            expanded: None,
            pending_delete: None,
            notifications: Vec::new(),
        }
    }

    /// A viewer already loading page 1, with the fetch to run.
    pub fn open(page_size: u32) -> (Self, FetchTicket) {
        let mut viewer = Self::with_page_size(page_size);
        let ticket = viewer.refresh();
        (viewer, ticket)
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == ViewState::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    /// Records of the last successfully loaded page.
    pub fn items(&self) -> &[ChatRecord] {
        self.page.as_ref().map(|p| p.items.as_slice()).unwrap_or_default()
    }

    /// Page currently requested (and shown once loaded).
    pub fn current_page(&self) -> u32 {
        self.requested_page
    }

    /// Page count reported by the server, 1 until the first load.
    pub fn total_pages(&self) -> u32 {
        self.total_pages.unwrap_or(1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn has_previous(&self) -> bool {
        self.requested_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.requested_page < self.total_pages()
    }

    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.as_deref() == Some(id)
    }

    pub fn is_deleting(&self) -> bool {
        self.pending_delete.is_some()
    }

    fn enter_loading(&mut self) -> FetchTicket {
        self.state = ViewState::Loading;
        FetchTicket { page: self.requested_page, limit: self.page_size }
    }

    /// Re-fetch the current page.
    pub fn refresh(&mut self) -> FetchTicket {
        self.enter_loading()
    }

    /// Move to page `n`, clamped to `[1, total_pages]`. Returns `None` when that is
    /// the page already requested.
    pub fn request_page(&mut self, n: u32) -> Option<FetchTicket> {
        let target = n.clamp(1, self.total_pages());
        if target == self.requested_page {
            return None;
        }
        self.requested_page = target;
        Some(self.enter_loading())
    }

    pub fn next_page(&mut self) -> Option<FetchTicket> {
        self.request_page(self.requested_page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> Option<FetchTicket> {
        self.request_page(self.requested_page.saturating_sub(1))
    }

    /// Apply the outcome of a fetch.
    ///
    /// Returns a follow-up ticket when the server now has fewer pages than the one
    /// requested (e.g. the last record of the last page was deleted).
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<HistoryPage, ApiError>,
    ) -> Option<FetchTicket> {
        if ticket.page != self.requested_page {
            tracing::debug!(
                stale = ticket.page,
                current = self.requested_page,
                "discarding out-of-date history response"
            );
            return None;
        }

        match result {
            Ok(response) => {
                let total_pages = response.total_pages();
                self.total_pages = Some(total_pages);

                if ticket.page > total_pages {
                    tracing::debug!(page = ticket.page, total_pages, "page out of range, clamping");
                    self.requested_page = total_pages;
                    return Some(self.enter_loading());
                }

                self.page = Some(Page::from_response(ticket.page, response));
                self.state = ViewState::Loaded;
                None
            }
            Err(e) => {
                tracing::warn!(page = ticket.page, error = %e, "failed to fetch chat history");
                self.state = ViewState::Error(e.to_string());
                None
            }
        }
    }

    /// Collapse `id` if it is expanded, otherwise expand it (collapsing any other).
    pub fn toggle_expand(&mut self, id: &str) {
        if self.is_expanded(id) {
            self.expanded = None;
        } else {
            self.expanded = Some(id.to_string());
        }
    }

    /// Ask for confirmation, then hand out the delete to execute. `None` when the
    /// user declines or another delete is still in flight.
    pub fn begin_delete(&mut self, id: &str, confirm: &mut dyn Confirm) -> Option<DeleteTicket> {
        if self.pending_delete.is_some() {
            return None;
        }
        if !confirm.confirm(DELETE_PROMPT) {
            return None;
        }
        self.pending_delete = Some(id.to_string());
        Some(DeleteTicket { id: id.to_string() })
    }

    /// Apply the outcome of a delete. Success re-fetches the current page; failure
    /// only queues a notification and leaves the displayed page alone.
    pub fn complete_delete(
        &mut self,
        ticket: DeleteTicket,
        result: Result<(), ApiError>,
    ) -> Option<FetchTicket> {
        if self.pending_delete.as_deref() == Some(ticket.id.as_str()) {
            self.pending_delete = None;
        }

        match result {
            Ok(()) => {
                tracing::debug!(id = %ticket.id, "chat deleted, refreshing page");
                if self.is_expanded(&ticket.id) {
                    self.expanded = None;
                }
                Some(self.refresh())
            }
            Err(e) => {
                tracing::warn!(id = %ticket.id, error = %e, "failed to delete chat");
                self.notifications.push(Notification { text: format!("Failed to delete chat: {}", e) });
                None
            }
        }
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Display rows for the current page; long responses collapsed unless expanded.
    pub fn records(&self, now: &DateTime<Utc>) -> Vec<RecordView> {
        self.items()
            .iter()
            .map(|record| render_record(record, self.is_expanded(&record.id), now))
            .collect()
    }

    /// Run a fetch ticket (and any clamping follow-up) to completion.
    pub async fn run_fetch<B>(&mut self, ticket: FetchTicket, backend: &B)
    where
        B: HistoryBackend + ?Sized,
    {
        let mut next = Some(ticket);
        while let Some(ticket) = next {
            let result = backend.fetch_history(ticket.page, ticket.limit).await;
            next = self.complete_fetch(ticket, result);
        }
    }

    pub async fn load<B>(&mut self, backend: &B)
    where
        B: HistoryBackend + ?Sized,
    {
        let ticket = self.refresh();
        self.run_fetch(ticket, backend).await;
    }

    pub async fn go_to_page<B>(&mut self, n: u32, backend: &B)
    where
        B: HistoryBackend + ?Sized,
    {
        if let Some(ticket) = self.request_page(n) {
            self.run_fetch(ticket, backend).await;
        }
    }

    /// Confirm, delete and refresh. Returns whether the backend accepted the delete.
    pub async fn delete_record<B>(&mut self, id: &str, backend: &B, confirm: &mut dyn Confirm) -> bool
    where
        B: HistoryBackend + ?Sized,
    {
        let Some(ticket) = self.begin_delete(id, confirm) else {
            return false;
        };

        let result = backend.delete_history(&ticket.id).await;
        let deleted = result.is_ok();
        if let Some(fetch) = self.complete_delete(ticket, result) {
            self.run_fetch(fetch, backend).await;
        }
        deleted
    }
}
