//! Chat-history viewing: the paginated [`HistoryViewer`] state machine and the
//! presentation helpers it renders through.

pub mod format;
pub mod viewer;

pub use format::{RecordView, TRUNCATE_AT, format_date, render_record, truncate_response};
pub use viewer::{
    Confirm, DEFAULT_PAGE_SIZE, DELETE_PROMPT, DeleteTicket, FetchTicket, HistoryViewer,
    Notification, ViewState,
};
