//! Application state for the student search
//!
//! Owns every piece of mutable UI state - query text, pagination window,
//! result list, detail record, per-request status - and exposes discrete
//! transitions for each event (input change, debounce fire, fetch
//! resolve/reject, pagination, detail open/close). Responses carry the
//! sequence number of the request that produced them; a response whose
//! sequence is no longer current is discarded, so out-of-order network
//! completions can never display stale data.

use std::time::{Duration, Instant};

use crate::api::{ApiError, StudentDetail, StudentSummary};

/// Overlay text while a search request is in flight
pub const LOADING_SEARCH: &str = "Fetching student data...";
/// Overlay text while a detail request is in flight
pub const LOADING_DETAIL: &str = "Getting student details...";

/// Inline notice when a non-empty search matched nothing
pub const NO_RESULTS_NOTICE: &str = "No students found for the given query.";

/// Status of one request concern (search or detail)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestStatus {
    /// Nothing in flight and nothing failed
    #[default]
    Idle,
    /// A request is in flight
    Loading,
    /// The last request failed with this message
    Failed(String),
}

impl RequestStatus {
    /// Whether a request is currently in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Severity of a transient status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Operation succeeded
    Success,
    /// Operation failed
    Error,
    /// Neutral information
    Info,
}

/// A transient status message with timestamp for TTL-based expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    /// Message level
    pub level: MessageLevel,
    /// Message text
    pub text: String,
    /// When the message was created
    pub created_at: Instant,
}

impl StatusMessage {
    /// Create a new status message
    #[must_use]
    pub fn new(level: MessageLevel, text: String) -> Self {
        Self {
            level,
            text,
            created_at: Instant::now(),
        }
    }

    /// Check if the message has expired based on TTL
    #[must_use]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// State for the blocking error dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogState {
    /// Dialog title
    pub title: String,
    /// The failure message to acknowledge
    pub message: String,
}

impl DialogState {
    /// Create an error dialog state
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            message: message.into(),
        }
    }
}

/// Client-side pagination window over the fetched result list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    /// Current page, 1-based
    pub current_page: usize,
    /// Rows per page
    pub page_size: usize,
    /// Length of the fetched result list
    pub total_results: usize,
}

impl PageState {
    /// Create page state for the given page size, starting at page 1
    #[must_use]
    pub const fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size,
            total_results: 0,
        }
    }

    /// Reset to page 1 (the total is left for the next response to set)
    pub const fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Set the current page unconditionally.
    ///
    /// Boundary enforcement is the caller's job; the view disables the
    /// controls instead of this method clamping.
    pub const fn set_page(&mut self, page: usize) {
        self.current_page = page;
    }

    /// Whether the "previous" control is enabled
    #[must_use]
    pub const fn prev_enabled(&self) -> bool {
        self.current_page > 1
    }

    /// Whether the "next" control is enabled
    #[must_use]
    pub const fn next_enabled(&self) -> bool {
        self.current_page * self.page_size < self.total_results
    }

    /// Number of pages the fetched list spans (at least 1)
    #[must_use]
    pub const fn page_count(&self) -> usize {
        if self.total_results == 0 {
            1
        } else {
            self.total_results.div_ceil(self.page_size)
        }
    }

    /// Index bounds of the current page's slice
    #[must_use]
    pub fn slice_bounds(&self) -> (usize, usize) {
        let start = self.current_page.saturating_sub(1).saturating_mul(self.page_size);
        let end = (start + self.page_size).min(self.total_results);
        (start.min(end), end)
    }
}

/// All mutable state owned by the search component
#[derive(Debug)]
pub struct AppState {
    /// Raw search input text
    pub query: String,
    /// Cursor position within the query string
    pub query_cursor: usize,
    /// Fetched result list, replaced wholesale per search
    pub results: Vec<StudentSummary>,
    /// Pagination window over `results`
    pub pages: PageState,
    /// Row cursor within the current page slice
    pub cursor: usize,
    /// Detail record; the modal is visible iff this is `Some`
    pub detail: Option<StudentDetail>,
    /// Id of the row whose detail was last requested
    pub selected_id: Option<String>,
    /// Search request status
    pub search_status: RequestStatus,
    /// Detail request status
    pub detail_status: RequestStatus,
    /// Inline error text, retained until the next successful search
    pub inline_error: Option<String>,
    /// Blocking error dialog, if one is showing
    pub dialog: Option<DialogState>,
    /// Whether the help overlay is open
    pub help_open: bool,
    /// Transient status messages
    pub messages: Vec<StatusMessage>,
    /// Message TTL for auto-expiry
    pub message_ttl: Duration,
    /// Whether the event loop should exit
    pub should_exit: bool,
    /// Last debounced term that was applied
    last_term: String,
    /// Sequence of the most recently issued search request
    search_seq: u64,
    /// Sequence of the most recently issued detail request
    detail_seq: u64,
}

impl AppState {
    /// Create state with the given page size
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            query: String::new(),
            query_cursor: 0,
            results: Vec::new(),
            pages: PageState::new(page_size),
            cursor: 0,
            detail: None,
            selected_id: None,
            search_status: RequestStatus::Idle,
            detail_status: RequestStatus::Idle,
            inline_error: None,
            dialog: None,
            help_open: false,
            messages: Vec::new(),
            message_ttl: Duration::from_secs(5),
            should_exit: false,
            last_term: String::new(),
            search_seq: 0,
            detail_seq: 0,
        }
    }

    // -- Query editing ------------------------------------------------

    /// Replace the whole query (used for a CLI-provided initial term)
    pub fn set_query(&mut self, value: &str) {
        self.query = value.to_string();
        self.query_cursor = self.query.len();
    }

    /// Insert a character at the query cursor
    pub fn query_push(&mut self, c: char) {
        self.query.insert(self.query_cursor, c);
        self.query_cursor += c.len_utf8();
    }

    /// Remove the character before the query cursor
    pub fn query_backspace(&mut self) {
        if self.query_cursor > 0 {
            let prev = self.query[..self.query_cursor]
                .char_indices()
                .next_back()
                .map_or(0, |(i, _)| i);
            self.query.remove(prev);
            self.query_cursor = prev;
        }
    }

    /// Delete the character under the query cursor
    pub fn query_delete(&mut self) {
        if self.query_cursor < self.query.len() {
            self.query.remove(self.query_cursor);
        }
    }

    /// Move the query cursor left one character
    pub fn query_cursor_left(&mut self) {
        if self.query_cursor > 0 {
            self.query_cursor = self.query[..self.query_cursor]
                .char_indices()
                .next_back()
                .map_or(0, |(i, _)| i);
        }
    }

    /// Move the query cursor right one character
    pub fn query_cursor_right(&mut self) {
        if self.query_cursor < self.query.len() {
            self.query_cursor = self.query[self.query_cursor..]
                .char_indices()
                .nth(1)
                .map_or(self.query.len(), |(i, _)| self.query_cursor + i);
        }
    }

    /// Clear the query
    pub fn query_clear(&mut self) {
        self.query.clear();
        self.query_cursor = 0;
    }

    // -- Search lifecycle ---------------------------------------------

    /// Apply a settled debounced term.
    ///
    /// Resets the page to 1. An empty (after trimming) term clears the
    /// result list and issues no request; returns `None`. A new non-empty
    /// term marks the search loading and returns the sequence number the
    /// caller must attach to the request. An unchanged term returns
    /// `None` without touching anything.
    pub fn apply_debounced_term(&mut self, term: &str) -> Option<u64> {
        let trimmed = term.trim();
        if trimmed == self.last_term {
            return None;
        }
        self.last_term = trimmed.to_string();
        self.pages.reset();
        self.cursor = 0;

        if trimmed.is_empty() {
            self.results.clear();
            self.pages.total_results = 0;
            self.inline_error = None;
            self.search_status = RequestStatus::Idle;
            return None;
        }

        self.search_seq += 1;
        self.search_status = RequestStatus::Loading;
        Some(self.search_seq)
    }

    /// The debounced term currently applied (trimmed)
    #[must_use]
    pub fn current_term(&self) -> &str {
        &self.last_term
    }

    /// Apply a search response.
    ///
    /// Returns `false` when the response is stale (its sequence is not the
    /// most recently issued one) and was discarded. On success the result
    /// list is replaced wholesale and the total becomes its length. On
    /// failure the list is cleared, the inline error is set, and the
    /// blocking dialog is raised. Loading always clears.
    pub fn apply_search_response(
        &mut self,
        seq: u64,
        result: Result<Vec<StudentSummary>, ApiError>,
    ) -> bool {
        if seq != self.search_seq {
            return false;
        }

        match result {
            Ok(list) => {
                self.pages.total_results = list.len();
                self.results = list;
                self.cursor = 0;
                self.inline_error = None;
                self.search_status = RequestStatus::Idle;
            }
            Err(err) => {
                let message = err.to_string();
                self.results.clear();
                self.pages.total_results = 0;
                self.cursor = 0;
                self.inline_error = Some(message.clone());
                self.dialog = Some(DialogState::error(message.clone()));
                self.search_status = RequestStatus::Failed(message);
            }
        }
        true
    }

    // -- Detail lifecycle ---------------------------------------------

    /// Begin a detail fetch for the given student id.
    ///
    /// Records the selection, marks the detail request loading, and
    /// returns the sequence number to attach to the request.
    pub fn begin_detail(&mut self, student_id: &str) -> u64 {
        self.selected_id = Some(student_id.to_string());
        self.detail_seq += 1;
        self.detail_status = RequestStatus::Loading;
        self.detail_seq
    }

    /// Apply a detail response.
    ///
    /// Returns `false` when the response is stale and was discarded. On
    /// success the record is stored, which alone makes the modal visible.
    /// On failure the dialog is raised and the result list is left
    /// untouched. Loading always clears.
    pub fn apply_detail_response(
        &mut self,
        seq: u64,
        result: Result<StudentDetail, ApiError>,
    ) -> bool {
        if seq != self.detail_seq {
            return false;
        }

        match result {
            Ok(detail) => {
                self.detail = Some(detail);
                self.detail_status = RequestStatus::Idle;
            }
            Err(err) => {
                let message = err.to_string();
                self.dialog = Some(DialogState::error(message.clone()));
                self.detail_status = RequestStatus::Failed(message);
            }
        }
        true
    }

    /// Close the detail modal by clearing the stored record
    pub fn close_detail(&mut self) {
        self.detail = None;
        self.selected_id = None;
    }

    /// Dismiss the blocking error dialog
    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
    }

    // -- Pagination and row cursor ------------------------------------

    /// The current page's slice of the result list
    #[must_use]
    pub fn page_slice(&self) -> &[StudentSummary] {
        let (start, end) = self.pages.slice_bounds();
        &self.results[start..end]
    }

    /// The row the cursor is on, if any
    #[must_use]
    pub fn current_row(&self) -> Option<&StudentSummary> {
        self.page_slice().get(self.cursor)
    }

    /// Move the row cursor up within the page
    pub const fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move the row cursor down within the page
    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.page_slice().len() {
            self.cursor += 1;
        }
    }

    /// Go to the previous page when enabled
    pub fn page_prev(&mut self) {
        if self.pages.prev_enabled() {
            self.pages.set_page(self.pages.current_page - 1);
            self.cursor = 0;
        }
    }

    /// Go to the next page when enabled
    pub fn page_next(&mut self) {
        if self.pages.next_enabled() {
            self.pages.set_page(self.pages.current_page + 1);
            self.cursor = 0;
        }
    }

    // -- Derived view state -------------------------------------------

    /// Whether any request is in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.search_status.is_loading() || self.detail_status.is_loading()
    }

    /// The loading overlay message, when one applies.
    ///
    /// The detail message wins if both requests are somehow in flight,
    /// since it was issued by the most recent user action.
    #[must_use]
    pub const fn loading_message(&self) -> Option<&'static str> {
        if self.detail_status.is_loading() {
            Some(LOADING_DETAIL)
        } else if self.search_status.is_loading() {
            Some(LOADING_SEARCH)
        } else {
            None
        }
    }

    /// Whether the "no students found" notice should show: not loading,
    /// no error, a non-empty search term, and an empty result list.
    #[must_use]
    pub fn show_no_results(&self) -> bool {
        !self.is_loading()
            && self.inline_error.is_none()
            && !self.query.trim().is_empty()
            && self.results.is_empty()
    }

    // -- Status messages ----------------------------------------------

    /// Add a transient status message
    pub fn add_message(&mut self, level: MessageLevel, text: String) {
        self.messages.push(StatusMessage::new(level, text));
    }

    /// Get non-expired messages
    #[must_use]
    pub fn active_messages(&self) -> Vec<&StatusMessage> {
        self.messages
            .iter()
            .filter(|m| !m.is_expired(self.message_ttl))
            .collect()
    }

    /// Drop expired messages
    pub fn cleanup_messages(&mut self) {
        let ttl = self.message_ttl;
        self.messages.retain(|m| !m.is_expired(ttl));
    }
}
