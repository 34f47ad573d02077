//! Event handling for the TUI
//!
//! Maps keyboard events to application actions. Routing follows the
//! overlay stack: a loading overlay swallows everything except quit, then
//! the error dialog, the detail modal, and the help overlay each capture
//! input before the normal search screen sees it.

use crate::query::AppState;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

/// Result of handling an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running the event loop
    Continue,
    /// No action taken
    Ignored,
    /// Exit the application
    Quit,
    /// The query text changed and needs re-debouncing
    QueryChanged,
    /// Fetch details for the highlighted row
    OpenDetail,
    /// Close the detail modal
    CloseDetail,
    /// Dismiss the error dialog
    DismissDialog,
    /// Go to the previous page
    PrevPage,
    /// Go to the next page
    NextPage,
    /// Copy the highlighted row's NIM to the clipboard
    CopyNim,
}

/// Handle events while a request is in flight: everything but quit waits
fn handle_loading(key: KeyEvent) -> EventResult {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => EventResult::Quit,
        _ => EventResult::Ignored,
    }
}

/// Handle events while the error dialog is up
fn handle_dialog(key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => EventResult::DismissDialog,
        _ => EventResult::Ignored,
    }
}

/// Handle events while the detail modal is open
fn handle_detail(key: KeyEvent) -> EventResult {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => EventResult::Quit,
        (KeyCode::Enter | KeyCode::Esc, _) => EventResult::CloseDetail,
        _ => EventResult::Ignored,
    }
}

/// Handle events while the help overlay is open: any key closes it
fn handle_help(state: &mut AppState) -> EventResult {
    state.help_open = false;
    EventResult::Continue
}

/// Handle events in the normal search screen
fn handle_normal(state: &mut AppState, key: KeyEvent) -> EventResult {
    match (key.code, key.modifiers) {
        // Exit
        (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => EventResult::Quit,

        // Detail lookup for the highlighted row
        (KeyCode::Enter, _) => EventResult::OpenDetail,

        // Row navigation
        (KeyCode::Up, _) => {
            state.cursor_up();
            EventResult::Continue
        }
        (KeyCode::Down, _) => {
            state.cursor_down();
            EventResult::Continue
        }

        // Pagination (the state methods enforce the boundaries)
        (KeyCode::PageUp, _) => EventResult::PrevPage,
        (KeyCode::PageDown, _) => EventResult::NextPage,

        // Clipboard
        (KeyCode::Char('y'), KeyModifiers::CONTROL) => EventResult::CopyNim,

        // Help overlay
        (KeyCode::F(1), _) => {
            state.help_open = true;
            EventResult::Continue
        }

        // Query editing
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
            state.query_clear();
            EventResult::QueryChanged
        }
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            state.query_push(c);
            EventResult::QueryChanged
        }
        (KeyCode::Backspace, _) => {
            if state.query.is_empty() {
                EventResult::Ignored
            } else {
                state.query_backspace();
                EventResult::QueryChanged
            }
        }
        (KeyCode::Delete, _) => {
            if state.query_cursor >= state.query.len() {
                EventResult::Ignored
            } else {
                state.query_delete();
                EventResult::QueryChanged
            }
        }
        (KeyCode::Left, _) => {
            state.query_cursor_left();
            EventResult::Continue
        }
        (KeyCode::Right, _) => {
            state.query_cursor_right();
            EventResult::Continue
        }

        _ => EventResult::Ignored,
    }
}

/// Route a key event through the overlay stack
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> EventResult {
    if state.is_loading() {
        handle_loading(key)
    } else if state.dialog.is_some() {
        handle_dialog(key)
    } else if state.detail.is_some() {
        handle_detail(key)
    } else if state.help_open {
        handle_help(state)
    } else {
        handle_normal(state, key)
    }
}

/// Poll for events and handle them
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn poll_and_handle(state: &mut AppState, timeout: Duration) -> std::io::Result<EventResult> {
    if !event::poll(timeout)? {
        return Ok(EventResult::Continue);
    }

    let result = match event::read()? {
        Event::Key(key) => handle_key(state, key),
        Event::Resize(_, _) => EventResult::Continue,
        _ => EventResult::Ignored,
    };

    Ok(result)
}
