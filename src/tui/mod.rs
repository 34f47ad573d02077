//! Interactive search TUI
//!
//! Ties the query controller to the terminal: a 50ms tick loop that
//! drains fetch replies, polls the debouncer, redraws, and routes key
//! events.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                run_loop                     │
//! └───────┬──────────────┬──────────────┬───────┘
//!         ▼              ▼              ▼
//! ┌──────────────┐ ┌───────────┐ ┌───────────┐
//! │  FetchHandle │ │  Ratatui  │ │ Crossterm │
//! │  (requests)  │ │ (widgets) │ │  (events) │
//! └──────────────┘ └───────────┘ └───────────┘
//! ```

pub mod events;
pub mod theme;
pub mod widgets;

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
};

use crate::DiktiError;
use crate::api::ApiClient;
use crate::config::DiktiConfig;
use crate::query::{AppState, Debouncer, FetchHandle, FetchReply, MessageLevel};
use self::events::EventResult;
use self::theme::Theme;
use self::widgets::{
    DetailModal, ErrorDialog, HelpBar, HelpOverlay, LoadingOverlay, PaginationBar, ResultsTable,
    SearchBar, StatusLine,
};

/// Event poll timeout per tick
const TICK: Duration = Duration::from_millis(50);

/// Run the interactive search TUI
///
/// # Errors
///
/// Returns `DiktiError` if the terminal cannot be set up or an I/O error
/// occurs in the event loop.
pub fn run(config: &DiktiConfig, initial_query: Option<&str>) -> Result<(), DiktiError> {
    let mut terminal = setup_terminal()?;

    // Run the event loop, ensuring cleanup happens
    let result = run_loop(&mut terminal, config, initial_query);

    // Cleanup terminal (always, even on error)
    if let Err(e) = cleanup_terminal() {
        eprintln!("Warning: terminal cleanup failed: {e}");
    }

    result
}

/// Setup terminal for TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, DiktiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(Into::into)
}

/// Cleanup terminal after TUI
fn cleanup_terminal() -> Result<(), DiktiError> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the main event loop
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: &DiktiConfig,
    initial_query: Option<&str>,
) -> Result<(), DiktiError> {
    let client = ApiClient::from_config(config);
    let fetch = FetchHandle::new(client, config.fetch_limit);
    let theme = Theme::default();
    let hints = HelpBar::default_hints();

    let mut state = AppState::new(config.page_size.max(1));
    let mut debouncer = Debouncer::new(config.debounce());
    let mut tick: usize = 0;

    if let Some(query) = initial_query {
        state.set_query(query);
        // A CLI-provided query skips the debounce delay
        debouncer.seed(query, Instant::now());
    }

    loop {
        // Apply completed requests; stale replies are fenced off by their
        // sequence numbers
        while let Some(reply) = fetch.try_recv() {
            match reply {
                FetchReply::Search { seq, result } => {
                    if !state.apply_search_response(seq, result) {
                        log::debug!("dropped stale search response (seq {seq})");
                    }
                }
                FetchReply::Detail { seq, result } => {
                    if !state.apply_detail_response(seq, result) {
                        log::debug!("dropped stale detail response (seq {seq})");
                    }
                }
            }
        }

        // A settled debounced term triggers the next search
        if let Some(term) = debouncer.poll_ready(Instant::now())
            && let Some(seq) = state.apply_debounced_term(&term)
        {
            fetch.spawn_search(seq, term.trim().to_string());
        }

        state.cleanup_messages();

        terminal.draw(|frame| render(frame, &state, &theme, &hints, tick))?;
        tick = tick.wrapping_add(1);

        match events::poll_and_handle(&mut state, TICK)? {
            EventResult::Quit => break,
            EventResult::QueryChanged => debouncer.observe(&state.query),
            EventResult::OpenDetail => {
                if let Some(row) = state.current_row() {
                    let id = row.id.clone();
                    let seq = state.begin_detail(&id);
                    fetch.spawn_detail(seq, id);
                }
            }
            EventResult::CloseDetail => state.close_detail(),
            EventResult::DismissDialog => state.dismiss_dialog(),
            EventResult::PrevPage => state.page_prev(),
            EventResult::NextPage => state.page_next(),
            EventResult::CopyNim => copy_nim(&mut state),
            EventResult::Continue | EventResult::Ignored => {}
        }

        if state.should_exit {
            break;
        }
    }

    Ok(())
}

/// Render the full frame
fn render(frame: &mut Frame, state: &AppState, theme: &Theme, hints: &[widgets::KeyHint], tick: usize) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(5),    // Results table
            Constraint::Length(3), // Pagination bar
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Help bar
        ])
        .split(area);

    frame.render_widget(
        SearchBar::new(&state.query, state.query_cursor, theme),
        main_layout[0],
    );
    frame.render_widget(ResultsTable::new(state, theme), main_layout[1]);
    frame.render_widget(PaginationBar::new(&state.pages, theme), main_layout[2]);

    let messages: Vec<_> = state.active_messages();
    frame.render_widget(StatusLine::new(&messages, theme), main_layout[3]);
    frame.render_widget(HelpBar::new(hints, theme), main_layout[4]);

    // Overlays, bottom-up: detail modal, help, error dialog, loading
    if let Some(detail) = &state.detail {
        frame.render_widget(DetailModal::new(detail, theme), area);
    }
    if state.help_open {
        frame.render_widget(HelpOverlay::new(theme), area);
    }
    if let Some(dialog) = &state.dialog {
        frame.render_widget(ErrorDialog::new(dialog, theme), area);
    }
    if let Some(message) = state.loading_message() {
        frame.render_widget(LoadingOverlay::new(message, theme, tick), area);
    }
}

/// Copy the highlighted row's NIM to the clipboard
fn copy_nim(state: &mut AppState) {
    let Some(nim) = state.current_row().map(|row| row.nim.clone()) else {
        return;
    };

    match arboard::Clipboard::new() {
        Ok(mut clipboard) => match clipboard.set_text(&nim) {
            Ok(()) => {
                state.add_message(MessageLevel::Success, format!("Copied NIM {nim}"));
            }
            Err(e) => {
                state.add_message(MessageLevel::Error, format!("Clipboard error: {e}"));
            }
        },
        Err(e) => {
            state.add_message(MessageLevel::Error, format!("Clipboard unavailable: {e}"));
        }
    }
}
