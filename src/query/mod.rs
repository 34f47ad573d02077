//! Query controller - debounced search and detail lookup lifecycle
//!
//! This module owns everything between the keystroke and the rendered
//! result: the debounce timer, the application state machine, and the
//! background fetch worker. It is UI-agnostic so the ratatui frontend and
//! the tests drive the same logic.
//!
//! # Architecture
//!
//! - `debounce`: deadline-based debouncer polled once per UI tick
//! - `state`: explicit state machine for query, pagination, results,
//!   detail record, and per-request status
//! - `fetch`: background request threads reporting over an mpsc channel,
//!   with sequence numbers so stale responses are discarded
//!
//! # Control flow
//!
//! ```text
//! keystroke -> AppState query edit -> Debouncer::observe
//!     tick -> Debouncer::poll_ready -> AppState::apply_debounced_term
//!          -> FetchHandle::spawn_search (seq N)
//!     tick -> FetchHandle::try_recv -> AppState::apply_search_response
//!             (dropped unless seq N is still current)
//! ```

pub mod debounce;
pub mod fetch;
pub mod state;

pub use debounce::Debouncer;
pub use fetch::{FetchHandle, FetchReply};
pub use state::{AppState, DialogState, MessageLevel, PageState, RequestStatus};
