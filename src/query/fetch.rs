//! Background fetch worker
//!
//! Network requests must not block the UI tick, so each request runs on a
//! short-lived thread and reports back over an mpsc channel the event loop
//! drains once per tick. Replies carry the sequence number of the request
//! that produced them; `AppState` compares it against the most recently
//! issued sequence and discards anything older, so two overlapping
//! requests resolving out of order cannot display stale data.

use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

use crate::api::{ApiClient, ApiError, StudentDetail, StudentSummary};

/// A completed request, tagged with its sequence number
#[derive(Debug)]
pub enum FetchReply {
    /// A search request finished
    Search {
        /// Sequence issued by `AppState::apply_debounced_term`
        seq: u64,
        /// The fetched rows or the failure
        result: Result<Vec<StudentSummary>, ApiError>,
    },
    /// A detail request finished
    Detail {
        /// Sequence issued by `AppState::begin_detail`
        seq: u64,
        /// The fetched record or the failure
        result: Result<StudentDetail, ApiError>,
    },
}

/// Spawns request threads and collects their replies
#[derive(Debug)]
pub struct FetchHandle {
    client: ApiClient,
    fetch_limit: u32,
    tx: Sender<FetchReply>,
    rx: Receiver<FetchReply>,
}

impl FetchHandle {
    /// Create a handle around the given client.
    ///
    /// `fetch_limit` is the window size requested from the search endpoint;
    /// pagination afterwards is client-side slicing of that window.
    #[must_use]
    pub fn new(client: ApiClient, fetch_limit: u32) -> Self {
        let (tx, rx) = channel();
        Self {
            client,
            fetch_limit,
            tx,
            rx,
        }
    }

    /// Spawn a search request for `term`
    pub fn spawn_search(&self, seq: u64, term: String) {
        let client = self.client.clone();
        let limit = self.fetch_limit;
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = client.search_students(&term, 1, limit);
            // The receiver may be gone if the UI exited mid-request
            let _ = tx.send(FetchReply::Search { seq, result });
        });
    }

    /// Spawn a detail request for `student_id`
    pub fn spawn_detail(&self, seq: u64, student_id: String) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = client.student_detail(&student_id);
            let _ = tx.send(FetchReply::Detail { seq, result });
        });
    }

    /// Take the next completed reply, if one is waiting
    #[must_use]
    pub fn try_recv(&self) -> Option<FetchReply> {
        self.rx.try_recv().ok()
    }
}
