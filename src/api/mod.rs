//! PDDIKTI API client
//!
//! This module talks to the two remote endpoints the application consumes:
//!
//! - `GET /search/{term}?page={n}&limit={limit}` - a JSON array of student
//!   summaries matching the search term
//! - `GET /detail/{id}` - a JSON object with the full enrollment record
//!
//! # Architecture
//!
//! - `transport`: minimal blocking HTTP/1.1 GET over `std::net::TcpStream`
//! - `client`: endpoint URL construction and JSON decoding
//! - `types`: wire types plus display translations (sex code, dates)
//! - `error`: categorized request failures

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{StudentDetail, StudentSummary};
