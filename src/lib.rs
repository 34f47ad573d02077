//! Dikti - a terminal client for the PDDIKTI student registry
//!
//! This library provides an API client for the PDDIKTI search and detail
//! endpoints, a debounced query controller, and both an interactive TUI
//! and plain CLI renderings of the results.

use thiserror::Error;

pub mod api;
pub mod cli;
pub mod config;
pub mod output;
pub mod query;
pub mod tui;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum DiktiError {
    /// API request error
    #[error("API error: {0}")]
    ApiError(#[from] api::ApiError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
