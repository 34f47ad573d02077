//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for dikti using the
//! `clap` crate.
//!
//! # Commands
//!
//! - **browse**: interactive search TUI (default)
//! - **search**: one-shot search printed to stdout
//! - **detail**: one-shot detail lookup printed to stdout
//! - **config**: manage configuration (set, get, path, init)
//! - **completions**: generate shell completion scripts
//!
//! # Design Features
//!
//! - Global `--quiet` flag for scripting-friendly output
//! - Command aliases (e.g., `b` for `browse`, `s` for `search`)
//! - Output format selection (`table`, `json`, `csv`) for one-shot commands

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Output format for the one-shot commands
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned, colored table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// CSV with a header row
    Csv,
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., page_size=25)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., base_url)
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Print the path of the config file
    Path,

    /// Interactively set up the configuration
    Init,
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "dikti")]
#[command(about = "Search Indonesian PDDIKTI student enrollment records", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Initial search query when no subcommand is given
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Open the interactive search TUI (default)
    #[command(visible_alias = "b")]
    Browse {
        /// Initial search query
        #[arg(value_name = "QUERY")]
        query: Option<String>,
    },

    /// Search for students and print the results
    #[command(visible_alias = "s")]
    Search {
        /// Search query (NIM or name)
        #[arg(value_name = "QUERY")]
        query: String,

        /// Page number forwarded to the API
        #[arg(long = "page", value_name = "N", default_value_t = 1)]
        page: u32,

        /// Result limit forwarded to the API (defaults to the configured
        /// fetch limit)
        #[arg(long = "limit", value_name = "N")]
        limit: Option<u32>,

        /// Output format
        #[arg(
            short = 'f',
            long = "format",
            value_enum,
            default_value_t = OutputFormat::Table
        )]
        format: OutputFormat,
    },

    /// Fetch and print one student's enrollment record
    #[command(visible_alias = "d")]
    Detail {
        /// Student id from a previous search
        #[arg(value_name = "ID")]
        id: String,

        /// Output format (csv is not supported for a single record)
        #[arg(
            short = 'f',
            long = "format",
            value_enum,
            default_value_t = OutputFormat::Table
        )]
        format: OutputFormat,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The command to run, defaulting to browse with the bare query
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Browse {
            query: self.query.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_invocation_defaults_to_browse() {
        let cli = Cli::try_parse_from(["dikti"]).unwrap();
        assert!(matches!(
            cli.get_command(),
            Commands::Browse { query: None }
        ));
    }

    #[test]
    fn test_bare_query_becomes_browse_query() {
        let cli = Cli::try_parse_from(["dikti", "1906123456"]).unwrap();
        match cli.get_command() {
            Commands::Browse { query } => assert_eq!(query.as_deref(), Some("1906123456")),
            other => panic!("expected Browse, got {other:?}"),
        }
    }

    #[test]
    fn test_search_command_parses_flags() {
        let cli = Cli::try_parse_from([
            "dikti", "search", "budi", "--page", "2", "--limit", "50", "--format", "json",
        ])
        .unwrap();
        match cli.get_command() {
            Commands::Search {
                query,
                page,
                limit,
                format,
            } => {
                assert_eq!(query, "budi");
                assert_eq!(page, 2);
                assert_eq!(limit, Some(50));
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("expected Search, got {other:?}"),
        }
    }

    #[test]
    fn test_search_alias() {
        let cli = Cli::try_parse_from(["dikti", "s", "123"]).unwrap();
        assert!(matches!(cli.get_command(), Commands::Search { .. }));
    }

    #[test]
    fn test_detail_command() {
        let cli = Cli::try_parse_from(["dikti", "detail", "abc-123"]).unwrap();
        match cli.get_command() {
            Commands::Detail { id, format } => {
                assert_eq!(id, "abc-123");
                assert_eq!(format, OutputFormat::Table);
            }
            other => panic!("expected Detail, got {other:?}"),
        }
    }

    #[test]
    fn test_config_set_parses() {
        let cli = Cli::try_parse_from(["dikti", "config", "set", "page_size=25"]).unwrap();
        match cli.get_command() {
            Commands::Config {
                command: ConfigCommands::Set { setting },
            } => assert_eq!(setting, "page_size=25"),
            other => panic!("expected Config Set, got {other:?}"),
        }
    }

    #[test]
    fn test_quiet_is_global() {
        let cli = Cli::try_parse_from(["dikti", "search", "123", "-q"]).unwrap();
        assert!(cli.quiet);
    }
}
