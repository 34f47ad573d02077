//! Dikti CLI application entry point
//!
//! This is the main executable for the dikti student search client. It
//! looks up Indonesian higher-education enrollment records from the
//! PDDIKTI registry through its public API.
//!
//! # Features
//!
//! - **Browse Mode**: interactive TUI with search-as-you-type, paginated
//!   results and a detail view
//! - **One-shot Search**: print matching students to stdout
//! - **Detail Lookup**: print one student's enrollment record
//! - **Configuration**: API host and tuning stored in the user's config
//!   directory
//! - **Quiet Mode**: suppress informational output for scripting
//!
//! # Usage
//!
//! ```bash
//! # Browse interactively (default command)
//! dikti
//! dikti 1906123456
//!
//! # One-shot search
//! dikti search 1906123456
//! dikti search "budi santoso" --format json
//!
//! # Detail lookup by id from a previous search
//! dikti detail <id>
//!
//! # Configuration
//! dikti config set page_size=25
//! dikti config get base_url
//!
//! # Quiet mode (only output results)
//! dikti -q search 1906123456
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/dikti/config.toml` on Linux); every value has a default,
//! so no setup is required.

use std::io;

use clap::CommandFactory;
use colored::Colorize;

use dikti::{
    DiktiError,
    api::ApiClient,
    cli::{Cli, Commands, ConfigCommands, OutputFormat},
    config::DiktiConfig,
    output, tui,
};

type Result<T> = std::result::Result<T, DiktiError>;

fn main() {
    env_logger::init();

    let cli = Cli::parse_args();
    if let Err(e) = run(&cli) {
        eprintln!("{} {e}", "Error:".red());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match cli.get_command() {
        Commands::Browse { query } => {
            let config = DiktiConfig::load()?;
            tui::run(&config, query.as_deref())
        }
        Commands::Search {
            query,
            page,
            limit,
            format,
        } => cmd_search(&query, page, limit, format, cli.quiet),
        Commands::Detail { id, format } => cmd_detail(&id, format),
        Commands::Config { command } => cmd_config(&command),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "dikti", &mut io::stdout());
            Ok(())
        }
    }
}

/// One-shot search printed to stdout
fn cmd_search(
    query: &str,
    page: u32,
    limit: Option<u32>,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(DiktiError::InvalidInput(
            "search query must not be empty".to_string(),
        ));
    }

    let config = DiktiConfig::load()?;
    let client = ApiClient::from_config(&config);
    let limit = limit.unwrap_or(config.fetch_limit);

    let students = client.search_students(trimmed, page, limit)?;

    if students.is_empty() {
        if !quiet {
            println!("No students found for the given query.");
        }
        return Ok(());
    }

    println!("{}", output::render_summaries(&students, format, quiet)?);
    Ok(())
}

/// One-shot detail lookup printed to stdout
fn cmd_detail(id: &str, format: OutputFormat) -> Result<()> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(DiktiError::InvalidInput(
            "student id must not be empty".to_string(),
        ));
    }

    let config = DiktiConfig::load()?;
    let client = ApiClient::from_config(&config);

    let detail = client.student_detail(trimmed)?;
    println!("{}", output::render_detail(&detail, format)?);
    Ok(())
}

/// Manage the configuration file
fn cmd_config(command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let (key, value) = setting.split_once('=').ok_or_else(|| {
                DiktiError::InvalidInput(format!(
                    "expected KEY=VALUE (e.g. page_size=25), got '{setting}'"
                ))
            })?;

            let mut config = DiktiConfig::load()?;
            config.set_value(key.trim(), value.trim())?;
            config.save()?;
            println!("{key} = {}", config.get_value(key.trim()).unwrap_or_default());
            Ok(())
        }
        ConfigCommands::Get { key } => {
            let config = DiktiConfig::load()?;
            match config.get_value(key) {
                Some(value) => {
                    println!("{value}");
                    Ok(())
                }
                None => Err(DiktiError::InvalidInput(format!(
                    "unknown configuration key '{key}'"
                ))),
            }
        }
        ConfigCommands::Path => {
            println!("{}", DiktiConfig::config_path()?.display());
            Ok(())
        }
        ConfigCommands::Init => {
            DiktiConfig::interactive_init()?;
            Ok(())
        }
    }
}
