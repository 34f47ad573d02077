//! Output formatting for the one-shot CLI commands
//!
//! Renders search results and detail records as an aligned colored table,
//! pretty-printed JSON, or CSV. The TUI has its own widgets; this module
//! only serves `dikti search` and `dikti detail`.

use colored::Colorize;

use crate::DiktiError;
use crate::api::{StudentDetail, StudentSummary};
use crate::cli::OutputFormat;

/// Render search results in the requested format
///
/// # Errors
///
/// Returns `DiktiError` if JSON or CSV serialization fails.
pub fn render_summaries(
    items: &[StudentSummary],
    format: OutputFormat,
    quiet: bool,
) -> Result<String, DiktiError> {
    match format {
        OutputFormat::Table => Ok(summary_table(items, quiet)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(items).map_err(|e| DiktiError::InvalidInput(e.to_string()))
        }
        OutputFormat::Csv => summaries_csv(items),
    }
}

/// Render a detail record in the requested format
///
/// # Errors
///
/// Returns `DiktiError` if serialization fails or the format does not
/// apply to a single record.
pub fn render_detail(detail: &StudentDetail, format: OutputFormat) -> Result<String, DiktiError> {
    match format {
        OutputFormat::Table => Ok(detail_table(detail)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(detail).map_err(|e| DiktiError::InvalidInput(e.to_string()))
        }
        OutputFormat::Csv => Err(DiktiError::InvalidInput(
            "csv output is not supported for a single record".to_string(),
        )),
    }
}

/// Format search results as an aligned table
#[must_use]
pub fn summary_table(items: &[StudentSummary], quiet: bool) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);

    if !quiet {
        // Pad before coloring so ANSI codes do not skew the columns
        lines.push(format!(
            "{} {} {} {}",
            format!("{:<30}", "Nama").bold(),
            format!("{:<14}", "NIM").bold(),
            format!("{:<36}", "Universitas").bold(),
            "Program Studi".bold()
        ));
    }

    for item in items {
        lines.push(format!(
            "{:<30.30} {} {:<36.36} {}",
            item.name,
            format!("{:<14.14}", item.nim).cyan(),
            item.institution_display(),
            item.program_name
        ));
    }

    lines.join("\n")
}

fn summaries_csv(items: &[StudentSummary]) -> Result<String, DiktiError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for item in items {
        writer
            .serialize(item)
            .map_err(|e| DiktiError::InvalidInput(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| DiktiError::InvalidInput(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| DiktiError::InvalidInput(e.to_string()))
}

/// Format a detail record as field/value lines, with the sex code and the
/// enrollment date translated for display
#[must_use]
pub fn detail_table(detail: &StudentDetail) -> String {
    let fields = [
        ("Nama", detail.name.clone()),
        ("NIM", detail.nim.clone()),
        ("Program Studi", detail.program_name.clone()),
        ("Nama Universitas", detail.institution_name.clone()),
        ("Jenis Kelamin", detail.sex_display().to_string()),
        ("Tanggal Masuk", detail.enrolled_at_display()),
        ("Status Awal Mahasiswa", detail.initial_status.clone()),
        ("Status Terbaru Mahasiswa", detail.current_status.clone()),
    ];

    fields
        .iter()
        .map(|(label, value)| format!("{} {}", format!("{:<25}", format!("{label}:")).bold(), value))
        .collect::<Vec<_>>()
        .join("\n")
}
