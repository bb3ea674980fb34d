//! Output formatting for listing commands

use std::io::Write;

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod json;
pub mod table;

/// Write `rows` as a table or as JSON.
///
/// `Pretty` output is command-specific and is handled by the caller; asking
/// for it here falls back to the table.
pub fn write_rows<D: Tabled + Serialize>(
    out: &mut dyn Write,
    format: OutputFormat,
    org: Option<&str>,
    rows: &[D],
) -> Result<()> {
    match format {
        OutputFormat::Json => writeln!(out, "{}", json::format_json(rows, org)?)?,
        OutputFormat::Table | OutputFormat::Pretty => writeln!(out, "{}", table::format_table(rows))?,
    }
    out.flush()?;
    Ok(())
}
