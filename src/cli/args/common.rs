//! Common CLI types shared across commands

/// Output format for listing commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Indented plain-text listing
    #[default]
    Pretty,
    /// Bordered table, one row per entry
    Table,
    /// JSON with metadata, for scripts
    Json,
}
