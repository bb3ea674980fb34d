//! JSON output formatting

use chrono::Utc;
use serde::Serialize;

/// Listing wrapped with metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub data: T,
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// When the listing was produced (RFC 3339)
    pub timestamp: String,

    /// CLI version
    pub version: String,

    /// Organization the listing belongs to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T, organization: Option<&str>) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                organization: organization.map(String::from),
            },
        }
    }
}

/// Format data as pretty-printed JSON with metadata
pub fn format_json<T: Serialize + ?Sized>(
    data: &T,
    organization: Option<&str>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data, organization))
}
