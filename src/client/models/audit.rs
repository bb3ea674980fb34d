//! Audit event models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One page of audit events, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPage {
    /// Events on this page
    #[serde(default)]
    pub events: Vec<AuditEvent>,

    /// Full request path of the next (older) page, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub older: Option<String>,
}

/// Audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Event time (Unix epoch milliseconds)
    pub time_in_millis_since_epoch: i64,

    /// Email of the user who performed the action
    #[serde(default)]
    pub actor: Option<String>,

    /// Action identifier (e.g. `add_user`)
    #[serde(default)]
    pub action: Option<String>,

    /// App the action applied to, if any
    #[serde(default)]
    pub app: Option<String>,

    /// Free-form event attributes
    #[serde(default)]
    pub attributes: serde_json::Value,
}

impl AuditEvent {
    /// Event time as a UTC timestamp
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.time_in_millis_since_epoch)
    }
}
