//! Error types for the heroku-manager CLI

use thiserror::Error;

/// Result type alias for heroku-manager operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

impl Error {
    /// Whether this error must abort the process with a non-zero exit.
    ///
    /// Remote failures are reported by the command that hit them; only
    /// configuration and local I/O problems reach `main`.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::Api(_))
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("You do not have access to the app '{0}'")]
    AccessDenied(String),

    #[error("{}", remote_detail(*status, body))]
    Remote { status: u16, body: String },

    #[error("{0}")]
    Transport(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Transport("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Transport(format!("Failed to connect to API: {}", err))
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Prefer the server's `error_message` over the raw body.
fn remote_detail(status: u16, body: &str) -> String {
    match error_message(body) {
        Some(message) => message,
        None => format!("{}\n{}", status, body),
    }
}

/// Extract `error_message` from a structured JSON error body.
pub fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("error_message")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Bad, missing or conflicting command-line input
    #[error("{0}")]
    Invalid(String),

    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error(
        "API key not configured. Set HEROKU_API_KEY, add `api_key` to the config file, or log in with the Heroku CLI."
    )]
    MissingApiKey,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
