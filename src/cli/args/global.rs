//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};
use crate::client::models::ApiVersion;

/// Global CLI options passed to command setup.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct
/// captures the CLI/env layer; the config file is merged in
/// `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format for listing commands
    pub format: OutputFormat,

    /// Custom config file path
    pub config: Option<String>,

    /// Management API host override
    pub manager_host: Option<String>,

    /// Platform API host override
    pub platform_host: Option<String>,

    /// Management API revision override
    pub api_version: Option<ApiVersion>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            manager_host: cli.manager_host.clone(),
            platform_host: cli.platform_host.clone(),
            api_version: cli.api_version,
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }
}
