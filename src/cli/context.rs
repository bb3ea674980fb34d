//! Command execution context
//!
//! Resolves hosts, API version and credentials once, and hands every command
//! ready-to-use API clients.

use std::sync::Arc;

use log::debug;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::manager::DEFAULT_MANAGER_HOST;
use crate::client::models::ApiVersion;
use crate::client::platform::DEFAULT_PLATFORM_HOST;
use crate::client::{HttpTransport, ManagerClient, PlatformClient};
use crate::config::Config;
use crate::error::Result;

/// Context for command execution containing clients and runtime options.
pub struct CommandContext {
    /// Management API client
    pub manager: ManagerClient,
    /// Platform API client
    pub platform: PlatformClient,
    /// Management API revision in use
    pub api_version: ApiVersion,
    /// Output format for listing commands
    pub format: OutputFormat,
}

/// API revision from flag/env, then config, then the default.
pub fn resolve_api_version(opts: &GlobalOptions, config: &Config) -> ApiVersion {
    opts.api_version.or(config.api_version).unwrap_or_default()
}

fn resolve_host(flag: &Option<String>, configured: &Option<String>, default: &str) -> String {
    flag.clone()
        .or_else(|| configured.clone())
        .filter(|h| !h.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Global options plus the config file, read on first use.
///
/// Commands validate their flags before touching this, so a broken config
/// file never hides a usage error.
pub struct Settings {
    opts: GlobalOptions,
    config: Option<Config>,
}

impl Settings {
    pub fn new(opts: GlobalOptions) -> Self {
        Self { opts, config: None }
    }

    /// The config file, loaded on the first call.
    pub fn config(&mut self) -> Result<&Config> {
        let config = match self.config.take() {
            Some(config) => config,
            None => Config::load_at(self.opts.config_ref())?,
        };
        Ok(self.config.insert(config))
    }

    /// API version from flag/env, reading the config file only when neither
    /// is set.
    pub fn api_version(&mut self) -> Result<ApiVersion> {
        if let Some(version) = self.opts.api_version {
            return Ok(version);
        }
        self.config()?;
        let config = self.config.as_ref().expect("config loaded above");
        Ok(resolve_api_version(&self.opts, config))
    }

    /// Load the config file and credentials, then build the clients.
    pub fn connect(&mut self) -> Result<CommandContext> {
        let config = self.config()?.clone();
        CommandContext::new(&self.opts, &config)
    }
}

impl CommandContext {
    /// Build the context: resolve the API key and both hosts, create clients.
    ///
    /// # Errors
    /// Returns a configuration error when no API key can be found.
    pub fn new(opts: &GlobalOptions, config: &Config) -> Result<Self> {
        let api_key = config.resolve_api_key()?;
        let api_version = resolve_api_version(opts, config);

        let manager_host = resolve_host(&opts.manager_host, &config.manager_host, DEFAULT_MANAGER_HOST);
        let platform_host =
            resolve_host(&opts.platform_host, &config.platform_host, DEFAULT_PLATFORM_HOST);
        debug!(
            "Management API: {}, platform API: {}, API version: {:?}",
            manager_host, platform_host, api_version
        );

        let manager = ManagerClient::new(Arc::new(HttpTransport::new(&manager_host, api_key.clone())?));
        let platform = PlatformClient::new(Arc::new(HttpTransport::new(&platform_host, api_key)?));

        Ok(Self {
            manager,
            platform,
            api_version,
            format: opts.format,
        })
    }

    /// Context over arbitrary transports, for tests.
    #[cfg(test)]
    pub fn with_transports(
        manager: Arc<dyn crate::client::Transport>,
        platform: Arc<dyn crate::client::Transport>,
        api_version: ApiVersion,
    ) -> Self {
        Self {
            manager: ManagerClient::new(manager),
            platform: PlatformClient::new(platform),
            api_version,
            format: OutputFormat::Pretty,
        }
    }
}
