//! Configuration management for heroku-manager
//!
//! The config file is optional and read-only; every value in it can also be
//! given on the command line or through the environment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::client::models::ApiVersion;
use crate::error::{ConfigError, Result};

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "HEROKU_API_KEY";

/// netrc machine the Heroku CLI stores the API key under
const NETRC_MACHINE: &str = "api.heroku.com";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Heroku API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Management API host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_host: Option<String>,

    /// Platform API host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_host: Option<String>,

    /// Management API revision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<ApiVersion>,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".heroku-manager").join("config.yaml"))
    }

    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing file at the default location yields the defaults; a missing
    /// file at an explicit path is an error.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(Path::new(p)),
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Resolve the API key.
    ///
    /// Order: `HEROKU_API_KEY`, the config file, then the Heroku CLI's
    /// `~/.netrc` entry.
    pub fn resolve_api_key(&self) -> Result<String> {
        let netrc = dirs::home_dir().and_then(|home| std::fs::read_to_string(home.join(".netrc")).ok());
        self.resolve_api_key_from(std::env::var(API_KEY_ENV).ok(), netrc.as_deref())
    }

    fn resolve_api_key_from(&self, env_key: Option<String>, netrc: Option<&str>) -> Result<String> {
        env_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()))
            .or_else(|| netrc.and_then(|contents| netrc_password(contents, NETRC_MACHINE)))
            .ok_or_else(|| ConfigError::MissingApiKey.into())
    }
}

/// Find the `password` token of `machine` in netrc contents.
fn netrc_password(contents: &str, machine: &str) -> Option<String> {
    let mut tokens = contents.split_whitespace();
    let mut in_machine = false;

    while let Some(token) = tokens.next() {
        match token {
            "machine" => in_machine = tokens.next() == Some(machine),
            "default" => in_machine = false,
            "password" => {
                let value = tokens.next()?;
                if in_machine {
                    return Some(value.to_string());
                }
            }
            _ => {}
        }
    }

    None
}
