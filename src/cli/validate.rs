//! Input validation shared by all commands
//!
//! Every check here is pure: it looks only at parsed flags and the selected
//! API version, and runs before any configuration or network access.

use crate::client::models::{ApiVersion, Role};
use crate::error::{ConfigError, Result};

fn invalid(message: String) -> crate::error::Error {
    ConfigError::Invalid(message).into()
}

/// Require a flag to be present and non-blank.
///
/// `what` names the missing thing ("organization"), `hint` tells the user
/// which flag supplies it.
pub fn required(value: &Option<String>, what: &str, hint: &str) -> Result<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(invalid(format!("No {} specified.\n{}", what, hint))),
    }
}

/// Direction of an app transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Direction {
    /// From the personal account into this org
    Into(String),
    /// From this org into the personal account
    OutOf(String),
}

/// Exactly one of `--to` / `--from`.
pub fn direction(to: &Option<String>, from: &Option<String>) -> Result<Direction> {
    let to = to.as_deref().map(str::trim).filter(|v| !v.is_empty());
    let from = from.as_deref().map(str::trim).filter(|v| !v.is_empty());

    match (to, from) {
        (Some(_), Some(_)) => Err(invalid(
            "Ambiguous option. Please specify either a --to <org name> or a --from <org name>. Not both."
                .to_string(),
        )),
        (Some(org), None) => Ok(Direction::Into(org.to_string())),
        (None, Some(org)) => Ok(Direction::OutOf(org.to_string())),
        (None, None) => Err(invalid(
            "No organization specified.\nSpecify which organization to transfer to or from with --to <org name> or --from <org name>"
                .to_string(),
        )),
    }
}

/// A role literal valid for `version`. A missing role is invalid too.
pub fn role(value: &Option<String>, version: ApiVersion) -> Result<Role> {
    value
        .as_deref()
        .and_then(|v| Role::parse(v.trim(), version))
        .ok_or_else(|| {
            let [high, low] = version.roles();
            invalid(format!(
                "Invalid role.\nSpecify which role the user will have with --role <role>\nValid values are '{}' and '{}'",
                high, low
            ))
        })
}
