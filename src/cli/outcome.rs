//! Response interpretation and progress reporting
//!
//! Each endpoint gets a [`StatusTable`]: its success code plus any statuses
//! with a tailored message. Everything else is a generic failure.

use std::io::Write;

use colored::Colorize;

use crate::client::RawResponse;
use crate::error::{ApiError, Error, Result};

/// Classified result of one remote call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// A status with a command-specific meaning
    Known(String),
    /// Anything else; carries the interpreted failure detail
    Failed(String),
}

/// Per-endpoint status code table
#[derive(Debug, Clone)]
pub struct StatusTable {
    success: u16,
    known: Vec<(u16, String)>,
}

impl StatusTable {
    pub fn expect(success: u16) -> Self {
        Self {
            success,
            known: Vec::new(),
        }
    }

    /// Give `status` a tailored message instead of the generic failure.
    pub fn on(mut self, status: u16, message: impl Into<String>) -> Self {
        self.known.push((status, message.into()));
        self
    }

    pub fn classify(&self, result: Result<RawResponse>) -> Outcome {
        match result {
            Ok(resp) if resp.status == self.success => Outcome::Success,
            Ok(resp) => match self.known.iter().find(|(status, _)| *status == resp.status) {
                Some((_, message)) => Outcome::Known(message.clone()),
                None => Outcome::Failed(resp.into_remote_error().to_string()),
            },
            Err(err) => Outcome::Failed(err.to_string()),
        }
    }
}

/// Message for a failure caught at a command boundary.
pub fn failure_message(err: &Error) -> String {
    match err {
        Error::Api(ApiError::AccessDenied(_)) => err.to_string(),
        _ => format!("An error occurred: {}", err),
    }
}

/// Print a remote failure and carry on; local failures propagate.
pub fn report_failure(out: &mut dyn Write, err: Error) -> Result<()> {
    if err.is_fatal() {
        return Err(err);
    }
    writeln!(out, "{}", failure_message(&err))?;
    out.flush()?;
    Ok(())
}

/// Print a progress line without a newline, so the outcome can follow it.
pub fn progress(out: &mut dyn Write, message: &str) -> Result<()> {
    write!(out, "{}", message)?;
    out.flush()?;
    Ok(())
}

/// Complete a [`progress`] line with the outcome.
pub fn finish(out: &mut dyn Write, outcome: &Outcome) -> Result<()> {
    match outcome {
        Outcome::Success => writeln!(out, " {}", "done".green())?,
        Outcome::Known(message) => writeln!(out, " {}\n{}", "failed".red(), message)?,
        Outcome::Failed(detail) => {
            writeln!(out, " {}\nAn error occurred: {}", "failed".red(), detail)?
        }
    }
    out.flush()?;
    Ok(())
}
