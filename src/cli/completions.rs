//! Static shell completions
//!
//! Completions cover subcommands, aliases and flags only; nothing is looked
//! up remotely when TAB is pressed.

use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;
use crate::error::Result;

/// Name the completion scripts register for
const BIN_NAME: &str = "heroku-manager";

/// Write the completion script for `shell`.
pub fn generate(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, out);
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_script_lists_subcommands() {
        let mut buf = Vec::new();
        generate(Shell::Bash, &mut buf).unwrap();

        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("heroku-manager"));
        assert!(script.contains("team-to-org"));
        assert!(script.contains("--invite-collaborators"));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
