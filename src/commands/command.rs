//! Command trait definition for CLI commands.

use anyhow::Result;

/// Trait implemented by snps CLI commands.
///
/// `command_line` is the full invocation as typed, captured before argument parsing.
pub trait Command {
    #[allow(clippy::missing_errors_doc)]
    fn execute(&self, command_line: &str) -> Result<()>;
}
