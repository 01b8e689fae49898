// ============================================================================
// abmeta-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Error types and utilities for the CLI
//
// Every fatal condition is a `CoreError`. This module only adds the alias the
// command functions return and the single place errors reach the terminal.

use abmeta_core::{CoreError, CoreResult};
use console::style;

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Formats a fatal error for stderr.
pub fn format_error(err: &CoreError) -> String {
    format!("{} {}", style("Error:").red().bold(), err)
}

/// Prints a fatal error to stderr.
pub fn report_error(err: &CoreError) {
    eprintln!("{}", format_error(err));
}
