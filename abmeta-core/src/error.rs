// ============================================================================
// abmeta-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Custom Error Types for abmeta-core
//
// This module defines the error types used throughout the abmeta-core library.
// Only pre-flight failures (listing and inference) are fatal to a run; the
// command errors below are produced by the external tool layer and are turned
// into per-chapter results by the processing module.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for the abmeta-core library.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The input directory has no entries, does not exist, or cannot be read.
    #[error("Input directory '{}' is empty or unreadable", .0.display())]
    EmptyDirectory(PathBuf),

    /// The first listed entry does not carry a `<digits>_<word>` chapter prefix.
    #[error("No chapter number prefix found in first directory entry '{0}'")]
    NoPrefixFound(String),

    #[error("Invalid filename pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to execute {0}: {1}")]
    CommandStart(String, io::Error),

    #[error("Failed to wait for {0}: {1}")]
    CommandWait(String, io::Error),

    #[error("Failed to read output of {0}: {1}")]
    CommandOutput(String, String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for abmeta-core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Creates a [`CoreError::CommandStart`] for a command that could not be spawned.
pub fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

/// Creates a [`CoreError::CommandWait`] for a command whose exit could not be collected.
pub fn command_wait_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(cmd.into(), err)
}

/// Creates a [`CoreError::CommandOutput`] for a command whose output streams could not be read.
pub fn command_output_error(cmd: impl Into<String>, message: impl Into<String>) -> CoreError {
    CoreError::CommandOutput(cmd.into(), message.into())
}
