//! Command implementations for the CLI.

/// Module containing the implementation of the tagging run.
/// Builds the core configuration from the arguments and drives the batch.
pub mod tag;
