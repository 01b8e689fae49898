// abmeta-cli/src/main.rs
//
// Entry point for the `abmeta` binary.
//
// Responsibilities include:
// - Parsing the command-line arguments.
// - Initializing env_logger.
// - Running the tagging batch through `abmeta_core`.
// - Printing fatal errors and setting the process exit code.
//
// Chapters that fail to convert are not fatal: the run still exits with 0.

use abmeta_cli::{Cli, logging, run_tag};
use clap::Parser;
use std::process;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run_tag(&cli) {
        abmeta_cli::error::report_error(&e);
        process::exit(1);
    }
}
