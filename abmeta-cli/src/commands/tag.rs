// abmeta-cli/src/commands/tag.rs
//
// Contains the logic for a tagging run: translate the parsed arguments into a
// `CoreConfig`, wire up diagnostics, and hand the batch to abmeta-core with
// the real ffmpeg spawner and filesystem.

use crate::cli::Cli;
use crate::error::CliResult;
use abmeta_core::events::{EventDispatcher, JsonEventHandler, TraceEventHandler};
use abmeta_core::external::{SidecarSpawner, StdFileSystem};
use abmeta_core::{BatchSummary, CoreConfig, run_batch};
use log::info;
use std::sync::Arc;

/// Builds the core configuration from the parsed arguments.
pub fn create_core_config(args: &Cli) -> CoreConfig {
    let mut config = CoreConfig::new(
        args.input_dir.clone(),
        args.suffix.clone(),
        args.title.clone(),
        args.author.clone(),
    );
    config.output_dir = args.output_dir.clone();
    config.extension = args.extension.clone();
    config.ffmpeg_path = args.ffmpeg.clone();
    config.dry_run = args.dry_run;
    config
}

/// Builds the dispatcher for diagnostics. Without `--verbose` it has no
/// handlers and every event is dropped.
pub fn create_event_dispatcher(verbose: bool, json: bool) -> EventDispatcher {
    let mut events = EventDispatcher::new();
    if verbose {
        if json {
            events.add_handler(Arc::new(JsonEventHandler::new()));
        } else {
            events.add_handler(Arc::new(TraceEventHandler::new()));
        }
    }
    events
}

/// Executes a tagging run.
///
/// Fatal conditions (empty or unreadable input directory, no chapter number
/// prefix, invalid configuration) are returned as errors. Chapters that fail
/// to convert are reported through diagnostics and the summary only.
pub fn run_tag(args: &Cli) -> CliResult<BatchSummary> {
    let config = create_core_config(args);
    let events = create_event_dispatcher(args.verbose, args.json);

    info!(
        "Tagging chapters in {} (output: {})",
        config.input_dir.display(),
        config
            .output_dir
            .as_ref()
            .map_or_else(|| "in place".to_string(), |dir| dir.display().to_string())
    );

    let summary = run_batch(&SidecarSpawner, &StdFileSystem, &config, &events)?;

    info!(
        "{} of {} chapter(s) converted",
        summary.converted, summary.planned
    );
    Ok(summary)
}
