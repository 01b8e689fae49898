// ============================================================================
// abmeta-core/src/processing/batch.rs
// ============================================================================
//
// BATCH PROCESSING: Main Chapter Tagging Orchestration
//
// This module coordinates a whole run: list the input directory, infer the
// chapter layout, then plan, transform and finalize every chapter in order.
//
// WORKFLOW:
// 1. Validate the configuration
// 2. List the input directory (fatal if empty or unreadable)
// 3. Infer chapter count, prefix width and cover art (fatal if no prefix)
// 4. For each chapter index 1..=count:
//    a. Build the chapter plan
//    b. Create the output directory when one is configured
//    c. Run ffmpeg with the chapter's metadata
//    d. Finalize (in-place move or nothing)
// 5. Report the batch summary
//
// Only steps 1-3 can fail the run. Per-chapter problems are reported through
// the diagnostics events and counted in the summary.

// ---- Internal crate imports ----
use crate::config::CoreConfig;
use crate::discovery::list_directory;
use crate::error::CoreResult;
use crate::events::{Event, EventDispatcher};
use crate::external::{FfmpegSpawner, FileSystem, build_metadata_command};
use crate::inference::{InferredLayout, infer_layout};
use crate::plan::{ChapterPlan, ChapterPlans};
use crate::processing::transform::{finalize, run_transform};

// ---- External crate imports ----
use log::{debug, info};

/// Totals for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Chapters planned (the inferred audiofile count)
    pub planned: usize,
    /// Chapters whose transform and finalize both succeeded
    pub converted: usize,
    /// Chapter numbers that failed in either step
    pub failed_chapters: Vec<String>,
}

impl BatchSummary {
    pub fn all_converted(&self) -> bool {
        self.failed_chapters.is_empty()
    }
}

/// Runs the whole batch for `config`.
///
/// Generic over the transcoder and file system so tests can substitute mocks.
///
/// # Errors
///
/// * `CoreError::Config` - The configuration is unusable
/// * `CoreError::EmptyDirectory` - The input directory is empty or unreadable
/// * `CoreError::NoPrefixFound` - The first listed entry has no chapter prefix
///
/// Nothing is created, transcoded or moved when an error is returned.
///
/// # Examples
///
/// ```rust,no_run
/// use abmeta_core::{CoreConfig, run_batch};
/// use abmeta_core::events::EventDispatcher;
/// use abmeta_core::external::{SidecarSpawner, StdFileSystem};
/// use std::path::PathBuf;
///
/// let config = CoreConfig::new(PathBuf::from("/books/winter_world"), "_WinterWorldRID", "Winter World", "A.G. Riddle");
/// let summary = run_batch(&SidecarSpawner, &StdFileSystem, &config, &EventDispatcher::new()).unwrap();
/// println!("{} of {} chapters converted", summary.converted, summary.planned);
/// ```
pub fn run_batch<S: FfmpegSpawner, F: FileSystem>(
    spawner: &S,
    fs: &F,
    config: &CoreConfig,
    events: &EventDispatcher,
) -> CoreResult<BatchSummary> {
    config.validate()?;

    let listing = list_directory(fs, &config.input_dir)?;
    let layout = infer_layout(&listing, &config.input_dir, &config.extension, events)?;
    drop(listing);

    Ok(process_chapters(spawner, fs, config, &layout, events))
}

/// Plans, transforms and finalizes every chapter of `layout`, in order.
///
/// Never fails: each chapter is best-effort and independent of the others.
pub fn process_chapters<S: FfmpegSpawner, F: FileSystem>(
    spawner: &S,
    fs: &F,
    config: &CoreConfig,
    layout: &InferredLayout,
    events: &EventDispatcher,
) -> BatchSummary {
    let mut summary = BatchSummary {
        planned: layout.audiofile_count,
        ..Default::default()
    };

    for plan in ChapterPlans::new(config, layout) {
        info!(
            "Processing chapter {}/{}: {}",
            plan.index,
            layout.audiofile_count,
            plan.old_file_path.display()
        );
        if config.dry_run {
            emit_planned(events, &plan);
            continue;
        }

        if process_chapter(spawner, fs, config, layout, &plan, events) {
            summary.converted += 1;
        } else {
            summary.failed_chapters.push(plan.chapter_number.clone());
        }
    }

    events.emit(Event::BatchComplete {
        planned: summary.planned,
        converted: summary.converted,
        failed_chapters: summary.failed_chapters.clone(),
    });
    summary
}

/// Processes one chapter, returning whether it ended up tagged and in place.
fn process_chapter<S: FfmpegSpawner, F: FileSystem>(
    spawner: &S,
    fs: &F,
    config: &CoreConfig,
    layout: &InferredLayout,
    plan: &ChapterPlan,
    events: &EventDispatcher,
) -> bool {
    emit_planned(events, plan);

    // Repeated for every chapter; creation is idempotent
    if let Some(output_dir) = config.distinct_output_dir() {
        let error = fs.create_dir_all(output_dir).err().map(|e| e.to_string());
        events.emit(Event::OutputDirectoryPrepared {
            path: output_dir.display().to_string(),
            error,
        });
    }

    let metadata = plan.metadata(config);
    let cmd = build_metadata_command(&config.ffmpeg_path, plan, &layout.cover_art_path, &metadata);
    let result = run_transform(spawner, cmd);
    debug!(
        "Chapter {} transform {}",
        plan.chapter_number,
        if result.succeeded { "succeeded" } else { "failed" }
    );
    let transformed = result.succeeded;
    events.emit(Event::TransformFinished {
        chapter_number: plan.chapter_number.clone(),
        succeeded: result.succeeded,
        raw_output: result.raw_output,
    });

    // Runs whether or not the transform succeeded
    let finalized = match finalize(fs, config, plan) {
        Ok(()) => true,
        Err(e) => {
            events.emit(Event::FinalizeFailed {
                chapter_number: plan.chapter_number.clone(),
                message: e.to_string(),
            });
            false
        }
    };

    transformed && finalized
}

fn emit_planned(events: &EventDispatcher, plan: &ChapterPlan) {
    events.emit(Event::ChapterPlanned {
        chapter_number: plan.chapter_number.clone(),
        old_path: plan.old_file_path.display().to_string(),
        new_path: plan.new_file_path.display().to_string(),
    });
}
