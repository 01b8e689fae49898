// ============================================================================
// abmeta-core/src/processing/transform.rs
// ============================================================================
//
// METADATA TRANSFORM: One Chapter Through ffmpeg and Back Into Place
//
// This module runs the transcoder for a single planned chapter and applies
// the finalize step. Nothing here returns an error to the caller: a failed
// transcoder run is captured as a TransformResult and the batch moves on.
//
// KEY COMPONENTS:
// - TransformResult: success flag plus everything ffmpeg printed
// - run_transform: spawn, drain output, wait
// - finalize: move the tagged file over the original in in-place mode

use crate::config::CoreConfig;
use crate::error::CoreResult;
use crate::external::{FfmpegProcess, FfmpegSpawner, FileSystem};
use crate::plan::ChapterPlan;

use ffmpeg_sidecar::command::FfmpegCommand;
use log::debug;

/// Outcome of one transcoder invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformResult {
    pub succeeded: bool,
    /// Every line ffmpeg printed, newline separated
    pub raw_output: String,
}

impl TransformResult {
    fn failed(raw_output: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            raw_output: raw_output.into(),
        }
    }
}

/// Runs `cmd` to completion and captures its result.
///
/// A spawn failure (e.g. ffmpeg missing from `PATH`) is reported as a failed
/// result whose output is the spawn error.
pub fn run_transform<S: FfmpegSpawner>(spawner: &S, cmd: FfmpegCommand) -> TransformResult {
    let mut process = match spawner.spawn(cmd) {
        Ok(process) => process,
        Err(e) => return TransformResult::failed(e.to_string()),
    };

    let mut lines = match process.read_output() {
        Ok(lines) => lines,
        Err(e) => vec![e.to_string()],
    };

    let succeeded = match process.wait() {
        Ok(status) => {
            debug!("ffmpeg exited with {}", status);
            status.success()
        }
        Err(e) => {
            lines.push(e.to_string());
            false
        }
    };

    TransformResult {
        succeeded,
        raw_output: lines.join("\n"),
    }
}

/// Applies the finalize step for `plan`.
///
/// In-place mode moves the tagged `_new` file onto the original, replacing
/// it. With a distinct output directory the tagged file stays where ffmpeg
/// wrote it and the original is left alone.
pub fn finalize<F: FileSystem>(fs: &F, config: &CoreConfig, plan: &ChapterPlan) -> CoreResult<()> {
    if config.distinct_output_dir().is_some() {
        return Ok(());
    }
    debug!(
        "Replacing {} with {}",
        plan.old_file_path.display(),
        plan.new_file_path.display()
    );
    fs.rename(&plan.new_file_path, &plan.old_file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::external::mocks::{FsCall, MockFfmpegSpawner, MockFileSystem};
    use crate::inference::InferredLayout;
    use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
    use std::path::PathBuf;

    fn config() -> CoreConfig {
        CoreConfig::new(PathBuf::from("book"), "_Part", "Foo", "Bar")
    }

    fn plan(config: &CoreConfig) -> ChapterPlan {
        let layout = InferredLayout {
            audiofile_count: 1,
            prefix_width: 2,
            cover_art_path: PathBuf::from("book/cover.jpg"),
        };
        ChapterPlan::new(config, &layout, 1)
    }

    fn command() -> FfmpegCommand {
        let mut cmd = FfmpegCommand::new();
        cmd.input("book/01_Part.mp3").output("book/01_Part_new.mp3");
        cmd
    }

    #[test]
    fn test_successful_run_collects_log_lines() {
        let spawner = MockFfmpegSpawner::new();
        spawner.add_success_expectation(
            "01_Part_new.mp3",
            vec![
                FfmpegEvent::Log(LogLevel::Info, "Stream mapping:".to_string()),
                FfmpegEvent::Log(LogLevel::Info, "  Stream #0:0 -> #0:0 (copy)".to_string()),
            ],
            false,
        );

        let result = run_transform(&spawner, command());
        assert!(result.succeeded);
        assert_eq!(result.raw_output, "Stream mapping:\n  Stream #0:0 -> #0:0 (copy)");
    }

    #[test]
    fn test_parsed_events_keep_their_lines() {
        let spawner = MockFfmpegSpawner::new();
        spawner.add_success_expectation(
            "01_Part_new.mp3",
            vec![
                FfmpegEvent::Log(LogLevel::Info, "Stream mapping:".to_string()),
                FfmpegEvent::ParsedStreamMapping("  Stream #1:0 -> #0:1 (copy)".to_string()),
                FfmpegEvent::Done,
            ],
            false,
        );

        let result = run_transform(&spawner, command());
        assert_eq!(result.raw_output, "Stream mapping:\n  Stream #1:0 -> #0:1 (copy)");
    }

    #[test]
    fn test_non_zero_exit_is_a_failed_result() {
        let spawner = MockFfmpegSpawner::new();
        spawner.add_exit_error_expectation(
            "01_Part_new.mp3",
            vec![FfmpegEvent::Error("cover.jpg: No such file or directory".to_string())],
            1,
        );

        let result = run_transform(&spawner, command());
        assert!(!result.succeeded);
        assert!(result.raw_output.contains("No such file or directory"));
    }

    #[test]
    fn test_spawn_error_is_a_failed_result() {
        let spawner = MockFfmpegSpawner::new();
        spawner.add_spawn_error_expectation(
            "01_Part_new.mp3",
            CoreError::CommandStart(
                "ffmpeg (sidecar)".to_string(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            ),
        );

        let result = run_transform(&spawner, command());
        assert!(!result.succeeded);
        assert!(result.raw_output.contains("Failed to execute ffmpeg (sidecar)"));
    }

    #[test]
    fn test_finalize_in_place_moves_new_onto_old() -> CoreResult<()> {
        let fs = MockFileSystem::with_listing(&[]);
        let config = config();
        let plan = plan(&config);

        finalize(&fs, &config, &plan)?;
        assert_eq!(
            fs.calls(),
            vec![FsCall::Rename(
                PathBuf::from("book/01_Part_new.mp3"),
                PathBuf::from("book/01_Part.mp3"),
            )]
        );
        Ok(())
    }

    #[test]
    fn test_finalize_with_output_dir_is_a_no_op() -> CoreResult<()> {
        let fs = MockFileSystem::with_listing(&[]);
        let mut config = config();
        config.output_dir = Some(PathBuf::from("tagged"));
        let plan = plan(&config);

        finalize(&fs, &config, &plan)?;
        assert!(fs.calls().is_empty());
        Ok(())
    }
}
