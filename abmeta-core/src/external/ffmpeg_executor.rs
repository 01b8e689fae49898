// ============================================================================
// abmeta-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: Running the Tagging Transcoder
//
// A chapter transform needs two things from ffmpeg: everything it printed and
// whether it exited cleanly. The traits below expose exactly that, so the
// batch can run against a scripted process in tests.
//
// KEY COMPONENTS:
// - FfmpegProcess: a running transcoder (output lines, exit status)
// - FfmpegSpawner: starts a transcoder from an FfmpegCommand
// - SidecarSpawner: ffmpeg-sidecar backed implementation
// - event_line: the text behind each parsed ffmpeg-sidecar event

use crate::error::{CoreResult, command_output_error, command_start_error, command_wait_error};
use ffmpeg_sidecar::child::FfmpegChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::process::ExitStatus;

/// A transcoder process started for one chapter.
pub trait FfmpegProcess {
    /// Reads the process output until it closes, one entry per printed line.
    fn read_output(&mut self) -> CoreResult<Vec<String>>;

    /// Waits for the process to exit.
    fn wait(&mut self) -> CoreResult<ExitStatus>;
}

/// Starts transcoder processes.
pub trait FfmpegSpawner {
    type Process: FfmpegProcess;

    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process>;
}

/// Returns the line of ffmpeg output an event was parsed from.
///
/// ffmpeg-sidecar turns recognized stderr lines (version banner, inputs,
/// durations, streams, progress) into structured events. Each keeps its
/// source line, so the full text output can be rebuilt. Events that carry
/// no text, such as raw output frames, yield `None`.
pub fn event_line(event: FfmpegEvent) -> Option<String> {
    match event {
        FfmpegEvent::Log(_, line) => Some(line),
        FfmpegEvent::Error(message) => Some(message),
        FfmpegEvent::ParsedStreamMapping(line) => Some(line),
        FfmpegEvent::ParsedVersion(version) => Some(version.raw_log_message),
        FfmpegEvent::ParsedConfiguration(config) => Some(config.raw_log_message),
        FfmpegEvent::ParsedInput(input) => Some(input.raw_log_message),
        FfmpegEvent::ParsedOutput(output) => Some(output.raw_log_message),
        FfmpegEvent::ParsedDuration(duration) => Some(duration.raw_log_message),
        FfmpegEvent::ParsedInputStream(stream) | FfmpegEvent::ParsedOutputStream(stream) => {
            Some(stream.raw_log_message)
        }
        FfmpegEvent::Progress(progress) => Some(progress.raw_log_message),
        _ => None,
    }
}

/// A chapter transcoder started through ffmpeg-sidecar.
pub struct SidecarProcess {
    program: String,
    child: FfmpegChild,
}

impl FfmpegProcess for SidecarProcess {
    fn read_output(&mut self) -> CoreResult<Vec<String>> {
        let events = self
            .child
            .iter()
            .map_err(|e| command_output_error(&self.program, e.to_string()))?;
        Ok(events.filter_map(event_line).collect())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        self.child
            .wait()
            .map_err(|e| command_wait_error(&self.program, e))
    }
}

/// Spawns the ffmpeg binary named in the command.
#[derive(Debug, Clone, Default)]
pub struct SidecarSpawner;

impl FfmpegSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let program = cmd.as_inner().get_program().to_string_lossy().into_owned();
        log::debug!("Spawning {}: {:?}", program, cmd);
        match cmd.spawn() {
            Ok(child) => Ok(SidecarProcess { program, child }),
            Err(e) => Err(command_start_error(program, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffmpeg_sidecar::event::LogLevel;

    #[test]
    fn test_event_line_keeps_log_and_error_text() {
        assert_eq!(
            event_line(FfmpegEvent::Log(LogLevel::Warning, "Guessed channel layout".to_string())),
            Some("Guessed channel layout".to_string())
        );
        assert_eq!(
            event_line(FfmpegEvent::Error("Conversion failed!".to_string())),
            Some("Conversion failed!".to_string())
        );
        assert_eq!(
            event_line(FfmpegEvent::ParsedStreamMapping("  Stream #0:0 -> #0:0 (copy)".to_string())),
            Some("  Stream #0:0 -> #0:0 (copy)".to_string())
        );
    }

    #[test]
    fn test_event_line_skips_textless_events() {
        assert_eq!(event_line(FfmpegEvent::Done), None);
        assert_eq!(event_line(FfmpegEvent::LogEOF), None);
    }
}
