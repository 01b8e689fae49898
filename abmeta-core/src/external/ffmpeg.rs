//! FFmpeg command building for the chapter metadata rewrite
//!
//! The rewrite never re-encodes: both inputs (the chapter audio and the cover
//! image) are stream-copied into the output, and only the container tags
//! change.

use crate::plan::{ChapterPlan, MetadataSet};

use ffmpeg_sidecar::command::FfmpegCommand;
use std::path::Path;

/// Builds the ffmpeg invocation that tags one chapter.
///
/// Equivalent to:
///
/// ```text
/// ffmpeg -hide_banner -y -i <old> -i <cover> -map 0 -map 1 -c copy \
///     -metadata album=<title> -metadata artist=<author> \
///     -metadata genre=audiobook -metadata track=<chapter> <new>
/// ```
///
/// Arguments are passed to the process directly, so values containing
/// spaces or quotes need no escaping.
pub fn build_metadata_command(
    ffmpeg_path: &Path,
    plan: &ChapterPlan,
    cover_art_path: &Path,
    metadata: &MetadataSet,
) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new_with_path(ffmpeg_path);
    cmd.overwrite();
    cmd.input(plan.old_file_path.to_string_lossy().as_ref());
    cmd.input(cover_art_path.to_string_lossy().as_ref());
    cmd.args(["-map", "0", "-map", "1", "-c", "copy"]);
    for (key, value) in metadata.pairs() {
        cmd.arg("-metadata");
        cmd.arg(format!("{key}={value}"));
    }
    cmd.output(plan.new_file_path.to_string_lossy().as_ref());
    cmd
}
