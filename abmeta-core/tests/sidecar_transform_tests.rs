// abmeta-core/tests/sidecar_transform_tests.rs
//
// Runs the real ffmpeg-sidecar spawner against a shell script standing in for
// ffmpeg, so the captured output goes through ffmpeg-sidecar's log parser.

#![cfg(unix)]

use abmeta_core::external::SidecarSpawner;
use abmeta_core::processing::run_transform;
use ffmpeg_sidecar::command::FfmpegCommand;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

// What ffmpeg prints when the chapter is readable but the cover is missing
const FAILED_RUN_STDERR: &str = "\
ffmpeg version 6.1.1 Copyright (c) 2000-2023 the FFmpeg developers
Input #0, mp3, from 'book/01_Part.mp3':
  Duration: 00:42:17.05, start: 0.025057, bitrate: 64 kb/s
  Stream #0:0: Audio: mp3, 44100 Hz, stereo, fltp, 64 kb/s
Stream mapping:
  Stream #0:0 -> #0:0 (copy)
[error] book/cover.jpg: No such file or directory
";

fn write_fake_ffmpeg(dir: &Path, stderr: &str, exit_code: i32) -> PathBuf {
    let script_path = dir.join("ffmpeg");
    let script = format!("#!/bin/sh\ncat >&2 <<'EOF'\n{stderr}EOF\nexit {exit_code}\n");
    fs::write(&script_path, script).expect("Failed to write fake ffmpeg");
    fs::set_permissions(&script_path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake ffmpeg executable");
    script_path
}

#[test]
fn test_failed_run_keeps_every_output_line() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let ffmpeg = write_fake_ffmpeg(dir.path(), FAILED_RUN_STDERR, 1);

    let mut cmd = FfmpegCommand::new_with_path(&ffmpeg);
    cmd.input("book/01_Part.mp3").output("book/01_Part_new.mp3");

    let result = run_transform(&SidecarSpawner, cmd);

    assert!(!result.succeeded);
    for expected in [
        "ffmpeg version 6.1.1",
        "Input #0, mp3, from 'book/01_Part.mp3'",
        "Duration: 00:42:17.05",
        "Audio: mp3, 44100 Hz",
        "Stream mapping:",
        "Stream #0:0 -> #0:0 (copy)",
        "book/cover.jpg: No such file or directory",
    ] {
        assert!(
            result.raw_output.contains(expected),
            "missing {expected:?} in {:?}",
            result.raw_output
        );
    }
    Ok(())
}
