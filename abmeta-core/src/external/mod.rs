// ============================================================================
// abmeta-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffmpeg and the File System
//
// This module encapsulates everything the pipeline does outside its own
// memory: spawning the ffmpeg transcoder and touching the file system. Both
// are expressed as traits with default implementations so the batch can be
// exercised against scripted fakes.
//
// KEY COMPONENTS:
// - FfmpegSpawner / FfmpegProcess: ffmpeg execution (ffmpeg-sidecar)
// - FileSystem: directory listing, directory creation and file moves
// - Command construction for the metadata rewrite

// ---- Internal crate imports ----
use crate::error::CoreResult;

// ---- Standard library imports ----
use std::fs;
use std::path::Path;

// ============================================================================
// SUBMODULES
// ============================================================================

/// Builds the ffmpeg command that rewrites a chapter's tags
pub mod ffmpeg;

/// Contains traits and implementations for executing ffmpeg commands
pub mod ffmpeg_executor;

/// Scripted implementations of the traits in this module, for tests
#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg::build_metadata_command;
pub use ffmpeg_executor::{
    FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner, event_line,
};

// ============================================================================
// FILE SYSTEM ACCESS
// ============================================================================

/// Trait for the file system operations the batch performs.
///
/// # Examples
///
/// ```rust
/// use abmeta_core::external::{FileSystem, StdFileSystem};
/// use std::path::Path;
///
/// let fs = StdFileSystem;
/// // A missing directory is reported as an error, never as an empty listing
/// assert!(fs.list_dir(Path::new("/surely/not/here/42")).is_err());
/// ```
pub trait FileSystem {
    /// Returns the entry names of `dir` in the order the file system reports
    /// them. No sorting and no filtering.
    fn list_dir(&self, dir: &Path) -> CoreResult<Vec<String>>;

    /// Creates `dir` and any missing parents. Succeeds if it already exists.
    fn create_dir_all(&self, dir: &Path) -> CoreResult<()>;

    /// Moves `from` onto `to`, replacing `to` if it exists.
    fn rename(&self, from: &Path, to: &Path) -> CoreResult<()>;
}

/// Standard implementation of [`FileSystem`] using `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn list_dir(&self, dir: &Path) -> CoreResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    fn create_dir_all(&self, dir: &Path) -> CoreResult<()> {
        Ok(fs::create_dir_all(dir)?)
    }

    fn rename(&self, from: &Path, to: &Path) -> CoreResult<()> {
        Ok(fs::rename(from, to)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_list_dir_returns_names_only() -> CoreResult<()> {
        let dir = tempdir()?;
        File::create(dir.path().join("001_Intro.mp3"))?;
        fs::create_dir(dir.path().join("extras"))?;

        let mut names = StdFileSystem.list_dir(dir.path())?;
        names.sort();
        assert_eq!(names, vec!["001_Intro.mp3".to_string(), "extras".to_string()]);
        Ok(())
    }

    #[test]
    fn test_create_dir_all_is_idempotent() -> CoreResult<()> {
        let dir = tempdir()?;
        let nested = dir.path().join("a").join("b");
        StdFileSystem.create_dir_all(&nested)?;
        StdFileSystem.create_dir_all(&nested)?;
        assert!(nested.is_dir());
        Ok(())
    }

    #[test]
    fn test_rename_overwrites_target() -> CoreResult<()> {
        let dir = tempdir()?;
        let old = dir.path().join("001_Intro.mp3");
        let new = dir.path().join("001_Intro_new.mp3");
        fs::write(&old, "original")?;
        fs::write(&new, "tagged")?;

        StdFileSystem.rename(&new, &old)?;
        assert_eq!(fs::read_to_string(&old)?, "tagged");
        assert!(!new.exists());
        Ok(())
    }
}
