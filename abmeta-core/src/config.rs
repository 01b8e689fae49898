// ============================================================================
// abmeta-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Run-Level Configuration and Defaults
//
// This module defines the configuration value that is threaded through the
// chapter planner and the metadata transform executor. It is created once by
// the consumer of the library (abmeta-cli) and never mutated during a run.
//
// KEY COMPONENTS:
// - CoreConfig: Paths, naming convention and metadata for one batch
// - Default constants: Extension, genre, cover fallback, ffmpeg binary

use crate::error::{CoreError, CoreResult};

use std::path::{Component, Path, PathBuf};

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Default audio file extension matched in the input directory and produced.
pub const DEFAULT_EXTENSION: &str = "mp3";

/// Genre written to every chapter.
pub const AUDIOBOOK_GENRE: &str = "audiobook";

/// Cover art filename assumed when the listing holds no image.
pub const DEFAULT_COVER_FILENAME: &str = "cover.jpg";

/// Name (or path) of the transcoder binary.
pub const DEFAULT_FFMPEG_PATH: &str = "ffmpeg";

// ============================================================================
// CORE CONFIGURATION
// ============================================================================

/// Configuration for one batch run.
///
/// # Examples
///
/// ```rust
/// use abmeta_core::CoreConfig;
/// use std::path::PathBuf;
///
/// let mut config = CoreConfig::new(
///     PathBuf::from("/books/winter_world"),
///     "_WinterWorldRID",
///     "Winter World",
///     "A.G. Riddle",
/// );
/// config.output_dir = Some(PathBuf::from("/books/tagged"));
/// config.validate().unwrap();
/// assert!(config.distinct_output_dir().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    // ---- Path Configuration ----
    /// Directory holding the numbered chapter files
    pub input_dir: PathBuf,

    /// Optional destination directory. Unset or equal to `input_dir` means
    /// the chapters are rewritten in place.
    pub output_dir: Option<PathBuf>,

    // ---- Naming Convention ----
    /// Audio extension without the leading dot
    pub extension: String,

    /// Text following the zero-padded chapter number, used verbatim
    pub suffix: String,

    // ---- Metadata ----
    /// Written as the album tag
    pub title: String,

    /// Written as the artist tag
    pub author: String,

    // ---- Processing Options ----
    /// Transcoder binary used for every chapter
    pub ffmpeg_path: PathBuf,

    /// Plan only: no directory creation, transcoding or moves
    pub dry_run: bool,
}

impl CoreConfig {
    /// Creates a configuration with the default extension, in-place output
    /// and the `ffmpeg` found on `PATH`.
    pub fn new(
        input_dir: PathBuf,
        suffix: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            input_dir,
            output_dir: None,
            extension: DEFAULT_EXTENSION.to_string(),
            suffix: suffix.into(),
            title: title.into(),
            author: author.into(),
            ffmpeg_path: PathBuf::from(DEFAULT_FFMPEG_PATH),
            dry_run: false,
        }
    }

    /// Returns the output directory only when it is set and differs from the
    /// input directory. `None` selects in-place mode.
    ///
    /// Paths are compared as written, ignoring `.` components. No
    /// canonicalization happens: an absolute and a relative spelling of the
    /// input directory, or a symlink to it, count as distinct.
    pub fn distinct_output_dir(&self) -> Option<&Path> {
        self.output_dir
            .as_deref()
            .filter(|dir| !same_path_as_written(dir, &self.input_dir))
    }

    /// Checks the values that would otherwise produce unusable paths.
    pub fn validate(&self) -> CoreResult<()> {
        if self.input_dir.as_os_str().is_empty() {
            return Err(CoreError::Config("input directory must not be empty".to_string()));
        }
        if self.extension.is_empty() {
            return Err(CoreError::Config("extension must not be empty".to_string()));
        }
        if self.extension.starts_with('.') {
            return Err(CoreError::Config(format!(
                "extension '{}' must be given without a leading dot",
                self.extension
            )));
        }
        if self.ffmpeg_path.as_os_str().is_empty() {
            return Err(CoreError::Config("ffmpeg path must not be empty".to_string()));
        }
        Ok(())
    }
}

fn same_path_as_written(a: &Path, b: &Path) -> bool {
    fn parts(path: &Path) -> impl Iterator<Item = Component<'_>> {
        path.components().filter(|c| *c != Component::CurDir)
    }
    parts(a).eq(parts(b))
}
