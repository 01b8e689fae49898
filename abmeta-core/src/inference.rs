// ============================================================================
// abmeta-core/src/inference.rs
// ============================================================================
//
// PATTERN INFERENCE: Chapter Count, Prefix Width and Cover Art
//
// Derives everything the chapter planner needs from a single directory
// listing. The three derivations are independent scans: a listing with an odd
// cover filename still yields a chapter count, and vice versa.
//
// KEY COMPONENTS:
// - count_audiofiles: entries named `<digits>_<anything>.<extension>`
// - infer_prefix_width: digit-run length of the FIRST listed entry only
// - infer_cover_art_path: first `.jpg`, `.gif` or `.png` entry, or cover.jpg
//
// Prefix width looks at the first entry and nothing else, so the
// result depends on file system listing order.

use crate::config::DEFAULT_COVER_FILENAME;
use crate::discovery::DirectoryListing;
use crate::error::{CoreError, CoreResult};
use crate::events::{Event, EventDispatcher};

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

// ============================================================================
// PATTERNS
// ============================================================================

/// `<digits>_<word chars>`, searched anywhere in the entry name.
static PREFIX_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)_\w+").expect("prefix pattern is valid"));

/// Whole-name match for image files. Extensions are case-sensitive.
static COVER_ART_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.*\.(jpg|gif|png)$").expect("cover art pattern is valid"));

/// Builds the whole-name chapter file pattern for `extension`.
fn audiofile_pattern(extension: &str) -> CoreResult<Regex> {
    Ok(Regex::new(&format!(r"^\d+_.*\.{}$", regex::escape(extension)))?)
}

// ============================================================================
// INFERRED LAYOUT
// ============================================================================

/// What the listing says about the chapter set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredLayout {
    /// Number of entries following the chapter naming convention
    pub audiofile_count: usize,
    /// Width of the zero-padded chapter number
    pub prefix_width: usize,
    /// Cover image passed to the transcoder; not checked for existence
    pub cover_art_path: PathBuf,
}

/// Runs all three derivations, reporting each value as it is derived.
///
/// The chapter count is reported before prefix inference can fail, matching
/// the order the values are computed in.
pub fn infer_layout(
    listing: &DirectoryListing,
    input_dir: &Path,
    extension: &str,
    events: &EventDispatcher,
) -> CoreResult<InferredLayout> {
    let audiofile_count = count_audiofiles(listing, extension)?;
    log::info!("Found {} chapter file(s) with extension .{}", audiofile_count, extension);
    events.emit(Event::AudiofileCount {
        count: audiofile_count,
    });

    let prefix_width = infer_prefix_width(listing)?;
    events.emit(Event::PrefixWidth {
        width: prefix_width,
    });

    let cover_art_path = infer_cover_art_path(listing, input_dir);
    events.emit(Event::CoverArtPath {
        path: cover_art_path.display().to_string(),
    });

    Ok(InferredLayout {
        audiofile_count,
        prefix_width,
        cover_art_path,
    })
}

/// Counts entries whose whole name is `<digits>_<anything>.<extension>`.
pub fn count_audiofiles(listing: &DirectoryListing, extension: &str) -> CoreResult<usize> {
    let pattern = audiofile_pattern(extension)?;
    Ok(listing
        .entries()
        .iter()
        .filter(|entry| pattern.is_match(entry))
        .count())
}

/// Returns the character length of the chapter-number digits in the first
/// listed entry.
///
/// # Errors
///
/// * `CoreError::NoPrefixFound` - The first entry holds no `<digits>_<word>`
///   run, even if later entries do.
pub fn infer_prefix_width(listing: &DirectoryListing) -> CoreResult<usize> {
    let first = listing.first();
    PREFIX_PATTERN
        .captures(first)
        .and_then(|captures| captures.get(1))
        .map(|digits| digits.as_str().chars().count())
        .ok_or_else(|| CoreError::NoPrefixFound(first.to_string()))
}

/// Returns `<input_dir>/<first image entry>`, or `<input_dir>/cover.jpg` when
/// the listing holds no image.
pub fn infer_cover_art_path(listing: &DirectoryListing, input_dir: &Path) -> PathBuf {
    let filename = listing
        .entries()
        .iter()
        .find(|entry| COVER_ART_PATTERN.is_match(entry))
        .map(String::as_str)
        .unwrap_or(DEFAULT_COVER_FILENAME);
    input_dir.join(filename)
}
