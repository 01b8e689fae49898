//! Chapter planning.
//!
//! Turns an [`InferredLayout`] and the run configuration into one
//! [`ChapterPlan`] per chapter index. Plans are produced lazily by
//! [`ChapterPlans`], so each chapter is planned right before it is processed
//! and dropped once its transform completes.

use crate::config::{AUDIOBOOK_GENRE, CoreConfig};
use crate::inference::InferredLayout;

use std::path::PathBuf;

/// Paths and tags for a single chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterPlan {
    /// 1-based chapter index
    pub index: usize,
    /// `index` left-padded with zeros to the inferred prefix width
    pub chapter_number: String,
    /// Existing chapter file
    pub old_file_path: PathBuf,
    /// Where the transcoder writes the tagged file
    pub new_file_path: PathBuf,
    /// Directory containing `new_file_path`
    pub target_directory: PathBuf,
}

impl ChapterPlan {
    /// Builds the plan for chapter `index`.
    ///
    /// In-place mode writes to a `_new` sibling of the original file; a
    /// distinct output directory receives the file under its final name.
    pub fn new(config: &CoreConfig, layout: &InferredLayout, index: usize) -> Self {
        let chapter_number = pad_chapter_number(index, layout.prefix_width);
        let filename = format!("{}{}", chapter_number, config.suffix);
        let old_file_path = config
            .input_dir
            .join(format!("{}.{}", filename, config.extension));

        let (target_directory, new_file_path) = match config.distinct_output_dir() {
            Some(output_dir) => (
                output_dir.to_path_buf(),
                output_dir.join(format!("{}.{}", filename, config.extension)),
            ),
            None => (
                config.input_dir.clone(),
                config
                    .input_dir
                    .join(format!("{}_new.{}", filename, config.extension)),
            ),
        };

        Self {
            index,
            chapter_number,
            old_file_path,
            new_file_path,
            target_directory,
        }
    }

    /// Tags written to this chapter.
    pub fn metadata(&self, config: &CoreConfig) -> MetadataSet {
        MetadataSet {
            album: config.title.clone(),
            artist: config.author.clone(),
            genre: AUDIOBOOK_GENRE.to_string(),
            track: self.chapter_number.clone(),
        }
    }
}

/// Standard audiobook tags for one chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataSet {
    pub album: String,
    pub artist: String,
    pub genre: String,
    pub track: String,
}

impl MetadataSet {
    /// Key/value pairs in the order they are passed to the transcoder.
    pub fn pairs(&self) -> [(&'static str, &str); 4] {
        [
            ("album", self.album.as_str()),
            ("artist", self.artist.as_str()),
            ("genre", self.genre.as_str()),
            ("track", self.track.as_str()),
        ]
    }
}

/// Left-pads `index` with zeros to `width` characters.
///
/// Numbers wider than `width` are returned unpadded and never truncated.
///
/// ```rust
/// use abmeta_core::plan::pad_chapter_number;
///
/// assert_eq!(pad_chapter_number(7, 3), "007");
/// assert_eq!(pad_chapter_number(1234, 3), "1234");
/// ```
pub fn pad_chapter_number(index: usize, width: usize) -> String {
    format!("{:0width$}", index, width = width)
}

/// Lazy iterator over the plans for chapters `1..=audiofile_count`.
pub struct ChapterPlans<'a> {
    config: &'a CoreConfig,
    layout: &'a InferredLayout,
    next_index: usize,
}

impl<'a> ChapterPlans<'a> {
    pub fn new(config: &'a CoreConfig, layout: &'a InferredLayout) -> Self {
        Self {
            config,
            layout,
            next_index: 1,
        }
    }
}

impl Iterator for ChapterPlans<'_> {
    type Item = ChapterPlan;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index > self.layout.audiofile_count {
            return None;
        }
        let plan = ChapterPlan::new(self.config, self.layout, self.next_index);
        self.next_index += 1;
        Some(plan)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.layout.audiofile_count + 1).saturating_sub(self.next_index);
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(count: usize, width: usize) -> InferredLayout {
        InferredLayout {
            audiofile_count: count,
            prefix_width: width,
            cover_art_path: PathBuf::from("book/cover.jpg"),
        }
    }

    fn config() -> CoreConfig {
        CoreConfig::new(PathBuf::from("book"), "_ChapterName", "Foo", "Bar")
    }

    #[test]
    fn test_padding_has_exact_width_within_bound() {
        for width in 1..=4 {
            let bound = 10usize.pow(width as u32) - 1;
            for index in [1, bound / 2 + 1, bound] {
                assert_eq!(pad_chapter_number(index, width).len(), width);
            }
        }
    }

    #[test]
    fn test_padding_skipped_past_bound() {
        assert_eq!(pad_chapter_number(10, 1), "10");
        assert_eq!(pad_chapter_number(100, 2), "100");
        assert_eq!(pad_chapter_number(1000, 3), "1000");
    }

    #[test]
    fn test_in_place_plan() {
        let plan = ChapterPlan::new(&config(), &layout(2, 3), 1);
        assert_eq!(plan.chapter_number, "001");
        assert_eq!(plan.old_file_path, PathBuf::from("book/001_ChapterName.mp3"));
        assert_eq!(plan.new_file_path, PathBuf::from("book/001_ChapterName_new.mp3"));
        assert_eq!(plan.target_directory, PathBuf::from("book"));
    }

    #[test]
    fn test_output_dir_plan() {
        let mut config = config();
        config.output_dir = Some(PathBuf::from("tagged"));
        config.extension = "m4a".to_string();

        let plan = ChapterPlan::new(&config, &layout(12, 2), 12);
        assert_eq!(plan.chapter_number, "12");
        assert_eq!(plan.old_file_path, PathBuf::from("book/12_ChapterName.m4a"));
        assert_eq!(plan.new_file_path, PathBuf::from("tagged/12_ChapterName.m4a"));
        assert_eq!(plan.target_directory, PathBuf::from("tagged"));
    }

    #[test]
    fn test_output_dir_equal_to_input_is_in_place() {
        let mut config = config();
        config.output_dir = Some(PathBuf::from("book"));

        let plan = ChapterPlan::new(&config, &layout(1, 2), 1);
        assert_eq!(plan.new_file_path, PathBuf::from("book/01_ChapterName_new.mp3"));
    }

    #[test]
    fn test_metadata_set() {
        let config = config();
        let plan = ChapterPlan::new(&config, &layout(3, 2), 3);
        let metadata = plan.metadata(&config);

        assert_eq!(
            metadata.pairs(),
            [
                ("album", "Foo"),
                ("artist", "Bar"),
                ("genre", "audiobook"),
                ("track", "03"),
            ]
        );
    }

    #[test]
    fn test_plans_cover_every_index_in_order() {
        let config = config();
        let layout = layout(3, 1);
        let plans = ChapterPlans::new(&config, &layout);
        assert_eq!(plans.size_hint(), (3, Some(3)));

        let numbers: Vec<String> = plans.map(|plan| plan.chapter_number).collect();
        assert_eq!(numbers, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_zero_chapters_yield_no_plans() {
        let config = config();
        let layout = layout(0, 3);
        assert_eq!(ChapterPlans::new(&config, &layout).count(), 0);
    }
}
