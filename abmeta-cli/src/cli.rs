// abmeta-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.

use abmeta_core::config::{DEFAULT_EXTENSION, DEFAULT_FFMPEG_PATH};
use clap::Parser;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "abmeta: Audiobook chapter tagger",
    long_about = "Rewrites the album, artist, genre and track tags of numbered audiobook \
                  chapter files with ffmpeg, embedding the cover image found next to them."
)]
pub struct Cli {
    /// Directory containing the numbered chapter files
    #[arg(short = 'i', long = "input-dir", value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Optional: Directory for the tagged files (defaults to rewriting in place).
    /// Compared with --input-dir as written: spell the input directory the same
    /// way (both relative or both absolute) to select in-place mode, otherwise
    /// ffmpeg is asked to overwrite the file it is reading.
    #[arg(short = 'o', long = "output-dir", value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Audio file extension, without the leading dot (".mp3" is rejected)
    #[arg(short = 'e', long, value_name = "EXT", default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// Text following the chapter number in every filename (e.g. _WinterWorldRID)
    #[arg(short = 's', long, value_name = "SUFFIX", allow_hyphen_values = true)]
    pub suffix: String,

    /// Book title, written as the album tag
    #[arg(short = 't', long, value_name = "TITLE")]
    pub title: String,

    /// Book author, written as the artist tag
    #[arg(short = 'a', long, value_name = "AUTHOR")]
    pub author: String,

    /// Print the inferred layout and the outcome of every chapter
    #[arg(short, long)]
    pub verbose: bool,

    /// Print diagnostics as JSON lines instead of plain text (requires --verbose)
    #[arg(long, requires = "verbose")]
    pub json: bool,

    /// Plan the renames without creating directories, transcoding or moving files
    #[arg(long)]
    pub dry_run: bool,

    /// Path to the ffmpeg binary.
    /// Can also be set via the ABMETA_FFMPEG environment variable.
    #[arg(long, value_name = "PATH", env = "ABMETA_FFMPEG", default_value = DEFAULT_FFMPEG_PATH)]
    pub ffmpeg: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 9] = [
        "abmeta",
        "--input-dir",
        "book",
        "--suffix",
        "_ChapterName",
        "--title",
        "Foo",
        "--author",
        "Bar",
    ];

    #[test]
    fn test_parse_required_args_with_defaults() {
        let cli = Cli::try_parse_from(REQUIRED).expect("required args should parse");

        assert_eq!(cli.input_dir, PathBuf::from("book"));
        assert!(cli.output_dir.is_none());
        assert_eq!(cli.extension, "mp3");
        assert_eq!(cli.suffix, "_ChapterName");
        assert_eq!(cli.title, "Foo");
        assert_eq!(cli.author, "Bar");
        assert!(!cli.verbose);
        assert!(!cli.json);
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_parse_short_flags() {
        let cli = Cli::try_parse_from([
            "abmeta", "-i", "in", "-o", "out", "-e", "m4a", "-s", "-Part", "-t", "Foo", "-a",
            "Bar", "-v",
        ])
        .expect("short flags should parse");

        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
        assert_eq!(cli.extension, "m4a");
        assert_eq!(cli.suffix, "-Part");
        assert!(cli.verbose);
    }

    #[test]
    fn test_missing_required_arg_is_rejected() {
        let result = Cli::try_parse_from(["abmeta", "--input-dir", "book", "--title", "Foo"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_json_requires_verbose() {
        let mut args = REQUIRED.to_vec();
        args.push("--json");
        assert!(Cli::try_parse_from(&args).is_err());

        args.push("--verbose");
        let cli = Cli::try_parse_from(&args).expect("--json with --verbose should parse");
        assert!(cli.json);
    }
}
