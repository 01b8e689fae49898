//! Core library for re-tagging numbered audiobook chapter files with ffmpeg.
//!
//! This crate infers the chapter layout of a directory (chapter count, the
//! width of the chapter-number prefix, and the cover image), plans a new name
//! for every chapter, and rewrites each file's album, artist, genre and track
//! tags through ffmpeg, either in place or into a separate directory.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use abmeta_core::{CoreConfig, run_batch};
//! use abmeta_core::events::{EventDispatcher, TraceEventHandler};
//! use abmeta_core::external::{SidecarSpawner, StdFileSystem};
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! let mut config = CoreConfig::new(
//!     PathBuf::from("/path/to/book"),
//!     "_WinterWorldRID",
//!     "Winter World",
//!     "A.G. Riddle",
//! );
//! config.output_dir = Some(PathBuf::from("/path/to/tagged"));
//!
//! let mut events = EventDispatcher::new();
//! events.add_handler(Arc::new(TraceEventHandler::new()));
//!
//! let summary = run_batch(&SidecarSpawner, &StdFileSystem, &config, &events).unwrap();
//! println!("{} chapter(s) converted", summary.converted);
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod events;
pub mod external;
pub mod inference;
pub mod plan;
pub mod processing;

// Re-exports for public API
pub use config::CoreConfig;
pub use discovery::{DirectoryListing, list_directory};
pub use error::{CoreError, CoreResult};
pub use inference::{InferredLayout, infer_layout};
pub use plan::{ChapterPlan, ChapterPlans, MetadataSet};
pub use processing::{BatchSummary, TransformResult, process_chapters, run_batch};
