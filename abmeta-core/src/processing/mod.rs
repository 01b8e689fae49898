//! Chapter processing logic and orchestration.
//!
//! Organizes the per-chapter transform and the batch loop that drives it, and
//! exposes the primary entry points for running a batch.

/// Main batch orchestration
pub mod batch;

/// Single-chapter transcoder run and finalize step
pub mod transform;

pub use batch::{BatchSummary, process_chapters, run_batch};
pub use transform::{TransformResult, finalize, run_transform};
