//! Algorithms over edge geometries.

pub mod array_copy;
pub mod context;
pub mod crop_edge;

pub use array_copy::{ArrayCopyTask, run_copy_tasks};
pub use context::ExecutionContext;
pub use crop_edge::{BoundaryIntersectionBehavior, CropOutcome, CropStats, crop_edge_geometry};
