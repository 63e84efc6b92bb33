//! Geometry types for mesh-kernels.
//!
//! This module provides the edge geometry consumed by the crop engine and
//! the axis-aligned bounds it crops against.

pub mod bounds;
pub mod edge_geom;

pub use bounds::{Axis, BoundingBox};
pub use edge_geom::EdgeGeometry;
