#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-kernels
//!
//! mesh-kernels provides two small computational cores for labeled
//! volumetric and edge-mesh data, together with the in-memory data store
//! they operate on.
//!
//! ## Features
//! - Edge-geometry cropping to an axis-aligned box, with a choice of
//!   interpolating, ignoring or rejecting edges that cross the boundary
//! - Attribute arrays carried through the crop, copied one array per task
//!   (on the rayon pool when the `rayon` feature is enabled)
//! - SurfaceNets cell flags: a packed `u32` per grid cell describing edge
//!   crossings, face crossings, vertex type and junction count
//! - Cooperative cancellation through a host-owned `AtomicBool`
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! mesh-kernels = "0.3"
//! # Optional features:
//! # default-features = false            # serial array copies and cell scans
//! # features = ["check-invariants"]     # invariant checks in release builds
//! ```
//!
//! ```
//! use mesh_kernels::prelude::*;
//!
//! let source = EdgeGeometry::from_lists(
//!     &[[0.0, 0.0, 0.0], [1.0, 2.0, -2.0], [3.0, 1.0, -2.0]],
//!     &[[0, 1], [1, 2]],
//! )?;
//! let bounds = BoundingBox::from_axes([true, true, false], [-0.5, -0.5, 0.0], [1.5, 2.5, 0.0]);
//! let mut cropped = source.empty_like();
//! let outcome = crop_edge_geometry(
//!     &source,
//!     &mut cropped,
//!     &bounds,
//!     BoundaryIntersectionBehavior::InterpolateOutsideVertex,
//!     &ExecutionContext::detached(),
//! )?;
//! assert_eq!(outcome.stats().map(|s| s.kept_edges), Some(2));
//! assert_eq!(cropped.vertex(2), Some([1.5, 1.75, -2.0]));
//!
//! let flag = CellFlag::from_labels(&[0, 0, 0, 0, 1, 1, 1, 1]);
//! assert_eq!(flag.vertex_type(), VertexType::SurfaceVertex);
//! # Ok::<(), MeshKernelError>(())
//! ```

pub mod algs;
pub mod data;
pub mod debug_invariants;
pub mod filter;
pub mod geometry;
pub mod mesh_error;
pub mod surface_nets;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::array_copy::{ArrayCopyTask, run_copy_tasks};
    pub use crate::algs::context::ExecutionContext;
    pub use crate::algs::crop_edge::{
        BoundaryIntersectionBehavior, CropOutcome, CropStats, crop_edge_geometry,
    };
    pub use crate::data::attribute_matrix::{ArrayInfo, AttributeMatrix};
    pub use crate::data::data_array::DataArray;
    pub use crate::data::data_path::DataPath;
    pub use crate::data::data_structure::DataStructure;
    pub use crate::data::tagged_array::{ArrayScalar, ScalarType, TaggedArray, TaggedArrayRef};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::filter::crop_edge_geometry::CropEdgeGeometryInputValues;
    pub use crate::geometry::bounds::{Axis, BoundingBox};
    pub use crate::geometry::edge_geom::EdgeGeometry;
    pub use crate::mesh_error::{MeshKernelError, Warning};
    pub use crate::surface_nets::cell_flag::{
        CellFlag, CellFlagFields, Edge, Face, FaceCrossingType, VertexType,
    };
    pub use crate::surface_nets::label_grid::LabelGrid;
}
