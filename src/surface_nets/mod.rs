//! SurfaceNets support: per-cell crossing flags over labeled volumes.
//!
//! The surface extraction that consumes these flags lives with the caller.

pub mod cell_flag;
pub mod label_grid;

pub use cell_flag::{
    CellFlag, CellFlagFields, CellLabels, EDGE_CORNERS, Edge, FACE_CORNERS, Face,
    FaceCrossingType, VertexType,
};
pub use label_grid::{LabelGrid, cell_flag_bits};
