//! Parameter-level front-ends that run kernels against a [`DataStructure`].
//!
//! [`DataStructure`]: crate::data::data_structure::DataStructure

pub mod crop_edge_geometry;

pub use crop_edge_geometry::{
    CropEdgeGeometryInputValues, FilterReport, PreflightResult, execute, preflight,
};
