//! MeshKernelError: Unified error type for mesh-kernels public APIs
//!
//! Every fallible operation in the crate returns this error. Each variant
//! carries a stable integer [`code`](MeshKernelError::code) so hosts and
//! tests can tell failure causes apart without matching on message text.

use thiserror::Error;

use crate::data::data_path::DataPath;
use crate::data::tagged_array::ScalarType;
use crate::geometry::bounds::{Axis, BoundingBox};

/// Unified error type for mesh-kernels operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshKernelError {
    /// A cropped axis has its maximum below its minimum.
    #[error("{axis} Max ({max}) less than {axis} Min ({min})")]
    MinLargerThanMax { axis: Axis, min: f32, max: f32 },
    /// Cropping was requested with every axis disabled.
    #[error("At least one dimension must be selected to crop!")]
    NoDimensionsChosen,
    /// An edge refers to a vertex past the end of the vertex list.
    #[error(
        "Edge at index {edge} with value {vertex} references an invalid vertex index (vertex count is {num_vertices})."
    )]
    InvalidVertexIndex {
        edge: usize,
        vertex: u64,
        num_vertices: usize,
    },
    /// An edge straddles the crop bounds while the `FilterError` policy is active.
    #[error(
        "Edge {edge} connects inside vertex ({}, {}, {}) with outside vertex ({}, {}, {}).  This intersects the bounds of {bounds}",
        .inside[0], .inside[1], .inside[2], .outside[0], .outside[1], .outside[2]
    )]
    OutsideVertex {
        edge: usize,
        inside: [f32; 3],
        outside: [f32; 3],
        bounds: BoundingBox,
    },
    /// A kept edge remapped to the invalid vertex sentinel.
    #[error("Invalid vertex mapping during edge remapping of edge {edge}.")]
    InvalidVertexMapping { edge: usize },
    /// A boundary-intersection choice index outside the known range.
    #[error("Unknown boundary intersection behavior index {0}")]
    InvalidBoundaryBehavior(u64),
    /// A path string or component that cannot name a data object.
    #[error("Invalid data path `{0}`")]
    InvalidDataPath(String),
    /// Nothing is stored at the requested path.
    #[error("No data object found at path `{0}`")]
    MissingDataObject(DataPath),
    /// Something is already stored at the requested path.
    #[error("A data object already exists at path `{0}`")]
    DataObjectExists(DataPath),
    /// A named array is absent from an attribute matrix.
    #[error("Array `{name}` not found in attribute matrix `{matrix}`")]
    MissingArray { matrix: String, name: String },
    /// A typed lookup or copy met an array of a different element type.
    #[error("Array `{name}` has element type {found}, expected {expected}")]
    ArrayTypeMismatch {
        name: String,
        expected: ScalarType,
        found: ScalarType,
    },
    /// An array's tuple count disagrees with its owner.
    #[error("Array `{name}` has {found} tuples but `{owner}` requires {expected}")]
    TupleCountMismatch {
        owner: String,
        name: String,
        expected: usize,
        found: usize,
    },
    /// Two arrays (or an array and a caller) disagree on tuple width.
    #[error("Array `{name}` has {found} components per tuple, expected {expected}")]
    ComponentCountMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    /// A flat buffer does not split evenly into tuples.
    #[error("Buffer of length {len} is not a whole number of {num_components}-component tuples")]
    RaggedBuffer { len: usize, num_components: usize },
    /// Arrays must have at least one component per tuple.
    #[error("Arrays require at least one component per tuple")]
    ZeroComponents,
    /// A tuple index past the end of an array.
    #[error("Tuple index {index} out of range for array with {num_tuples} tuples")]
    TupleOutOfRange { index: usize, num_tuples: usize },
    /// A label volume whose buffer does not match its dimensions.
    #[error("Label grid of dimensions {dims:?} needs {expected} labels, found {found}")]
    LabelCountMismatch {
        dims: [usize; 3],
        expected: usize,
        found: usize,
    },
}

impl MeshKernelError {
    /// Stable integer code for this error.
    pub fn code(&self) -> i64 {
        match self {
            MeshKernelError::MinLargerThanMax { axis, .. } => match axis {
                Axis::X => -1210,
                Axis::Y => -1211,
                Axis::Z => -1212,
            },
            MeshKernelError::NoDimensionsChosen => -1213,
            MeshKernelError::InvalidVertexIndex { .. } => -1220,
            MeshKernelError::OutsideVertex { .. } => -1221,
            MeshKernelError::InvalidVertexMapping { .. } => -1222,
            MeshKernelError::InvalidBoundaryBehavior(_) => -1230,
            MeshKernelError::InvalidDataPath(_) => -2000,
            MeshKernelError::MissingDataObject(_) => -2001,
            MeshKernelError::DataObjectExists(_) => -2002,
            MeshKernelError::MissingArray { .. } => -2010,
            MeshKernelError::ArrayTypeMismatch { .. } => -2011,
            MeshKernelError::TupleCountMismatch { .. } => -2012,
            MeshKernelError::ComponentCountMismatch { .. } => -2013,
            MeshKernelError::RaggedBuffer { .. } => -2014,
            MeshKernelError::ZeroComponents => -2015,
            MeshKernelError::TupleOutOfRange { .. } => -2016,
            MeshKernelError::LabelCountMismatch { .. } => -3000,
        }
    }
}

/// Advisory, non-fatal condition reported alongside a successful result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub code: i64,
    pub message: String,
}

impl Warning {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
