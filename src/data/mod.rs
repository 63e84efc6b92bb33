//! Data module: arrays, attribute matrices and the path-keyed store

pub mod attribute_matrix;
pub mod data_array;
pub mod data_path;
pub mod data_structure;
pub mod tagged_array;

pub use attribute_matrix::{ArrayInfo, AttributeMatrix};
pub use data_array::DataArray;
pub use data_path::DataPath;
pub use data_structure::DataStructure;
pub use tagged_array::{ArrayScalar, ScalarType, TaggedArray, TaggedArrayRef};
