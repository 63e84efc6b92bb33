//! Tagged, type-erased arrays for attribute matrices.
//!
//! Attribute matrices hold arrays of many element types side by side.
//! [`TaggedArray`] closes over the supported scalar types so generic code
//! (replicating a matrix layout, copying tuples) dispatches with a single
//! `match` instead of run-time downcasts.

use std::fmt;

use crate::data::data_array::DataArray;
use crate::mesh_error::MeshKernelError;

/// Scalar type tag for tagged arrays.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ScalarType {
    Bool,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl ScalarType {
    /// Returns a stable string label for the scalar type.
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarType::Bool => "bool",
            ScalarType::I8 => "i8",
            ScalarType::U8 => "u8",
            ScalarType::I16 => "i16",
            ScalarType::U16 => "u16",
            ScalarType::I32 => "i32",
            ScalarType::U32 => "u32",
            ScalarType::I64 => "i64",
            ScalarType::U64 => "u64",
            ScalarType::F32 => "f32",
            ScalarType::F64 => "f64",
        }
    }

    /// Parse a scalar type from a string label.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "bool" => Some(ScalarType::Bool),
            "i8" => Some(ScalarType::I8),
            "u8" => Some(ScalarType::U8),
            "i16" => Some(ScalarType::I16),
            "u16" => Some(ScalarType::U16),
            "i32" => Some(ScalarType::I32),
            "u32" => Some(ScalarType::U32),
            "i64" => Some(ScalarType::I64),
            "u64" => Some(ScalarType::U64),
            "f32" => Some(ScalarType::F32),
            "f64" => Some(ScalarType::F64),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tagged array storage, one variant per scalar type.
#[derive(Clone, Debug, PartialEq)]
pub enum TaggedArray {
    Bool(DataArray<bool>),
    I8(DataArray<i8>),
    U8(DataArray<u8>),
    I16(DataArray<i16>),
    U16(DataArray<u16>),
    I32(DataArray<i32>),
    U32(DataArray<u32>),
    I64(DataArray<i64>),
    U64(DataArray<u64>),
    F32(DataArray<f32>),
    F64(DataArray<f64>),
}

/// Run `$body` with `$arr` bound to the typed array inside any variant.
macro_rules! with_array {
    ($tagged:expr, $arr:ident => $body:expr) => {
        match $tagged {
            TaggedArray::Bool($arr) => $body,
            TaggedArray::I8($arr) => $body,
            TaggedArray::U8($arr) => $body,
            TaggedArray::I16($arr) => $body,
            TaggedArray::U16($arr) => $body,
            TaggedArray::I32($arr) => $body,
            TaggedArray::U32($arr) => $body,
            TaggedArray::I64($arr) => $body,
            TaggedArray::U64($arr) => $body,
            TaggedArray::F32($arr) => $body,
            TaggedArray::F64($arr) => $body,
        }
    };
}

impl TaggedArray {
    /// Default-filled array of the given type and shape.
    pub fn new(
        scalar_type: ScalarType,
        num_tuples: usize,
        num_components: usize,
    ) -> Result<Self, MeshKernelError> {
        Ok(match scalar_type {
            ScalarType::Bool => TaggedArray::Bool(DataArray::new(num_tuples, num_components)?),
            ScalarType::I8 => TaggedArray::I8(DataArray::new(num_tuples, num_components)?),
            ScalarType::U8 => TaggedArray::U8(DataArray::new(num_tuples, num_components)?),
            ScalarType::I16 => TaggedArray::I16(DataArray::new(num_tuples, num_components)?),
            ScalarType::U16 => TaggedArray::U16(DataArray::new(num_tuples, num_components)?),
            ScalarType::I32 => TaggedArray::I32(DataArray::new(num_tuples, num_components)?),
            ScalarType::U32 => TaggedArray::U32(DataArray::new(num_tuples, num_components)?),
            ScalarType::I64 => TaggedArray::I64(DataArray::new(num_tuples, num_components)?),
            ScalarType::U64 => TaggedArray::U64(DataArray::new(num_tuples, num_components)?),
            ScalarType::F32 => TaggedArray::F32(DataArray::new(num_tuples, num_components)?),
            ScalarType::F64 => TaggedArray::F64(DataArray::new(num_tuples, num_components)?),
        })
    }

    /// Return the scalar type tag for this array.
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            TaggedArray::Bool(_) => ScalarType::Bool,
            TaggedArray::I8(_) => ScalarType::I8,
            TaggedArray::U8(_) => ScalarType::U8,
            TaggedArray::I16(_) => ScalarType::I16,
            TaggedArray::U16(_) => ScalarType::U16,
            TaggedArray::I32(_) => ScalarType::I32,
            TaggedArray::U32(_) => ScalarType::U32,
            TaggedArray::I64(_) => ScalarType::I64,
            TaggedArray::U64(_) => ScalarType::U64,
            TaggedArray::F32(_) => ScalarType::F32,
            TaggedArray::F64(_) => ScalarType::F64,
        }
    }

    pub fn num_tuples(&self) -> usize {
        with_array!(self, arr => arr.num_tuples())
    }

    pub fn num_components(&self) -> usize {
        with_array!(self, arr => arr.num_components())
    }

    pub fn resize_tuples(&mut self, num_tuples: usize) {
        with_array!(self, arr => arr.resize_tuples(num_tuples))
    }

    /// Fresh array with this array's type and component width.
    pub fn empty_like(&self, num_tuples: usize) -> Self {
        with_array!(self, arr => TaggedArray::from(arr.empty_like(num_tuples)))
    }
}

/// Borrowed counterpart of [`TaggedArray`], for typed lookups of arrays
/// that are not owned by an attribute matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TaggedArrayRef<'a> {
    Bool(&'a DataArray<bool>),
    I8(&'a DataArray<i8>),
    U8(&'a DataArray<u8>),
    I16(&'a DataArray<i16>),
    U16(&'a DataArray<u16>),
    I32(&'a DataArray<i32>),
    U32(&'a DataArray<u32>),
    I64(&'a DataArray<i64>),
    U64(&'a DataArray<u64>),
    F32(&'a DataArray<f32>),
    F64(&'a DataArray<f64>),
}

impl TaggedArrayRef<'_> {
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            TaggedArrayRef::Bool(_) => ScalarType::Bool,
            TaggedArrayRef::I8(_) => ScalarType::I8,
            TaggedArrayRef::U8(_) => ScalarType::U8,
            TaggedArrayRef::I16(_) => ScalarType::I16,
            TaggedArrayRef::U16(_) => ScalarType::U16,
            TaggedArrayRef::I32(_) => ScalarType::I32,
            TaggedArrayRef::U32(_) => ScalarType::U32,
            TaggedArrayRef::I64(_) => ScalarType::I64,
            TaggedArrayRef::U64(_) => ScalarType::U64,
            TaggedArrayRef::F32(_) => ScalarType::F32,
            TaggedArrayRef::F64(_) => ScalarType::F64,
        }
    }
}

/// Maps a concrete element type to its [`TaggedArray`] variant.
pub trait ArrayScalar: Copy + Default + PartialEq + Send + Sync + fmt::Debug + 'static {
    /// Scalar type tag for this concrete type.
    const SCALAR_TYPE: ScalarType;

    /// Wrap a typed array into a tagged container.
    fn wrap(array: DataArray<Self>) -> TaggedArray;
    /// Borrow a typed array if the tag matches.
    fn unwrap(array: &TaggedArray) -> Option<&DataArray<Self>>;
    /// Mutably borrow a typed array if the tag matches.
    fn unwrap_mut(array: &mut TaggedArray) -> Option<&mut DataArray<Self>>;
    /// Recover the typed borrow if the tag matches.
    fn unwrap_ref(array: TaggedArrayRef<'_>) -> Option<&DataArray<Self>>;
}

macro_rules! impl_array_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ArrayScalar for $ty {
                const SCALAR_TYPE: ScalarType = ScalarType::$variant;

                fn wrap(array: DataArray<Self>) -> TaggedArray {
                    TaggedArray::$variant(array)
                }

                fn unwrap(array: &TaggedArray) -> Option<&DataArray<Self>> {
                    if let TaggedArray::$variant(array) = array {
                        Some(array)
                    } else {
                        None
                    }
                }

                fn unwrap_mut(array: &mut TaggedArray) -> Option<&mut DataArray<Self>> {
                    if let TaggedArray::$variant(array) = array {
                        Some(array)
                    } else {
                        None
                    }
                }

                fn unwrap_ref(array: TaggedArrayRef<'_>) -> Option<&DataArray<Self>> {
                    if let TaggedArrayRef::$variant(array) = array {
                        Some(array)
                    } else {
                        None
                    }
                }
            }

            impl<'a> From<&'a DataArray<$ty>> for TaggedArrayRef<'a> {
                fn from(array: &'a DataArray<$ty>) -> Self {
                    TaggedArrayRef::$variant(array)
                }
            }

            impl From<DataArray<$ty>> for TaggedArray {
                fn from(array: DataArray<$ty>) -> Self {
                    TaggedArray::$variant(array)
                }
            }
        )*
    };
}

impl_array_scalar!(
    bool => Bool,
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
);
