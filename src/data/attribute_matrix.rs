//! AttributeMatrix: named arrays sharing one tuple count.
//!
//! A geometry owns one matrix per element kind (vertices, edges). Every
//! member array holds exactly one tuple per element, so resizing the
//! element list resizes the matrix and all of its arrays together.

use std::collections::BTreeMap;

use crate::data::data_array::DataArray;
use crate::data::tagged_array::{ArrayScalar, ScalarType, TaggedArray};
use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshKernelError;

/// Layout description of one member array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayInfo {
    pub name: String,
    pub scalar_type: ScalarType,
    pub num_components: usize,
}

/// Named collection of same-length arrays.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeMatrix {
    name: String,
    num_tuples: usize,
    arrays: BTreeMap<String, TaggedArray>,
}

impl AttributeMatrix {
    /// Create an empty matrix expecting `num_tuples` tuples per array.
    pub fn new(name: impl Into<String>, num_tuples: usize) -> Self {
        Self {
            name: name.into(),
            num_tuples,
            arrays: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_tuples(&self) -> usize {
        self.num_tuples
    }

    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.arrays.contains_key(name)
    }

    /// Insert a typed array, replacing any array of the same name.
    pub fn insert<T: ArrayScalar>(
        &mut self,
        name: impl Into<String>,
        array: DataArray<T>,
    ) -> Result<Option<TaggedArray>, MeshKernelError> {
        self.insert_tagged(name, T::wrap(array))
    }

    /// Insert a tagged array, replacing any array of the same name.
    pub fn insert_tagged(
        &mut self,
        name: impl Into<String>,
        array: TaggedArray,
    ) -> Result<Option<TaggedArray>, MeshKernelError> {
        let name = name.into();
        if array.num_tuples() != self.num_tuples {
            return Err(MeshKernelError::TupleCountMismatch {
                owner: self.name.clone(),
                name,
                expected: self.num_tuples,
                found: array.num_tuples(),
            });
        }
        Ok(self.arrays.insert(name, array))
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_array<T: ArrayScalar>(
        mut self,
        name: impl Into<String>,
        array: DataArray<T>,
    ) -> Result<Self, MeshKernelError> {
        self.insert(name, array)?;
        Ok(self)
    }

    pub fn remove(&mut self, name: &str) -> Option<TaggedArray> {
        self.arrays.remove(name)
    }

    /// Retrieve a typed array by name.
    pub fn get<T: ArrayScalar>(&self, name: &str) -> Result<&DataArray<T>, MeshKernelError> {
        let tagged = self.get_tagged(name)?;
        T::unwrap(tagged).ok_or_else(|| MeshKernelError::ArrayTypeMismatch {
            name: name.to_string(),
            expected: T::SCALAR_TYPE,
            found: tagged.scalar_type(),
        })
    }

    /// Retrieve a mutable typed array by name.
    ///
    /// The array's tuple count must be left unchanged.
    pub fn get_mut<T: ArrayScalar>(
        &mut self,
        name: &str,
    ) -> Result<&mut DataArray<T>, MeshKernelError> {
        let matrix = self.name.clone();
        let tagged = self
            .arrays
            .get_mut(name)
            .ok_or_else(|| MeshKernelError::MissingArray {
                matrix,
                name: name.to_string(),
            })?;
        let found = tagged.scalar_type();
        T::unwrap_mut(tagged).ok_or_else(|| MeshKernelError::ArrayTypeMismatch {
            name: name.to_string(),
            expected: T::SCALAR_TYPE,
            found,
        })
    }

    /// Retrieve a tagged array by name.
    pub fn get_tagged(&self, name: &str) -> Result<&TaggedArray, MeshKernelError> {
        self.arrays
            .get(name)
            .ok_or_else(|| MeshKernelError::MissingArray {
                matrix: self.name.clone(),
                name: name.to_string(),
            })
    }

    /// Iterate over all named arrays in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TaggedArray)> {
        self.arrays.iter()
    }

    /// Mutably iterate over all named arrays in name order.
    ///
    /// Callers must not change tuple counts through this iterator.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut TaggedArray)> {
        self.arrays.iter_mut()
    }

    /// Name, element type and tuple width of every member array.
    pub fn array_infos(&self) -> Vec<ArrayInfo> {
        self.arrays
            .iter()
            .map(|(name, array)| ArrayInfo {
                name: name.clone(),
                scalar_type: array.scalar_type(),
                num_components: array.num_components(),
            })
            .collect()
    }

    /// Resize the matrix and every member array.
    pub fn resize_tuples(&mut self, num_tuples: usize) {
        self.num_tuples = num_tuples;
        for array in self.arrays.values_mut() {
            array.resize_tuples(num_tuples);
        }
        crate::debug_invariants!(self.validate_invariants(), "AttributeMatrix::resize_tuples");
    }

    /// Same name and array layout, fresh default-filled storage.
    pub fn empty_like(&self, num_tuples: usize) -> Self {
        Self {
            name: self.name.clone(),
            num_tuples,
            arrays: self
                .arrays
                .iter()
                .map(|(name, array)| (name.clone(), array.empty_like(num_tuples)))
                .collect(),
        }
    }
}

impl DebugInvariants for AttributeMatrix {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "AttributeMatrix");
    }

    fn validate_invariants(&self) -> Result<(), MeshKernelError> {
        for (name, array) in &self.arrays {
            if array.num_tuples() != self.num_tuples {
                return Err(MeshKernelError::TupleCountMismatch {
                    owner: self.name.clone(),
                    name: name.clone(),
                    expected: self.num_tuples,
                    found: array.num_tuples(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex_data() -> AttributeMatrix {
        AttributeMatrix::new("Vertex Data", 3)
            .with_array("Ids", DataArray::from_vec(vec![4i32, 5, 6], 1).unwrap())
            .unwrap()
            .with_array(
                "Normals",
                DataArray::from_vec(vec![0.0f32, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0], 3)
                    .unwrap(),
            )
            .unwrap()
    }

    #[test]
    fn insert_rejects_wrong_tuple_count() {
        let mut am = AttributeMatrix::new("Edge Data", 2);
        let err = am
            .insert("Bad", DataArray::from_vec(vec![1u8, 2, 3], 1).unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            MeshKernelError::TupleCountMismatch {
                owner: "Edge Data".into(),
                name: "Bad".into(),
                expected: 2,
                found: 3,
            }
        );
    }

    #[test]
    fn typed_lookup_distinguishes_missing_and_mismatch() {
        let am = vertex_data();
        assert_eq!(am.get::<i32>("Ids").unwrap().as_slice(), &[4, 5, 6]);
        assert!(matches!(
            am.get::<u32>("Ids"),
            Err(MeshKernelError::ArrayTypeMismatch {
                expected: ScalarType::U32,
                found: ScalarType::I32,
                ..
            })
        ));
        assert!(matches!(
            am.get::<i32>("Nope"),
            Err(MeshKernelError::MissingArray { .. })
        ));
    }

    #[test]
    fn resize_keeps_members_in_step() {
        let mut am = vertex_data();
        am.resize_tuples(1);
        assert_eq!(am.num_tuples(), 1);
        assert_eq!(am.get::<f32>("Normals").unwrap().as_slice(), &[0.0, 0.0, 1.0]);
        assert!(am.validate_invariants().is_ok());
    }

    #[test]
    fn empty_like_replicates_layout() {
        let am = vertex_data();
        let out = am.empty_like(5);
        assert_eq!(out.name(), "Vertex Data");
        assert_eq!(out.array_infos(), am.array_infos());
        assert_eq!(out.get::<i32>("Ids").unwrap().num_tuples(), 5);
    }
}
