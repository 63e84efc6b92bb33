//! DataArray: flat, tuple-addressed storage.
//!
//! A `DataArray<T>` holds `num_tuples * num_components` values in one
//! contiguous `Vec<T>`. Tuple `i` occupies
//! `[i * num_components .. (i + 1) * num_components)`. Vertex lists are
//! 3-component `f32` arrays, edge lists 2-component `u64` arrays, and
//! attribute arrays any width.

use std::ops::{Index, IndexMut};

use crate::mesh_error::MeshKernelError;

/// Contiguous per-tuple storage with a fixed component width.
#[derive(Clone, Debug, PartialEq)]
pub struct DataArray<T> {
    num_components: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> DataArray<T> {
    /// Default-filled array of `num_tuples` tuples.
    pub fn new(num_tuples: usize, num_components: usize) -> Result<Self, MeshKernelError> {
        if num_components == 0 {
            return Err(MeshKernelError::ZeroComponents);
        }
        Ok(Self {
            num_components,
            data: vec![T::default(); num_tuples * num_components],
        })
    }

    /// Default-filled array with this array's component width.
    pub fn empty_like(&self, num_tuples: usize) -> Self {
        Self {
            num_components: self.num_components,
            data: vec![T::default(); num_tuples * self.num_components],
        }
    }

    /// Resize to `num_tuples`, truncating or filling new tuples with `T::default()`.
    pub fn resize_tuples(&mut self, num_tuples: usize) {
        self.data
            .resize(num_tuples * self.num_components, T::default());
    }
}

impl<T> DataArray<T> {
    /// Wrap an existing flat buffer.
    pub fn from_vec(data: Vec<T>, num_components: usize) -> Result<Self, MeshKernelError> {
        if num_components == 0 {
            return Err(MeshKernelError::ZeroComponents);
        }
        if data.len() % num_components != 0 {
            return Err(MeshKernelError::RaggedBuffer {
                len: data.len(),
                num_components,
            });
        }
        Ok(Self {
            num_components,
            data,
        })
    }

    #[inline]
    pub fn num_tuples(&self) -> usize {
        self.data.len() / self.num_components
    }

    #[inline]
    pub fn num_components(&self) -> usize {
        self.num_components
    }

    /// Total number of scalar values.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Read-only view of tuple `index`, or `None` past the end.
    #[inline]
    pub fn tuple(&self, index: usize) -> Option<&[T]> {
        let start = index.checked_mul(self.num_components)?;
        self.data.get(start..start + self.num_components)
    }

    /// Mutable view of tuple `index`, or `None` past the end.
    #[inline]
    pub fn tuple_mut(&mut self, index: usize) -> Option<&mut [T]> {
        let start = index.checked_mul(self.num_components)?;
        self.data.get_mut(start..start + self.num_components)
    }

    /// Iterate over tuples in index order.
    pub fn tuples(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks_exact(self.num_components)
    }

    pub fn into_inner(self) -> Vec<T> {
        self.data
    }
}

impl<T: Clone> DataArray<T> {
    /// Copy tuple `src_index` of `src` into tuple `dst_index` of `self`.
    pub fn copy_tuple_from(
        &mut self,
        dst_index: usize,
        src: &DataArray<T>,
        src_index: usize,
    ) -> Result<(), MeshKernelError> {
        if src.num_components != self.num_components {
            return Err(MeshKernelError::ComponentCountMismatch {
                name: String::from("<tuple copy>"),
                expected: self.num_components,
                found: src.num_components,
            });
        }
        let src_tuples = src.num_tuples();
        let from = src.tuple(src_index).ok_or(MeshKernelError::TupleOutOfRange {
            index: src_index,
            num_tuples: src_tuples,
        })?;
        let dst_tuples = self.num_tuples();
        let to = self
            .tuple_mut(dst_index)
            .ok_or(MeshKernelError::TupleOutOfRange {
                index: dst_index,
                num_tuples: dst_tuples,
            })?;
        to.clone_from_slice(from);
        Ok(())
    }
}

impl<T> Index<usize> for DataArray<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for DataArray<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_components_rejected() {
        assert_eq!(
            DataArray::<f32>::new(4, 0).unwrap_err(),
            MeshKernelError::ZeroComponents
        );
        assert!(matches!(
            DataArray::from_vec(vec![1u8, 2, 3], 2),
            Err(MeshKernelError::RaggedBuffer {
                len: 3,
                num_components: 2
            })
        ));
    }

    #[test]
    fn tuple_views_and_resize() {
        let mut a = DataArray::from_vec(vec![1i32, 2, 3, 4, 5, 6], 3).unwrap();
        assert_eq!(a.num_tuples(), 2);
        assert_eq!(a.tuple(1), Some(&[4, 5, 6][..]));
        assert_eq!(a.tuple(2), None);

        a.resize_tuples(3);
        assert_eq!(a.tuple(2), Some(&[0, 0, 0][..]));
        a.resize_tuples(1);
        assert_eq!(a.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn copy_tuple_checks_bounds_and_width() {
        let src = DataArray::from_vec(vec![7u64, 8, 9, 10], 2).unwrap();
        let mut dst = DataArray::<u64>::new(1, 2).unwrap();
        dst.copy_tuple_from(0, &src, 1).unwrap();
        assert_eq!(dst.as_slice(), &[9, 10]);

        assert!(matches!(
            dst.copy_tuple_from(0, &src, 2),
            Err(MeshKernelError::TupleOutOfRange { index: 2, .. })
        ));
        let narrow = DataArray::from_vec(vec![1u64], 1).unwrap();
        assert!(matches!(
            dst.copy_tuple_from(0, &narrow, 0),
            Err(MeshKernelError::ComponentCountMismatch { .. })
        ));
    }
}
