//! Masked, per-array attribute copies.
//!
//! Each [`ArrayCopyTask`] moves the tuples selected by a keep-mask from a
//! source array into consecutive tuples of a destination array of the
//! same element type. Tasks touch disjoint destinations, so a batch can
//! run on the rayon pool when the `rayon` feature is enabled.

use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::data::attribute_matrix::AttributeMatrix;
use crate::data::data_array::DataArray;
use crate::data::tagged_array::TaggedArray;
use crate::mesh_error::MeshKernelError;

/// Copy of one attribute array through a keep-mask.
#[derive(Debug)]
pub struct ArrayCopyTask<'a> {
    pub name: &'a str,
    pub source: &'a TaggedArray,
    pub destination: &'a mut TaggedArray,
    /// One entry per source tuple; `true` tuples are copied in order.
    pub mask: &'a [bool],
}

impl<'a> ArrayCopyTask<'a> {
    /// One task per array of `destination`, paired by name with `source`.
    ///
    /// Both matrices must hold the same array names.
    pub fn for_matrix(
        source: &'a AttributeMatrix,
        destination: &'a mut AttributeMatrix,
        mask: &'a [bool],
    ) -> Result<Vec<Self>, MeshKernelError> {
        if let Some((name, _)) = source.iter().find(|(name, _)| !destination.contains(name)) {
            return Err(MeshKernelError::MissingArray {
                matrix: destination.name().to_string(),
                name: name.to_string(),
            });
        }
        destination
            .iter_mut()
            .map(|(name, array)| -> Result<Self, MeshKernelError> {
                Ok(ArrayCopyTask {
                    name: name.as_str(),
                    source: source.get_tagged(name)?,
                    destination: array,
                    mask,
                })
            })
            .collect()
    }

    /// Run the copy, dispatching on the element type of both arrays.
    pub fn execute(self) -> Result<(), MeshKernelError> {
        let name = self.name;
        let mask = self.mask;
        match (self.source, self.destination) {
            (TaggedArray::Bool(s), TaggedArray::Bool(d)) => copy_masked(name, s, d, mask),
            (TaggedArray::I8(s), TaggedArray::I8(d)) => copy_masked(name, s, d, mask),
            (TaggedArray::U8(s), TaggedArray::U8(d)) => copy_masked(name, s, d, mask),
            (TaggedArray::I16(s), TaggedArray::I16(d)) => copy_masked(name, s, d, mask),
            (TaggedArray::U16(s), TaggedArray::U16(d)) => copy_masked(name, s, d, mask),
            (TaggedArray::I32(s), TaggedArray::I32(d)) => copy_masked(name, s, d, mask),
            (TaggedArray::U32(s), TaggedArray::U32(d)) => copy_masked(name, s, d, mask),
            (TaggedArray::I64(s), TaggedArray::I64(d)) => copy_masked(name, s, d, mask),
            (TaggedArray::U64(s), TaggedArray::U64(d)) => copy_masked(name, s, d, mask),
            (TaggedArray::F32(s), TaggedArray::F32(d)) => copy_masked(name, s, d, mask),
            (TaggedArray::F64(s), TaggedArray::F64(d)) => copy_masked(name, s, d, mask),
            (s, d) => Err(MeshKernelError::ArrayTypeMismatch {
                name: name.to_string(),
                expected: d.scalar_type(),
                found: s.scalar_type(),
            }),
        }
    }
}

fn copy_masked<T: Clone>(
    name: &str,
    source: &DataArray<T>,
    destination: &mut DataArray<T>,
    mask: &[bool],
) -> Result<(), MeshKernelError> {
    if source.num_components() != destination.num_components() {
        return Err(MeshKernelError::ComponentCountMismatch {
            name: name.to_string(),
            expected: destination.num_components(),
            found: source.num_components(),
        });
    }
    if mask.len() != source.num_tuples() {
        return Err(MeshKernelError::TupleCountMismatch {
            owner: String::from("copy mask"),
            name: name.to_string(),
            expected: mask.len(),
            found: source.num_tuples(),
        });
    }
    let kept = mask.iter().filter(|&&keep| keep).count();
    if kept != destination.num_tuples() {
        return Err(MeshKernelError::TupleCountMismatch {
            owner: String::from("copy destination"),
            name: name.to_string(),
            expected: kept,
            found: destination.num_tuples(),
        });
    }

    let selected = mask
        .iter()
        .enumerate()
        .filter_map(|(index, &keep)| keep.then_some(index));
    for (dst_index, src_index) in selected.enumerate() {
        destination.copy_tuple_from(dst_index, source, src_index)?;
    }
    Ok(())
}

/// Run every task, checking `cancel` before each one.
///
/// Returns `Ok(false)` when at least one task was skipped because the flag
/// was raised. All tasks have finished (or been skipped) on return.
pub fn run_copy_tasks(
    tasks: Vec<ArrayCopyTask<'_>>,
    cancel: &AtomicBool,
) -> Result<bool, MeshKernelError> {
    #[cfg(feature = "rayon")]
    {
        let ran = tasks
            .into_par_iter()
            .map(|task| {
                if cancel.load(Ordering::Relaxed) {
                    return Ok(false);
                }
                log::trace!("copying array `{}`", task.name);
                task.execute().map(|()| true)
            })
            .collect::<Result<Vec<bool>, MeshKernelError>>()?;
        Ok(ran.into_iter().all(|ran| ran))
    }
    #[cfg(not(feature = "rayon"))]
    {
        for task in tasks {
            if cancel.load(Ordering::Relaxed) {
                return Ok(false);
            }
            log::trace!("copying array `{}`", task.name);
            task.execute()?;
        }
        Ok(true)
    }
}
