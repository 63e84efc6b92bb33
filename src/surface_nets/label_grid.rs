//! Regular grid of integer labels and the per-cell flag scan over it.

use itertools::iproduct;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::mesh_error::MeshKernelError;
use crate::surface_nets::cell_flag::{CellFlag, CellLabels};

/// Point labels on an `nx × ny × nz` lattice, x varying fastest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelGrid {
    dims: [usize; 3],
    labels: Vec<i32>,
}

impl LabelGrid {
    pub fn new(dims: [usize; 3], labels: Vec<i32>) -> Result<Self, MeshKernelError> {
        let expected = dims
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .unwrap_or(usize::MAX);
        if labels.len() != expected {
            return Err(MeshKernelError::LabelCountMismatch {
                dims,
                expected,
                found: labels.len(),
            });
        }
        Ok(Self { dims, labels })
    }

    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    pub fn labels(&self) -> &[i32] {
        &self.labels
    }

    pub fn label(&self, x: usize, y: usize, z: usize) -> Option<i32> {
        let [nx, ny, nz] = self.dims;
        if x >= nx || y >= ny || z >= nz {
            return None;
        }
        self.labels.get(x + nx * (y + ny * z)).copied()
    }

    /// Cells per axis; one fewer than points, never negative.
    pub fn cell_dims(&self) -> [usize; 3] {
        self.dims.map(|d| d.saturating_sub(1))
    }

    pub fn num_cells(&self) -> usize {
        self.cell_dims().iter().product()
    }

    /// Cell coordinates in flag order (x fastest).
    pub fn cells(&self) -> impl Iterator<Item = [usize; 3]> {
        let [cx, cy, cz] = self.cell_dims();
        iproduct!(0..cz, 0..cy, 0..cx).map(|(z, y, x)| [x, y, z])
    }

    /// Corner labels of cell `(x, y, z)` in canonical corner order.
    pub fn cell_labels(&self, x: usize, y: usize, z: usize) -> Option<CellLabels> {
        let at = |dx: usize, dy: usize, dz: usize| self.label(x + dx, y + dy, z + dz);
        Some([
            at(0, 0, 0)?,
            at(1, 0, 0)?,
            at(1, 1, 0)?,
            at(0, 1, 0)?,
            at(0, 0, 1)?,
            at(1, 0, 1)?,
            at(1, 1, 1)?,
            at(0, 1, 1)?,
        ])
    }

    fn cell_flag(&self, [x, y, z]: [usize; 3]) -> CellFlag {
        self.cell_labels(x, y, z)
            .map(|labels| CellFlag::from_labels(&labels))
            .unwrap_or_default()
    }

    /// One flag per cell, x fastest.
    #[cfg(feature = "rayon")]
    pub fn cell_flags(&self) -> Vec<CellFlag> {
        let [cx, cy, _] = self.cell_dims();
        (0..self.num_cells())
            .into_par_iter()
            .map(|index| self.cell_flag([index % cx, (index / cx) % cy, index / (cx * cy)]))
            .collect()
    }

    /// One flag per cell, x fastest.
    #[cfg(not(feature = "rayon"))]
    pub fn cell_flags(&self) -> Vec<CellFlag> {
        self.cells().map(|cell| self.cell_flag(cell)).collect()
    }
}

/// Raw packed values of `flags` without copying.
pub fn cell_flag_bits(flags: &[CellFlag]) -> &[u32] {
    bytemuck::cast_slice(flags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface_nets::cell_flag::VertexType;

    /// 3 × 2 × 2 points; the x = 2 column carries a different label.
    fn grid() -> LabelGrid {
        let labels = (0..12).map(|i| if i % 3 == 2 { 1 } else { 0 }).collect();
        LabelGrid::new([3, 2, 2], labels).unwrap()
    }

    #[test]
    fn rejects_wrong_label_count() {
        assert_eq!(
            LabelGrid::new([2, 2, 2], vec![0; 7]),
            Err(MeshKernelError::LabelCountMismatch {
                dims: [2, 2, 2],
                expected: 8,
                found: 7
            })
        );
    }

    #[test]
    fn corner_order_is_canonical() {
        let g = LabelGrid::new([2, 2, 2], (0..8).collect()).unwrap();
        // Flat index = x + 2y + 4z.
        assert_eq!(g.cell_labels(0, 0, 0), Some([0, 1, 3, 2, 4, 5, 7, 6]));
        assert_eq!(g.cell_labels(1, 0, 0), None);
    }

    #[test]
    fn scan_matches_per_cell_classification() {
        let g = grid();
        assert_eq!(g.cell_dims(), [2, 1, 1]);
        let flags = g.cell_flags();
        assert_eq!(flags.len(), 2);
        assert_eq!(flags[0].vertex_type(), VertexType::NoVertex);
        assert_eq!(flags[1].vertex_type(), VertexType::SurfaceVertex);
        for (flag, [x, y, z]) in flags.iter().zip(g.cells()) {
            let labels = g.cell_labels(x, y, z).unwrap();
            assert_eq!(*flag, CellFlag::from_labels(&labels));
        }
        assert_eq!(cell_flag_bits(&flags)[1], flags[1].bit_flag());
    }

    #[test]
    fn flat_grid_has_no_cells() {
        let g = LabelGrid::new([4, 4, 1], vec![0; 16]).unwrap();
        assert_eq!(g.num_cells(), 0);
        assert!(g.cell_flags().is_empty());
    }
}
