//! EdgeGeometry: vertices joined by line segments.
//!
//! The geometry owns a shared vertex list (3 × `f32` per vertex), a shared
//! edge list (2 × `u64` vertex indices per edge) and one attribute matrix
//! for each of them.

use crate::data::attribute_matrix::AttributeMatrix;
use crate::data::data_array::DataArray;
use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshKernelError;

pub const DEFAULT_VERTICES_NAME: &str = "SharedVertexList";
pub const DEFAULT_EDGES_NAME: &str = "SharedEdgeList";
pub const DEFAULT_VERTEX_DATA_NAME: &str = "Vertex Data";
pub const DEFAULT_EDGE_DATA_NAME: &str = "Edge Data";

/// Line-segment mesh with per-vertex and per-edge attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeGeometry {
    vertices_name: String,
    edges_name: String,
    vertices: DataArray<f32>,
    edges: DataArray<u64>,
    vertex_data: AttributeMatrix,
    edge_data: AttributeMatrix,
}

impl EdgeGeometry {
    /// Build a geometry from its two lists, with empty attribute matrices.
    ///
    /// Edge indices are not checked here; see [`DebugInvariants::validate_invariants`].
    pub fn new(vertices: DataArray<f32>, edges: DataArray<u64>) -> Result<Self, MeshKernelError> {
        check_components(DEFAULT_VERTICES_NAME, &vertices, 3)?;
        check_components(DEFAULT_EDGES_NAME, &edges, 2)?;
        let vertex_data = AttributeMatrix::new(DEFAULT_VERTEX_DATA_NAME, vertices.num_tuples());
        let edge_data = AttributeMatrix::new(DEFAULT_EDGE_DATA_NAME, edges.num_tuples());
        Ok(Self {
            vertices_name: DEFAULT_VERTICES_NAME.to_string(),
            edges_name: DEFAULT_EDGES_NAME.to_string(),
            vertices,
            edges,
            vertex_data,
            edge_data,
        })
    }

    /// Convenience constructor from coordinate triples and index pairs.
    pub fn from_lists(vertices: &[[f32; 3]], edges: &[[u64; 2]]) -> Result<Self, MeshKernelError> {
        let vertices = DataArray::from_vec(vertices.concat(), 3)?;
        let edges = DataArray::from_vec(edges.concat(), 2)?;
        Self::new(vertices, edges)
    }

    /// Attach the vertex attribute matrix; its tuple count must match the vertex list.
    pub fn with_vertex_data(mut self, matrix: AttributeMatrix) -> Result<Self, MeshKernelError> {
        check_matrix(&matrix, self.vertices.num_tuples())?;
        self.vertex_data = matrix;
        Ok(self)
    }

    /// Attach the edge attribute matrix; its tuple count must match the edge list.
    pub fn with_edge_data(mut self, matrix: AttributeMatrix) -> Result<Self, MeshKernelError> {
        check_matrix(&matrix, self.edges.num_tuples())?;
        self.edge_data = matrix;
        Ok(self)
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.num_tuples()
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.num_tuples()
    }

    /// Coordinates of vertex `index`.
    #[inline]
    pub fn vertex(&self, index: usize) -> Option<[f32; 3]> {
        self.vertices.tuple(index).map(|t| [t[0], t[1], t[2]])
    }

    /// Vertex indices of edge `index`.
    #[inline]
    pub fn edge(&self, index: usize) -> Option<[u64; 2]> {
        self.edges.tuple(index).map(|t| [t[0], t[1]])
    }

    pub fn vertices(&self) -> &DataArray<f32> {
        &self.vertices
    }

    pub fn vertices_mut(&mut self) -> &mut DataArray<f32> {
        &mut self.vertices
    }

    pub fn edges(&self) -> &DataArray<u64> {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut DataArray<u64> {
        &mut self.edges
    }

    pub fn vertices_name(&self) -> &str {
        &self.vertices_name
    }

    pub fn edges_name(&self) -> &str {
        &self.edges_name
    }

    pub fn vertex_data(&self) -> &AttributeMatrix {
        &self.vertex_data
    }

    pub fn vertex_data_mut(&mut self) -> &mut AttributeMatrix {
        &mut self.vertex_data
    }

    pub fn edge_data(&self) -> &AttributeMatrix {
        &self.edge_data
    }

    pub fn edge_data_mut(&mut self) -> &mut AttributeMatrix {
        &mut self.edge_data
    }

    /// Resize the vertex list and vertex attribute matrix together.
    pub fn resize_vertices(&mut self, num_vertices: usize) {
        self.vertices.resize_tuples(num_vertices);
        self.vertex_data.resize_tuples(num_vertices);
    }

    /// Resize the edge list and edge attribute matrix together.
    pub fn resize_edges(&mut self, num_edges: usize) {
        self.edges.resize_tuples(num_edges);
        self.edge_data.resize_tuples(num_edges);
    }

    /// Empty geometry with the same child names and attribute layout.
    pub fn empty_like(&self) -> Self {
        Self {
            vertices_name: self.vertices_name.clone(),
            edges_name: self.edges_name.clone(),
            vertices: self.vertices.empty_like(0),
            edges: self.edges.empty_like(0),
            vertex_data: self.vertex_data.empty_like(0),
            edge_data: self.edge_data.empty_like(0),
        }
    }

    /// Disjoint borrows of the vertex list, edge list and both matrices.
    pub(crate) fn parts_mut(
        &mut self,
    ) -> (
        &mut DataArray<f32>,
        &mut DataArray<u64>,
        &mut AttributeMatrix,
        &mut AttributeMatrix,
    ) {
        (
            &mut self.vertices,
            &mut self.edges,
            &mut self.vertex_data,
            &mut self.edge_data,
        )
    }
}

fn check_components<T>(
    name: &str,
    array: &DataArray<T>,
    expected: usize,
) -> Result<(), MeshKernelError> {
    if array.num_components() != expected {
        return Err(MeshKernelError::ComponentCountMismatch {
            name: name.to_string(),
            expected,
            found: array.num_components(),
        });
    }
    Ok(())
}

fn check_matrix(matrix: &AttributeMatrix, expected: usize) -> Result<(), MeshKernelError> {
    if matrix.num_tuples() != expected {
        return Err(MeshKernelError::TupleCountMismatch {
            owner: String::from("EdgeGeometry"),
            name: matrix.name().to_string(),
            expected,
            found: matrix.num_tuples(),
        });
    }
    matrix.validate_invariants()
}

impl DebugInvariants for EdgeGeometry {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "EdgeGeometry");
    }

    fn validate_invariants(&self) -> Result<(), MeshKernelError> {
        let num_vertices = self.num_vertices();
        for (edge, pair) in self.edges.tuples().enumerate() {
            if let Some(&vertex) = pair.iter().find(|&&v| v >= num_vertices as u64) {
                return Err(MeshKernelError::InvalidVertexIndex {
                    edge,
                    vertex,
                    num_vertices,
                });
            }
        }
        check_matrix(&self.vertex_data, num_vertices)?;
        check_matrix(&self.edge_data, self.num_edges())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::tagged_array::ScalarType;

    fn triangle() -> EdgeGeometry {
        EdgeGeometry::from_lists(
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            &[[0, 1], [1, 2], [2, 0]],
        )
        .unwrap()
    }

    #[test]
    fn list_accessors() {
        let g = triangle();
        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.num_edges(), 3);
        assert_eq!(g.vertex(1), Some([1.0, 0.0, 0.0]));
        assert_eq!(g.edge(2), Some([2, 0]));
        assert_eq!(g.edge(3), None);
        assert!(g.validate_invariants().is_ok());
    }

    #[test]
    fn rejects_wrong_widths_and_matrix_sizes() {
        let flat = DataArray::from_vec(vec![0.0f32; 4], 2).unwrap();
        let edges = DataArray::from_vec(vec![0u64, 1], 2).unwrap();
        assert!(matches!(
            EdgeGeometry::new(flat, edges),
            Err(MeshKernelError::ComponentCountMismatch { expected: 3, found: 2, .. })
        ));

        let err = triangle()
            .with_edge_data(AttributeMatrix::new(DEFAULT_EDGE_DATA_NAME, 2))
            .unwrap_err();
        assert!(matches!(err, MeshKernelError::TupleCountMismatch { expected: 3, found: 2, .. }));
    }

    #[test]
    fn out_of_range_edge_is_an_invariant_violation() {
        let g = EdgeGeometry::from_lists(&[[0.0; 3], [1.0; 3]], &[[0, 1], [1, 5]]).unwrap();
        assert_eq!(
            g.validate_invariants(),
            Err(MeshKernelError::InvalidVertexIndex {
                edge: 1,
                vertex: 5,
                num_vertices: 2
            })
        );
    }

    #[test]
    fn empty_like_keeps_layout() {
        let data = AttributeMatrix::new(DEFAULT_EDGE_DATA_NAME, 3)
            .with_array("Ids", DataArray::from_vec(vec![1i64, 2, 3], 1).unwrap())
            .unwrap();
        let g = triangle().with_edge_data(data).unwrap();
        let empty = g.empty_like();
        assert_eq!(empty.num_vertices(), 0);
        assert_eq!(empty.num_edges(), 0);
        assert_eq!(empty.vertices().num_components(), 3);
        let infos = empty.edge_data().array_infos();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].scalar_type, ScalarType::I64);
    }
}
