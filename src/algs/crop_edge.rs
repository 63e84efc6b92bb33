//! Crop an edge geometry to an axis-aligned box.
//!
//! Vertices are classified against inclusive bounds. Edges with both
//! endpoints inside are kept, edges with both outside are dropped, and
//! edges that straddle the boundary follow a [`BoundaryIntersectionBehavior`].
//! Surviving vertices and edges keep their relative order, and every
//! attribute array is compacted through the same keep-masks.
//!
//! Nothing is written to the destination until classification has
//! finished, so a failed crop leaves it exactly as it was passed in.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::algs::array_copy::{ArrayCopyTask, run_copy_tasks};
use crate::algs::context::ExecutionContext;
use crate::debug_invariants::DebugInvariants;
use crate::geometry::bounds::BoundingBox;
use crate::geometry::edge_geom::EdgeGeometry;
use crate::mesh_error::MeshKernelError;

/// Old-to-new vertex index sentinel for vertices that are not kept.
const INVALID_VERTEX: i64 = -1;

/// What to do with an edge that has exactly one endpoint inside the box.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum BoundaryIntersectionBehavior {
    /// Keep the edge and move the outside endpoint onto the box boundary.
    #[default]
    InterpolateOutsideVertex = 0,
    /// Drop the edge.
    IgnoreEdge = 1,
    /// Fail the crop.
    FilterError = 2,
}

impl BoundaryIntersectionBehavior {
    pub const ALL: [BoundaryIntersectionBehavior; 3] = [
        BoundaryIntersectionBehavior::InterpolateOutsideVertex,
        BoundaryIntersectionBehavior::IgnoreEdge,
        BoundaryIntersectionBehavior::FilterError,
    ];
}

impl TryFrom<u64> for BoundaryIntersectionBehavior {
    type Error = MeshKernelError;

    fn try_from(index: u64) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(BoundaryIntersectionBehavior::InterpolateOutsideVertex),
            1 => Ok(BoundaryIntersectionBehavior::IgnoreEdge),
            2 => Ok(BoundaryIntersectionBehavior::FilterError),
            other => Err(MeshKernelError::InvalidBoundaryBehavior(other)),
        }
    }
}

impl From<BoundaryIntersectionBehavior> for u64 {
    fn from(behavior: BoundaryIntersectionBehavior) -> Self {
        behavior as u64
    }
}

/// Counts describing a finished crop.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CropStats {
    pub kept_vertices: usize,
    pub kept_edges: usize,
    /// Outside vertices moved onto the box boundary.
    pub interpolated_vertices: usize,
}

/// Result of a crop that did not fail.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CropOutcome {
    Complete(CropStats),
    /// The cancel flag was raised during the attribute copies. The
    /// destination is partially written and should be discarded.
    Cancelled,
}

impl CropOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CropOutcome::Cancelled)
    }

    pub fn stats(&self) -> Option<CropStats> {
        match self {
            CropOutcome::Complete(stats) => Some(*stats),
            CropOutcome::Cancelled => None,
        }
    }
}

/// Per-vertex and per-edge keep decisions from the classification pass.
struct Classification {
    keep_vertex: Vec<bool>,
    keep_edge: Vec<bool>,
    interpolated: HashMap<usize, [f32; 3]>,
}

/// Crop `source` into `destination`.
///
/// `destination` must carry the same attribute-array layout as `source`
/// (see [`EdgeGeometry::empty_like`]); its lists and matrices are resized
/// to the kept counts and overwritten.
pub fn crop_edge_geometry(
    source: &EdgeGeometry,
    destination: &mut EdgeGeometry,
    bounds: &BoundingBox,
    behavior: BoundaryIntersectionBehavior,
    ctx: &ExecutionContext<'_>,
) -> Result<CropOutcome, MeshKernelError> {
    let Classification {
        keep_vertex,
        keep_edge,
        interpolated,
    } = classify(source, bounds, behavior)?;

    let kept_vertices = keep_vertex.iter().filter(|&&keep| keep).count();
    let kept_edges = keep_edge.iter().filter(|&&keep| keep).count();
    log::debug!(
        "crop keeps {kept_vertices}/{} vertices and {kept_edges}/{} edges ({} interpolated)",
        source.num_vertices(),
        source.num_edges(),
        interpolated.len()
    );

    destination.resize_vertices(kept_vertices);
    destination.resize_edges(kept_edges);

    let mut vertex_map = vec![INVALID_VERTEX; source.num_vertices()];
    let mut next = 0i64;
    for (old, _) in keep_vertex.iter().enumerate().filter(|(_, keep)| **keep) {
        vertex_map[old] = next;
        next += 1;
    }

    let (dst_vertices, dst_edges, dst_vertex_data, dst_edge_data) = destination.parts_mut();

    for (old, &new) in vertex_map.iter().enumerate() {
        if new == INVALID_VERTEX {
            continue;
        }
        let coords = match interpolated.get(&old) {
            Some(&moved) => moved,
            None => source.vertex(old).unwrap_or_default(),
        };
        if let Some(tuple) = dst_vertices.tuple_mut(new as usize) {
            tuple.copy_from_slice(&coords);
        }
    }

    let vertex_tasks =
        ArrayCopyTask::for_matrix(source.vertex_data(), dst_vertex_data, &keep_vertex)?;
    for task in &vertex_tasks {
        if ctx.is_cancelled() {
            log::debug!("crop cancelled before copying vertex arrays");
            return Ok(CropOutcome::Cancelled);
        }
        ctx.message(&format!(
            "Cropping Edge Geometry || Copying Vertex Array {}",
            task.name
        ));
    }
    if !run_copy_tasks(vertex_tasks, ctx.cancel_flag())? {
        log::debug!("crop cancelled while copying vertex arrays");
        return Ok(CropOutcome::Cancelled);
    }

    let kept = keep_edge
        .iter()
        .enumerate()
        .filter_map(|(edge, &keep)| keep.then_some(edge));
    for (new_edge, old_edge) in kept.enumerate() {
        let [v0, v1] = source.edge(old_edge).unwrap_or_default();
        let pair = [vertex_map[v0 as usize], vertex_map[v1 as usize]];
        if pair.contains(&INVALID_VERTEX) {
            return Err(MeshKernelError::InvalidVertexMapping { edge: old_edge });
        }
        if let Some(tuple) = dst_edges.tuple_mut(new_edge) {
            tuple[0] = pair[0] as u64;
            tuple[1] = pair[1] as u64;
        }
    }

    let edge_tasks = ArrayCopyTask::for_matrix(source.edge_data(), dst_edge_data, &keep_edge)?;
    for task in &edge_tasks {
        if ctx.is_cancelled() {
            log::debug!("crop cancelled before copying edge arrays");
            return Ok(CropOutcome::Cancelled);
        }
        ctx.message(&format!(
            "Cropping Edge Geometry || Copying Edge Array {}",
            task.name
        ));
    }
    if !run_copy_tasks(edge_tasks, ctx.cancel_flag())? {
        log::debug!("crop cancelled while copying edge arrays");
        return Ok(CropOutcome::Cancelled);
    }

    destination.debug_assert_invariants();
    Ok(CropOutcome::Complete(CropStats {
        kept_vertices,
        kept_edges,
        interpolated_vertices: interpolated.len(),
    }))
}

/// Single pass over the edges deciding what survives. Each edge's vertex
/// indices are checked as the edge is reached, so the first failing edge
/// decides which error is returned.
fn classify(
    source: &EdgeGeometry,
    bounds: &BoundingBox,
    behavior: BoundaryIntersectionBehavior,
) -> Result<Classification, MeshKernelError> {
    let positions: Vec<[f32; 3]> = source
        .vertices()
        .tuples()
        .map(|t| [t[0], t[1], t[2]])
        .collect();
    let inside: Vec<bool> = positions.iter().map(|&p| bounds.contains(p)).collect();

    let mut keep_vertex = vec![false; positions.len()];
    let mut keep_edge = vec![false; source.num_edges()];
    let mut interpolated = HashMap::new();

    let num_vertices = positions.len();
    for (edge, pair) in source.edges().tuples().enumerate() {
        if let Some(&vertex) = pair.iter().find(|&&v| v >= num_vertices as u64) {
            return Err(MeshKernelError::InvalidVertexIndex {
                edge,
                vertex,
                num_vertices,
            });
        }
        let (v0, v1) = (pair[0] as usize, pair[1] as usize);
        let (in_vertex, out_vertex) = match (inside[v0], inside[v1]) {
            (true, true) => {
                keep_edge[edge] = true;
                keep_vertex[v0] = true;
                keep_vertex[v1] = true;
                continue;
            }
            (false, false) => continue,
            (true, false) => (v0, v1),
            (false, true) => (v1, v0),
        };

        match behavior {
            BoundaryIntersectionBehavior::FilterError => {
                return Err(MeshKernelError::OutsideVertex {
                    edge,
                    inside: positions[in_vertex],
                    outside: positions[out_vertex],
                    bounds: *bounds,
                });
            }
            BoundaryIntersectionBehavior::IgnoreEdge => {}
            BoundaryIntersectionBehavior::InterpolateOutsideVertex => {
                let moved =
                    bounds.interpolate_outside_vertex(positions[in_vertex], positions[out_vertex]);
                // Later edges overwrite earlier ones for a shared outside vertex.
                interpolated.insert(out_vertex, moved);
                keep_edge[edge] = true;
                keep_vertex[v0] = true;
                keep_vertex[v1] = true;
            }
        }
    }

    Ok(Classification {
        keep_vertex,
        keep_edge,
        interpolated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;

    fn square_loop() -> EdgeGeometry {
        EdgeGeometry::from_lists(
            &[
                [0.0, 0.0, 0.0],
                [1.0, 2.0, -2.0],
                [3.0, 1.0, -2.0],
                [2.0, -1.0, 0.0],
            ],
            &[[0, 1], [1, 2], [2, 3], [3, 0]],
        )
        .unwrap()
    }

    fn xy_box() -> BoundingBox {
        BoundingBox::from_axes([true, true, false], [-0.5, -0.5, -0.5], [1.5, 2.5, 0.5])
    }

    fn crop(
        source: &EdgeGeometry,
        bounds: &BoundingBox,
        behavior: BoundaryIntersectionBehavior,
    ) -> Result<(EdgeGeometry, CropOutcome), MeshKernelError> {
        let mut destination = source.empty_like();
        let outcome = crop_edge_geometry(
            source,
            &mut destination,
            bounds,
            behavior,
            &ExecutionContext::detached(),
        )?;
        Ok((destination, outcome))
    }

    #[test]
    fn ignore_drops_straddling_edges() {
        let (out, outcome) =
            crop(&square_loop(), &xy_box(), BoundaryIntersectionBehavior::IgnoreEdge).unwrap();
        assert_eq!(
            outcome.stats(),
            Some(CropStats {
                kept_vertices: 2,
                kept_edges: 1,
                interpolated_vertices: 0
            })
        );
        assert_eq!(out.vertex(0), Some([0.0, 0.0, 0.0]));
        assert_eq!(out.vertex(1), Some([1.0, 2.0, -2.0]));
        assert_eq!(out.edge(0), Some([0, 1]));
    }

    #[test]
    fn interpolate_moves_outside_vertices() {
        let (out, outcome) = crop(
            &square_loop(),
            &xy_box(),
            BoundaryIntersectionBehavior::InterpolateOutsideVertex,
        )
        .unwrap();
        assert_eq!(outcome.stats().map(|s| s.interpolated_vertices), Some(2));
        assert_eq!(out.num_vertices(), 4);
        assert_eq!(out.vertex(2), Some([1.5, 1.75, -2.0]));
        assert_eq!(out.vertex(3), Some([1.0, -0.5, 0.0]));
        let edges: Vec<_> = (0..out.num_edges()).filter_map(|e| out.edge(e)).collect();
        assert_eq!(edges, vec![[0, 1], [1, 2], [3, 0]]);
    }

    #[test]
    fn filter_error_reports_first_straddling_edge() {
        let bounds = BoundingBox::from_axes([true, false, false], [0.5, 0.5, -0.5], [1.5, 2.0, 0.5]);
        let err = crop(&square_loop(), &bounds, BoundaryIntersectionBehavior::FilterError)
            .unwrap_err();
        assert_eq!(err.code(), -1221);
        let MeshKernelError::OutsideVertex {
            edge,
            inside,
            outside,
            ..
        } = err
        else {
            panic!("unexpected error {err:?}");
        };
        assert_eq!(edge, 0);
        assert_eq!(inside, [1.0, 2.0, -2.0]);
        assert_eq!(outside, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn invalid_index_fails_before_any_write() {
        let source = EdgeGeometry::from_lists(&[[0.0; 3], [1.0; 3]], &[[0, 1], [1, 7]]).unwrap();
        let mut destination = source.empty_like();
        let err = crop_edge_geometry(
            &source,
            &mut destination,
            &BoundingBox::unbounded(),
            BoundaryIntersectionBehavior::IgnoreEdge,
            &ExecutionContext::detached(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            MeshKernelError::InvalidVertexIndex {
                edge: 1,
                vertex: 7,
                num_vertices: 2
            }
        );
        assert_eq!(destination, source.empty_like());
    }

    #[test]
    fn unbounded_crop_is_identity() {
        let source = square_loop();
        let (out, _) = crop(
            &source,
            &BoundingBox::unbounded(),
            BoundaryIntersectionBehavior::FilterError,
        )
        .unwrap();
        assert_eq!(out, source);
    }

    #[test]
    fn raised_flag_cancels_at_first_array() {
        use crate::data::attribute_matrix::AttributeMatrix;
        use crate::data::data_array::DataArray;

        let source = square_loop()
            .with_vertex_data(
                AttributeMatrix::new("Vertex Data", 4)
                    .with_array("Ids", DataArray::from_vec(vec![1u32, 2, 3, 4], 1).unwrap())
                    .unwrap(),
            )
            .unwrap();
        let mut destination = source.empty_like();
        let flag = AtomicBool::new(true);
        let messages = std::cell::RefCell::new(Vec::<String>::new());
        let sink = |m: &str| messages.borrow_mut().push(m.to_string());
        let outcome = crop_edge_geometry(
            &source,
            &mut destination,
            &xy_box(),
            BoundaryIntersectionBehavior::IgnoreEdge,
            &ExecutionContext::new(&flag, &sink),
        )
        .unwrap();
        assert!(outcome.is_cancelled());
        // Nothing is reported for arrays that were never copied.
        assert!(messages.borrow().is_empty());
    }

    #[test]
    fn behavior_index_round_trip() {
        for behavior in BoundaryIntersectionBehavior::ALL {
            assert_eq!(
                BoundaryIntersectionBehavior::try_from(u64::from(behavior)),
                Ok(behavior)
            );
        }
        assert_eq!(
            BoundaryIntersectionBehavior::try_from(3).unwrap_err().code(),
            -1230
        );
    }
}
