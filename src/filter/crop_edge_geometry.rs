//! Crop Edge Geometry front-end.
//!
//! Validates the host's parameters against a [`DataStructure`], then runs
//! [`crop_edge_geometry`] and stores the result either next to the source
//! or in its place. The store is only modified after a complete crop.

use serde::{Deserialize, Serialize};

use crate::algs::context::ExecutionContext;
use crate::algs::crop_edge::{BoundaryIntersectionBehavior, CropOutcome, crop_edge_geometry};
use crate::data::data_path::DataPath;
use crate::data::data_structure::DataStructure;
use crate::geometry::bounds::{Axis, BoundingBox};
use crate::mesh_error::{MeshKernelError, Warning};

/// Advisory code: vertex arrays are copied but not interpolated.
pub const VERTEX_DATA_WARNING: i64 = -100;

const VERTEX_DATA_WARNING_MESSAGE: &str = "A vertex data array was detected in the selected edge geometry.  This filter currently only interpolates vertex positions, associated vertex data values will not be interpolated.";

/// Parameters for one crop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropEdgeGeometryInputValues {
    pub source_geometry_path: DataPath,
    pub created_geometry_path: DataPath,
    pub min_coords: [f32; 3],
    pub max_coords: [f32; 3],
    /// Replace the source geometry instead of creating a new one.
    #[serde(default)]
    pub remove_original_geometry: bool,
    #[serde(default)]
    pub crop_x_dim: bool,
    #[serde(default)]
    pub crop_y_dim: bool,
    #[serde(default)]
    pub crop_z_dim: bool,
    #[serde(default)]
    pub boundary_intersection_behavior: BoundaryIntersectionBehavior,
}

impl CropEdgeGeometryInputValues {
    pub fn crop_flags(&self) -> [bool; 3] {
        [self.crop_x_dim, self.crop_y_dim, self.crop_z_dim]
    }

    /// Crop box with unselected axes unbounded.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_axes(self.crop_flags(), self.min_coords, self.max_coords)
    }

    /// Selected axes as a string such as `"XZ"`.
    pub fn crop_dimensions(&self) -> String {
        Axis::ALL
            .iter()
            .filter(|axis| self.crop_flags()[axis.index()])
            .map(ToString::to_string)
            .collect()
    }

    /// Where the cropped geometry ends up.
    pub fn destination_path(&self) -> &DataPath {
        if self.remove_original_geometry {
            &self.source_geometry_path
        } else {
            &self.created_geometry_path
        }
    }
}

/// Everything known about a crop before running it.
#[derive(Clone, Debug, PartialEq)]
pub struct PreflightResult {
    pub warnings: Vec<Warning>,
    /// Human-readable list of the cropped axes.
    pub crop_summary: String,
    pub destination_path: DataPath,
}

/// Outcome of [`execute`].
#[derive(Clone, Debug, PartialEq)]
pub struct FilterReport {
    pub warnings: Vec<Warning>,
    pub outcome: CropOutcome,
    pub destination_path: DataPath,
}

/// Check `values` against `store` without modifying anything.
pub fn preflight(
    store: &DataStructure,
    values: &CropEdgeGeometryInputValues,
) -> Result<PreflightResult, MeshKernelError> {
    let source = store.geometry(&values.source_geometry_path)?;

    let crop = values.crop_flags();
    if !crop.iter().any(|&c| c) {
        return Err(MeshKernelError::NoDimensionsChosen);
    }
    for axis in Axis::ALL {
        let (min, max) = (values.min_coords[axis.index()], values.max_coords[axis.index()]);
        if crop[axis.index()] && max < min {
            return Err(MeshKernelError::MinLargerThanMax { axis, min, max });
        }
    }

    let destination_path = values.destination_path().clone();
    if !values.remove_original_geometry && store.contains(&destination_path) {
        return Err(MeshKernelError::DataObjectExists(destination_path));
    }

    let mut warnings = Vec::new();
    if !source.vertex_data().is_empty() {
        log::warn!(
            "edge geometry `{}` has vertex arrays; their values are copied, not interpolated",
            values.source_geometry_path
        );
        warnings.push(Warning::new(VERTEX_DATA_WARNING, VERTEX_DATA_WARNING_MESSAGE));
    }

    Ok(PreflightResult {
        warnings,
        crop_summary: format!(
            "This filter will crop the edge geometry in the following dimension(s):  {}",
            values.crop_dimensions()
        ),
        destination_path,
    })
}

/// Crop the source geometry and store the result.
///
/// On error or cancellation the store is left untouched.
pub fn execute(
    store: &mut DataStructure,
    values: &CropEdgeGeometryInputValues,
    ctx: &ExecutionContext<'_>,
) -> Result<FilterReport, MeshKernelError> {
    let PreflightResult {
        warnings,
        destination_path,
        ..
    } = preflight(store, values)?;

    let source = store.geometry(&values.source_geometry_path)?;
    let mut destination = source.empty_like();
    let outcome = crop_edge_geometry(
        source,
        &mut destination,
        &values.bounding_box(),
        values.boundary_intersection_behavior,
        ctx,
    )?;

    match outcome {
        CropOutcome::Cancelled => {
            log::debug!("crop of `{}` cancelled", values.source_geometry_path);
        }
        CropOutcome::Complete(_) if values.remove_original_geometry => {
            store.replace_geometry(&destination_path, destination)?;
        }
        CropOutcome::Complete(_) => {
            store.insert_geometry(destination_path.clone(), destination)?;
        }
    }

    Ok(FilterReport {
        warnings,
        outcome,
        destination_path,
    })
}
