//! DataStructure: path-keyed store of geometries.
//!
//! Geometries are addressed by [`DataPath`]. Their children resolve by
//! appending names: `<geometry>/<matrix>` for an attribute matrix,
//! `<geometry>/<matrix>/<array>` for an attribute array, and
//! `<geometry>/<list name>` for the shared vertex or edge list.

use std::collections::BTreeMap;

use crate::data::attribute_matrix::AttributeMatrix;
use crate::data::data_array::DataArray;
use crate::data::data_path::DataPath;
use crate::data::tagged_array::{ArrayScalar, TaggedArrayRef};
use crate::geometry::edge_geom::EdgeGeometry;
use crate::mesh_error::MeshKernelError;

/// In-memory object store.
#[derive(Clone, Debug, Default)]
pub struct DataStructure {
    geometries: BTreeMap<DataPath, EdgeGeometry>,
}

impl DataStructure {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when a geometry is stored exactly at `path`.
    pub fn contains(&self, path: &DataPath) -> bool {
        self.geometries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    /// Store `geometry` at `path`; fails if the path is taken.
    pub fn insert_geometry(
        &mut self,
        path: DataPath,
        geometry: EdgeGeometry,
    ) -> Result<(), MeshKernelError> {
        if self.geometries.contains_key(&path) {
            return Err(MeshKernelError::DataObjectExists(path));
        }
        self.geometries.insert(path, geometry);
        Ok(())
    }

    /// Swap the geometry at `path` for `geometry`, returning the old one.
    pub fn replace_geometry(
        &mut self,
        path: &DataPath,
        geometry: EdgeGeometry,
    ) -> Result<EdgeGeometry, MeshKernelError> {
        let slot = self.geometry_mut(path)?;
        Ok(std::mem::replace(slot, geometry))
    }

    pub fn geometry(&self, path: &DataPath) -> Result<&EdgeGeometry, MeshKernelError> {
        self.geometries
            .get(path)
            .ok_or_else(|| MeshKernelError::MissingDataObject(path.clone()))
    }

    pub fn geometry_mut(&mut self, path: &DataPath) -> Result<&mut EdgeGeometry, MeshKernelError> {
        self.geometries
            .get_mut(path)
            .ok_or_else(|| MeshKernelError::MissingDataObject(path.clone()))
    }

    pub fn remove_geometry(&mut self, path: &DataPath) -> Result<EdgeGeometry, MeshKernelError> {
        self.geometries
            .remove(path)
            .ok_or_else(|| MeshKernelError::MissingDataObject(path.clone()))
    }

    /// Iterate over stored geometries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&DataPath, &EdgeGeometry)> {
        self.geometries.iter()
    }

    /// Resolve `<geometry>/<matrix>`.
    pub fn attribute_matrix(&self, path: &DataPath) -> Result<&AttributeMatrix, MeshKernelError> {
        let missing = || MeshKernelError::MissingDataObject(path.clone());
        let geometry = path
            .parent()
            .and_then(|parent| self.geometries.get(&parent))
            .ok_or_else(missing)?;
        let name = path.target_name();
        if geometry.vertex_data().name() == name {
            Ok(geometry.vertex_data())
        } else if geometry.edge_data().name() == name {
            Ok(geometry.edge_data())
        } else {
            Err(missing())
        }
    }

    /// Resolve `<geometry>/<matrix>/<array>` or `<geometry>/<list name>`
    /// to a typed array.
    pub fn array<T: ArrayScalar>(&self, path: &DataPath) -> Result<&DataArray<T>, MeshKernelError> {
        let parent = path
            .parent()
            .ok_or_else(|| MeshKernelError::MissingDataObject(path.clone()))?;
        let name = path.target_name();

        if let Some(geometry) = self.geometries.get(&parent) {
            let list: TaggedArrayRef<'_> = if geometry.vertices_name() == name {
                geometry.vertices().into()
            } else if geometry.edges_name() == name {
                geometry.edges().into()
            } else {
                return Err(MeshKernelError::MissingDataObject(path.clone()));
            };
            let found = list.scalar_type();
            return T::unwrap_ref(list).ok_or_else(|| MeshKernelError::ArrayTypeMismatch {
                name: name.to_string(),
                expected: T::SCALAR_TYPE,
                found,
            });
        }

        self.attribute_matrix(&parent)?.get::<T>(name)
    }
}
