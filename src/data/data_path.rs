//! DataPath: slash-separated address of an object in a [`DataStructure`].
//!
//! [`DataStructure`]: crate::data::data_structure::DataStructure

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mesh_error::MeshKernelError;

/// Non-empty sequence of object names, root first.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct DataPath(Vec<String>);

impl DataPath {
    /// Build a path from its components.
    pub fn new<I, S>(components: I) -> Result<Self, MeshKernelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let components: Vec<String> = components.into_iter().map(Into::into).collect();
        if components.is_empty() {
            return Err(MeshKernelError::InvalidDataPath(String::new()));
        }
        for name in &components {
            validate_name(name)?;
        }
        Ok(Self(components))
    }

    /// Parse `"A/B/C"`.
    pub fn from_string(path: &str) -> Result<Self, MeshKernelError> {
        Self::new(path.split('/')).map_err(|_| MeshKernelError::InvalidDataPath(path.to_string()))
    }

    pub fn components(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`: a path has at least one component.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Final component.
    pub fn target_name(&self) -> &str {
        // Construction guarantees at least one component.
        self.0.last().map(String::as_str).unwrap_or_default()
    }

    /// Path with `name` appended.
    pub fn child(&self, name: &str) -> Result<Self, MeshKernelError> {
        validate_name(name)?;
        let mut components = self.0.clone();
        components.push(name.to_string());
        Ok(Self(components))
    }

    /// Path of the containing object, or `None` for a top-level path.
    pub fn parent(&self) -> Option<Self> {
        (self.0.len() > 1).then(|| Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Sibling path with the final component replaced.
    pub fn with_target_name(&self, name: &str) -> Result<Self, MeshKernelError> {
        validate_name(name)?;
        let mut components = self.0.clone();
        if let Some(last) = components.last_mut() {
            *last = name.to_string();
        }
        Ok(Self(components))
    }

    /// True when `self` is `other` or lies underneath it.
    pub fn starts_with(&self, other: &DataPath) -> bool {
        self.0.starts_with(&other.0)
    }
}

fn validate_name(name: &str) -> Result<(), MeshKernelError> {
    if name.is_empty() || name.contains('/') {
        return Err(MeshKernelError::InvalidDataPath(name.to_string()));
    }
    Ok(())
}

impl fmt::Display for DataPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

impl TryFrom<Vec<String>> for DataPath {
    type Error = MeshKernelError;

    fn try_from(components: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(components)
    }
}

impl From<DataPath> for Vec<String> {
    fn from(path: DataPath) -> Self {
        path.0
    }
}
