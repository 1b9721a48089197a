//! Selected scene nodes as exportable objects.

use crate::math::{Mat4, WorldTransform};
use crate::mesh::PolyMesh;
use crate::raw::{ExportObject, MeshSnapshot, SnapshotError};

use super::modifier::apply_modifiers;
use super::types::SceneNode;

/// A selected node together with its resolved world matrix.
#[derive(Debug, Clone, Copy)]
pub struct SelectedObject<'a> {
    node: &'a SceneNode,
    meshes: &'a [PolyMesh],
    transform: WorldTransform,
}

impl<'a> SelectedObject<'a> {
    pub(crate) fn new(node: &'a SceneNode, meshes: &'a [PolyMesh], world: Mat4) -> Self {
        Self {
            node,
            meshes,
            transform: WorldTransform::from_matrix(world),
        }
    }

    /// The underlying scene node.
    pub fn node(&self) -> &'a SceneNode {
        self.node
    }
}

impl ExportObject for SelectedObject<'_> {
    fn name(&self) -> &str {
        self.node.name.as_deref().unwrap_or("unnamed")
    }

    fn world_transform(&self) -> WorldTransform {
        self.transform
    }

    fn acquire_mesh(&self, apply: bool) -> Result<MeshSnapshot<'_>, SnapshotError> {
        let index = self.node.mesh.ok_or(SnapshotError::NoMeshData)?;
        let mesh = self
            .meshes
            .get(index)
            .ok_or(SnapshotError::MissingMesh { index })?;

        if !apply {
            return Ok(MeshSnapshot::Borrowed(mesh));
        }

        let mut evaluated = mesh.clone();
        apply_modifiers(&mut evaluated, &self.node.modifiers)?;
        Ok(MeshSnapshot::Temporary(evaluated))
    }
}
