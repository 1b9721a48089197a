//! Corner → [`OutputRecord`] resolution.

use crate::math::WorldTransform;
use crate::mesh::{ColorLayer, PolyMesh, UvLayer};

use super::record::{OutputRecord, DEFAULT_COLOR, DEFAULT_UV};

/// One (polygon, corner) occurrence and the vertex it references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CornerRef {
    /// Polygon index within the mesh.
    pub polygon: usize,
    /// Corner position within the polygon (0-based).
    pub corner: usize,
    /// Vertex index the corner references.
    pub vertex: u32,
}

/// Resolves corners of one mesh snapshot into world-space records.
///
/// The mesh must have passed [`PolyMesh::validate`]; layer data is not
/// required to be complete.
pub struct AttributeResolver<'a> {
    positions: &'a [[f32; 3]],
    normals: &'a [[f32; 3]],
    transform: &'a WorldTransform,
    colors: Option<&'a ColorLayer>,
    uvs: Option<&'a UvLayer>,
}

impl<'a> AttributeResolver<'a> {
    /// Create a resolver for `mesh` placed by `transform`.
    pub fn new(mesh: &'a PolyMesh, transform: &'a WorldTransform) -> Self {
        Self {
            positions: mesh.positions(),
            normals: mesh.normals(),
            transform,
            colors: mesh.color_layer(),
            uvs: mesh.uv_layer(),
        }
    }

    /// Build the record for one corner.
    ///
    /// Missing layers, polygons or slots fall back to [`DEFAULT_COLOR`] and
    /// [`DEFAULT_UV`].
    pub fn resolve(&self, corner: CornerRef) -> OutputRecord {
        let vertex = corner.vertex as usize;
        OutputRecord {
            position: self.transform.apply_to_point(self.positions[vertex]),
            normal: self.transform.apply_to_normal(self.normals[vertex]),
            color: self.color(corner),
            uv: self.uv(corner),
        }
    }

    fn color(&self, corner: CornerRef) -> [f32; 3] {
        self.colors
            .and_then(|layer| layer.color(corner.polygon, corner.corner + 1))
            .unwrap_or(DEFAULT_COLOR)
    }

    fn uv(&self, corner: CornerRef) -> [f32; 2] {
        self.uvs
            .and_then(|layer| layer.uv(corner.polygon, corner.corner))
            .unwrap_or(DEFAULT_UV)
    }
}
