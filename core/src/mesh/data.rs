//! CPU-side polygon mesh data structures.
//!
//! This module provides:
//! - [`Polygon`] - Ordered list of vertex references, one per corner
//! - [`PolyMesh`] - Vertices, per-vertex normals, polygons and attribute layers
//! - [`MeshError`] - Structural problems found by [`PolyMesh::validate`]

use thiserror::Error;

use super::layers::{ColorLayer, UvLayer};

/// Structural problems that make a mesh unreadable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("polygon {polygon} references vertex {vertex}, but the mesh has {vertex_count} vertices")]
    VertexOutOfRange {
        polygon: usize,
        vertex: u32,
        vertex_count: usize,
    },
    #[error("mesh has {positions} positions but {normals} normals")]
    NormalCountMismatch { positions: usize, normals: usize },
    #[error("polygon {polygon} has {corners} corners (need at least 3)")]
    TooFewCorners { polygon: usize, corners: usize },
}

/// A polygon: corner `i` references vertex `vertices[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polygon {
    /// Vertex indices in corner order.
    pub vertices: Vec<u32>,
}

impl Polygon {
    /// Creates a polygon from vertex indices in corner order.
    pub fn new(vertices: impl Into<Vec<u32>>) -> Self {
        Self {
            vertices: vertices.into(),
        }
    }

    /// Number of corners.
    #[inline]
    pub fn corner_count(&self) -> usize {
        self.vertices.len()
    }
}

/// A polygon mesh snapshot as handed to the exporter.
///
/// Positions and normals are per vertex, in the mesh's local space.
/// Colors and UVs live in optional per-corner layers; at most one of each
/// is active.
///
/// # Example
///
/// ```rust
/// use rawtri_core::mesh::{PolyMesh, Polygon};
///
/// let mesh = PolyMesh::new()
///     .with_vertices(
///         vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
///         vec![[0.0, 0.0, 1.0]; 3],
///     )
///     .with_polygons(vec![Polygon::new([0, 1, 2])]);
/// assert!(mesh.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolyMesh {
    label: Option<String>,
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    polygons: Vec<Polygon>,
    color_layer: Option<ColorLayer>,
    uv_layer: Option<UvLayer>,
}

impl PolyMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set vertex positions and normals.
    #[must_use]
    pub fn with_vertices(mut self, positions: Vec<[f32; 3]>, normals: Vec<[f32; 3]>) -> Self {
        self.positions = positions;
        self.normals = normals;
        self
    }

    /// Set the polygon list.
    #[must_use]
    pub fn with_polygons(mut self, polygons: Vec<Polygon>) -> Self {
        self.polygons = polygons;
        self
    }

    /// Set the active color layer.
    #[must_use]
    pub fn with_color_layer(mut self, layer: ColorLayer) -> Self {
        self.color_layer = Some(layer);
        self
    }

    /// Set the active UV layer.
    #[must_use]
    pub fn with_uv_layer(mut self, layer: UvLayer) -> Self {
        self.uv_layer = Some(layer);
        self
    }

    /// Set a debug label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the debug label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of polygons.
    #[inline]
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// Returns true if the mesh has no polygons.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Local vertex positions.
    #[inline]
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Mutable access to local vertex positions.
    pub fn positions_mut(&mut self) -> &mut [[f32; 3]] {
        &mut self.positions
    }

    /// Local vertex normals.
    #[inline]
    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    /// Mutable access to local vertex normals.
    pub fn normals_mut(&mut self) -> &mut [[f32; 3]] {
        &mut self.normals
    }

    /// Polygons in export order.
    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// The active color layer, if the mesh has one.
    pub fn color_layer(&self) -> Option<&ColorLayer> {
        self.color_layer.as_ref()
    }

    /// The active UV layer, if the mesh has one.
    pub fn uv_layer(&self) -> Option<&UvLayer> {
        self.uv_layer.as_ref()
    }

    /// Checks that every polygon can be read.
    ///
    /// Attribute layers are not checked: short or missing layer data is
    /// resolved to defaults at export time.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.normals.len() != self.positions.len() {
            return Err(MeshError::NormalCountMismatch {
                positions: self.positions.len(),
                normals: self.normals.len(),
            });
        }

        let vertex_count = self.positions.len();
        for (index, polygon) in self.polygons.iter().enumerate() {
            if polygon.corner_count() < 3 {
                return Err(MeshError::TooFewCorners {
                    polygon: index,
                    corners: polygon.corner_count(),
                });
            }
            if let Some(&vertex) = polygon
                .vertices
                .iter()
                .find(|&&v| v as usize >= vertex_count)
            {
                return Err(MeshError::VertexOutOfRange {
                    polygon: index,
                    vertex,
                    vertex_count,
                });
            }
        }

        Ok(())
    }

    /// Computes area-weighted vertex normals from the polygons.
    ///
    /// Each polygon contributes the cross product of its first two edges
    /// to every vertex it touches; results are normalised, and vertices
    /// that no polygon touches get a zero normal.
    pub fn compute_normals(&mut self) {
        use crate::math::Vec3;

        let mut accum = vec![Vec3::zeros(); self.positions.len()];

        for polygon in &self.polygons {
            let [a, b, c] = match polygon.vertices.as_slice() {
                [a, b, c, ..] => [*a, *b, *c],
                _ => continue,
            };
            let (Some(p0), Some(p1), Some(p2)) = (
                self.positions.get(a as usize),
                self.positions.get(b as usize),
                self.positions.get(c as usize),
            ) else {
                continue;
            };
            let p0 = Vec3::from(*p0);
            let face = (Vec3::from(*p1) - p0).cross(&(Vec3::from(*p2) - p0));
            for &v in &polygon.vertices {
                if let Some(n) = accum.get_mut(v as usize) {
                    *n += face;
                }
            }
        }

        self.normals = accum
            .into_iter()
            .map(|n| {
                let len = n.norm();
                if len > 0.0 {
                    (n / len).into()
                } else {
                    [0.0; 3]
                }
            })
            .collect();
    }
}
