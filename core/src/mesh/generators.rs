//! Mesh generators for common shapes.
//!
//! These generators produce [`PolyMesh`] values with normals and a UV
//! layer, ready to be placed in a [`Scene`](crate::scene::Scene).

use std::f32::consts::PI;

use super::data::{PolyMesh, Polygon};
use super::layers::UvLayer;

/// Generate a quad on the XY plane.
///
/// One 4-corner polygon centered at the origin, counter-clockwise when
/// seen from +Z, with every normal pointing along +Z.
///
/// UV coordinates go from (0,0) at the first corner to (1,1) at the third.
pub fn generate_quad(half_width: f32, half_height: f32) -> PolyMesh {
    let positions = vec![
        [-half_width, -half_height, 0.0],
        [half_width, -half_height, 0.0],
        [half_width, half_height, 0.0],
        [-half_width, half_height, 0.0],
    ];
    let normals = vec![[0.0, 0.0, 1.0]; 4];

    let mut uvs = UvLayer::new().with_name("UVMap");
    uvs.push_polygon(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);

    PolyMesh::new()
        .with_vertices(positions, normals)
        .with_polygons(vec![Polygon::new([0, 1, 2, 3])])
        .with_uv_layer(uvs)
        .with_label("quad")
}

/// Generate an axis-aligned cube centered at the origin.
///
/// Six quads over 24 vertices (four per face) so every face keeps a flat
/// normal.
pub fn generate_cube(half_extent: f32) -> PolyMesh {
    // (normal, u axis, v axis) per face; corners walk counter-clockwise
    // around the outward normal.
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
    ];
    const CORNERS: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

    let mut positions = Vec::with_capacity(24);
    let mut normals = Vec::with_capacity(24);
    let mut polygons = Vec::with_capacity(6);
    let mut uvs = UvLayer::new().with_name("UVMap");

    for (normal, u_axis, v_axis) in FACES {
        let base = positions.len() as u32;
        for (su, sv) in CORNERS {
            let p = [
                (normal[0] + u_axis[0] * su + v_axis[0] * sv) * half_extent,
                (normal[1] + u_axis[1] * su + v_axis[1] * sv) * half_extent,
                (normal[2] + u_axis[2] * su + v_axis[2] * sv) * half_extent,
            ];
            positions.push(p);
            normals.push(normal);
        }
        polygons.push(Polygon::new([base, base + 1, base + 2, base + 3]));
        uvs.push_polygon(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
    }

    PolyMesh::new()
        .with_vertices(positions, normals)
        .with_polygons(polygons)
        .with_uv_layer(uvs)
        .with_label("cube")
}

/// Generate a UV sphere.
///
/// The top and bottom rings are triangle fans around a single pole
/// vertex; every other band is made of quads. `segments` is clamped to at
/// least 3 and `rings` to at least 2.
///
/// # Arguments
///
/// * `radius` - Sphere radius
/// * `segments` - Number of longitudinal segments (around the equator)
/// * `rings` - Number of latitudinal rings (from pole to pole)
pub fn generate_uv_sphere(radius: f32, segments: u32, rings: u32) -> PolyMesh {
    let segments = segments.max(3);
    let rings = rings.max(2);

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut tex = Vec::new();

    // Pole vertices come first, then one row of `segments + 1` vertices per
    // interior ring (the seam column is duplicated for UV continuity).
    let north = 0u32;
    positions.push([0.0, radius, 0.0]);
    normals.push([0.0, 1.0, 0.0]);
    tex.push([0.5, 0.0]);
    let south = 1u32;
    positions.push([0.0, -radius, 0.0]);
    normals.push([0.0, -1.0, 0.0]);
    tex.push([0.5, 1.0]);

    for ring in 1..rings {
        let theta = ring as f32 * PI / rings as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for segment in 0..=segments {
            let phi = segment as f32 * 2.0 * PI / segments as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let n = [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];
            positions.push([n[0] * radius, n[1] * radius, n[2] * radius]);
            normals.push(n);
            tex.push([segment as f32 / segments as f32, ring as f32 / rings as f32]);
        }
    }

    let row = |ring: u32, segment: u32| 2 + (ring - 1) * (segments + 1) + segment;
    let mut polygons = Vec::new();
    let mut uvs = UvLayer::new().with_name("UVMap");
    let mut emit = |vertices: Vec<u32>| {
        let corners: Vec<[f32; 2]> = vertices.iter().map(|&v| tex[v as usize]).collect();
        uvs.push_polygon(&corners);
        polygons.push(Polygon::new(vertices));
    };

    for segment in 0..segments {
        emit(vec![north, row(1, segment + 1), row(1, segment)]);
    }
    for ring in 1..rings - 1 {
        for segment in 0..segments {
            emit(vec![
                row(ring, segment),
                row(ring, segment + 1),
                row(ring + 1, segment + 1),
                row(ring + 1, segment),
            ]);
        }
    }
    for segment in 0..segments {
        emit(vec![south, row(rings - 1, segment), row(rings - 1, segment + 1)]);
    }

    PolyMesh::new()
        .with_vertices(positions, normals)
        .with_polygons(polygons)
        .with_uv_layer(uvs)
        .with_label("sphere")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_quad() {
        let mesh = generate_quad(0.5, 0.5);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.polygon_count(), 1);
        assert_eq!(mesh.polygons()[0].corner_count(), 4);
        assert_eq!(mesh.uv_layer().and_then(|l| l.uv(0, 2)), Some([1.0, 1.0]));
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_generate_cube() {
        let mesh = generate_cube(1.0);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.polygon_count(), 6);
        assert!(mesh.polygons().iter().all(|p| p.corner_count() == 4));
        assert!(mesh.validate().is_ok());
        for p in mesh.positions() {
            assert!(p.iter().all(|c| c.abs() == 1.0));
        }
    }

    #[test]
    fn test_cube_faces_wind_around_their_normal() {
        let mesh = generate_cube(1.0);
        for polygon in mesh.polygons() {
            let v = &polygon.vertices;
            let p = |i: usize| crate::math::Vec3::from(mesh.positions()[v[i] as usize]);
            let face = (p(1) - p(0)).cross(&(p(2) - p(0)));
            let n = crate::math::Vec3::from(mesh.normals()[v[0] as usize]);
            assert!(face.dot(&n) > 0.0);
        }
    }

    #[test]
    fn test_generate_uv_sphere() {
        let mesh = generate_uv_sphere(1.0, 8, 4);
        // 2 poles + (rings - 1) * (segments + 1) = 2 + 3 * 9
        assert_eq!(mesh.vertex_count(), 29);
        // 8 + 8 cap triangles, (rings - 2) * segments = 16 quads
        assert_eq!(mesh.polygon_count(), 32);
        let triangles = mesh
            .polygons()
            .iter()
            .filter(|p| p.corner_count() == 3)
            .count();
        assert_eq!(triangles, 16);
        assert!(mesh.validate().is_ok());
        assert_eq!(
            mesh.uv_layer().map(UvLayer::polygon_count),
            Some(mesh.polygon_count())
        );
    }

    #[test]
    fn test_sphere_clamps_resolution() {
        let mesh = generate_uv_sphere(2.0, 1, 1);
        // segments -> 3, rings -> 2: 2 poles + 1 * 4 ring vertices, 3 + 3 triangles
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.polygon_count(), 6);
        assert!(mesh.validate().is_ok());
    }
}
