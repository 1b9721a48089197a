//! Math type aliases, TRS helpers and the world transform used by the exporter.
//!
//! Storage types elsewhere in the crate use plain arrays; these nalgebra
//! aliases are only used where arithmetic happens.

pub use nalgebra;

/// 2D vector (f32).
pub type Vec2 = nalgebra::Vector2<f32>;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4x4 matrix (f32).
pub type Mat4 = nalgebra::Matrix4<f32>;

/// Quaternion (f32). Stored as `[x, y, z, w]` in memory.
/// Use [`quat_from_xyzw`] or `Quaternion::new(w, x, y, z)` to construct.
pub type Quat = nalgebra::Quaternion<f32>;

// ===== Helper functions =====

/// Build a 4x4 TRS matrix from scale, rotation (quaternion), and translation.
pub fn mat4_from_scale_rotation_translation(
    scale: Vec3,
    rotation: Quat,
    translation: Vec3,
) -> Mat4 {
    let r = nalgebra::UnitQuaternion::new_unchecked(rotation);
    let m = r.to_rotation_matrix();
    let rm = m.matrix();
    #[rustfmt::skip]
    let result = Mat4::new(
        rm[(0, 0)] * scale.x, rm[(0, 1)] * scale.y, rm[(0, 2)] * scale.z, translation.x,
        rm[(1, 0)] * scale.x, rm[(1, 1)] * scale.y, rm[(1, 2)] * scale.z, translation.y,
        rm[(2, 0)] * scale.x, rm[(2, 1)] * scale.y, rm[(2, 2)] * scale.z, translation.z,
        0.0,                  0.0,                  0.0,                  1.0,
    );
    result
}

/// Build a translation-only 4x4 matrix.
pub fn mat4_from_translation(t: Vec3) -> Mat4 {
    Mat4::new_translation(&t)
}

/// Create a quaternion from x, y, z, w components.
pub fn quat_from_xyzw(x: f32, y: f32, z: f32, w: f32) -> Quat {
    nalgebra::Quaternion::new(w, x, y, z)
}

/// Create a quaternion from a `[x, y, z, w]` array.
pub fn quat_from_array(a: [f32; 4]) -> Quat {
    nalgebra::Quaternion::new(a[3], a[0], a[1], a[2])
}

/// Convert a quaternion to a `[x, y, z, w]` array.
pub fn quat_to_array(q: Quat) -> [f32; 4] {
    [q.coords.x, q.coords.y, q.coords.z, q.coords.w]
}

/// Create a quaternion from rotation around the X axis.
pub fn quat_from_rotation_x(angle: f32) -> Quat {
    nalgebra::UnitQuaternion::from_axis_angle(&nalgebra::Vector3::x_axis(), angle).into_inner()
}

/// Create a quaternion from rotation around the Y axis.
pub fn quat_from_rotation_y(angle: f32) -> Quat {
    nalgebra::UnitQuaternion::from_axis_angle(&nalgebra::Vector3::y_axis(), angle).into_inner()
}

/// Create a quaternion from rotation around the Z axis.
pub fn quat_from_rotation_z(angle: f32) -> Quat {
    nalgebra::UnitQuaternion::from_axis_angle(&nalgebra::Vector3::z_axis(), angle).into_inner()
}

/// Rotate a vector by a quaternion.
///
/// The quaternion is used as-is; the result keeps whatever length the
/// input vector had.
pub fn quat_rotate_vec3(q: Quat, v: Vec3) -> Vec3 {
    nalgebra::UnitQuaternion::new_unchecked(q) * v
}

/// Decompose a 4x4 matrix into (scale, rotation, translation).
///
/// An axis with zero scale carries no orientation information; in that
/// case the identity rotation is returned.
pub fn to_scale_rotation_translation(m: &Mat4) -> (Vec3, Quat, Vec3) {
    let translation = Vec3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)]);
    let col0 = Vec3::new(m[(0, 0)], m[(1, 0)], m[(2, 0)]);
    let col1 = Vec3::new(m[(0, 1)], m[(1, 1)], m[(2, 1)]);
    let col2 = Vec3::new(m[(0, 2)], m[(1, 2)], m[(2, 2)]);
    let sx = col0.norm();
    let sy = col1.norm();
    let sz = col2.norm();
    let scale = Vec3::new(sx, sy, sz);
    if sx == 0.0 || sy == 0.0 || sz == 0.0 {
        return (scale, Quat::identity(), translation);
    }
    let rot_mat = nalgebra::Matrix3::from_columns(&[col0 / sx, col1 / sy, col2 / sz]);
    let rotation = nalgebra::UnitQuaternion::from_rotation_matrix(
        &nalgebra::Rotation3::from_matrix_unchecked(rot_mat),
    )
    .into_inner();
    (scale, rotation, translation)
}

/// Apply an affine matrix to a point (translation included).
pub fn transform_point(m: &Mat4, p: Vec3) -> Vec3 {
    m.transform_point(&nalgebra::Point3::from(p)).coords
}

/// An object's placement in world space.
///
/// `matrix` maps local positions to world positions. `orientation` is the
/// rotation-only part of that matrix and is what normals are rotated by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldTransform {
    /// Full affine local-to-world matrix.
    pub matrix: Mat4,
    /// Rotation extracted from `matrix` with scale divided out.
    pub orientation: Quat,
}

impl WorldTransform {
    /// Identity placement.
    pub fn identity() -> Self {
        Self {
            matrix: Mat4::identity(),
            orientation: Quat::identity(),
        }
    }

    /// Build from a world matrix, extracting its orientation.
    pub fn from_matrix(matrix: Mat4) -> Self {
        let (_, orientation, _) = to_scale_rotation_translation(&matrix);
        Self {
            matrix,
            orientation,
        }
    }

    /// Map a local-space position into world space.
    pub fn apply_to_point(&self, p: [f32; 3]) -> [f32; 3] {
        transform_point(&self.matrix, Vec3::from(p)).into()
    }

    /// Rotate a local-space normal into world space. No renormalisation.
    pub fn apply_to_normal(&self, n: [f32; 3]) -> [f32; 3] {
        quat_rotate_vec3(self.orientation, Vec3::from(n)).into()
    }
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self::identity()
    }
}
