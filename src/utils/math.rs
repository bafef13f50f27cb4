//! Additional math helpers layered on top of `glam`.

use glam::{Mat3, Vec3};

/// Tolerance used by geometric comparisons across the engine.
pub const GEOMETRY_EPSILON: f32 = 1e-4;

/// Builds the orthonormal rotation used by oriented shapes.
///
/// `phi` rotates about X first, then `theta` rotates about Y.
pub fn rotation_from_angles(theta: f32, phi: f32) -> Mat3 {
    Mat3::from_rotation_y(theta) * Mat3::from_rotation_x(phi)
}

/// Normalizes `v`, returning `fallback` when its length is (close to) zero.
pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    let length_sq = v.length_squared();
    if length_sq <= f32::EPSILON * f32::EPSILON {
        fallback
    } else {
        v / length_sq.sqrt()
    }
}

/// Moves a world-space point into a frame centered at `center` with orientation `rotation`.
///
/// Rotations are orthonormal, so the transpose stands in for the inverse.
pub fn to_local(point: Vec3, center: Vec3, rotation: &Mat3) -> Vec3 {
    rotation.transpose() * (point - center)
}

/// Inverse of [`to_local`].
pub fn to_world(local: Vec3, center: Vec3, rotation: &Mat3) -> Vec3 {
    center + *rotation * local
}

/// Component-wise absolute value of a matrix.
pub fn abs_mat3(m: &Mat3) -> Mat3 {
    Mat3::from_cols(m.x_axis.abs(), m.y_axis.abs(), m.z_axis.abs())
}
