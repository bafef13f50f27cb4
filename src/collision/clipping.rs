//! Convex polygon clipping against half-spaces.

use glam::Vec3;

use crate::utils::math::GEOMETRY_EPSILON;

/// Half-space `dot(normal, p) <= offset` used as a clipping boundary.
#[derive(Debug, Clone, Copy)]
pub struct ClipPlane {
    normal: Vec3,
    offset: f32,
}

impl ClipPlane {
    pub fn new(normal: Vec3, offset: f32) -> Self {
        Self { normal, offset }
    }

    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        let n = normal.normalize_or_zero();
        Self {
            normal: n,
            offset: n.dot(point),
        }
    }

    /// Positive outside the kept half-space.
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) - self.offset
    }
}

/// Clips a convex polygon against a set of planes using the Sutherland-Hodgman algorithm.
pub fn clip_polygon(vertices: &[Vec3], planes: &[ClipPlane]) -> Vec<Vec3> {
    let mut output = vertices.to_vec();
    for plane in planes {
        output = clip_against_plane(&output, *plane);
        if output.is_empty() {
            break;
        }
    }
    output
}

fn clip_against_plane(vertices: &[Vec3], plane: ClipPlane) -> Vec<Vec3> {
    if vertices.is_empty() {
        return Vec::new();
    }

    let mut clipped = Vec::with_capacity(vertices.len() + 1);
    for i in 0..vertices.len() {
        let current = vertices[i];
        let next = vertices[(i + 1) % vertices.len()];

        let current_dist = plane.signed_distance(current);
        let next_dist = plane.signed_distance(next);

        let current_inside = current_dist <= GEOMETRY_EPSILON;
        let next_inside = next_dist <= GEOMETRY_EPSILON;

        match (current_inside, next_inside) {
            (true, true) => clipped.push(next),
            (true, false) => {
                if let Some(intersection) =
                    segment_plane_intersection(current, next, current_dist, next_dist)
                {
                    clipped.push(intersection);
                }
            }
            (false, true) => {
                if let Some(intersection) =
                    segment_plane_intersection(current, next, current_dist, next_dist)
                {
                    clipped.push(intersection);
                }
                clipped.push(next);
            }
            (false, false) => {}
        }
    }

    clipped
}

fn segment_plane_intersection(
    start: Vec3,
    end: Vec3,
    start_dist: f32,
    end_dist: f32,
) -> Option<Vec3> {
    let denom = start_dist - end_dist;
    if denom.abs() <= f32::EPSILON {
        return None;
    }
    let t = start_dist / denom;
    Some(start + (end - start) * t)
}

/// The four side planes bounding a rectangular face centered at `center`.
pub fn rectangle_planes(
    center: Vec3,
    tangent_u: Vec3,
    tangent_v: Vec3,
    half_u: f32,
    half_v: f32,
) -> [ClipPlane; 4] {
    [
        ClipPlane::from_point_normal(center + tangent_u * half_u, tangent_u),
        ClipPlane::from_point_normal(center - tangent_u * half_u, -tangent_u),
        ClipPlane::from_point_normal(center + tangent_v * half_v, tangent_v),
        ClipPlane::from_point_normal(center - tangent_v * half_v, -tangent_v),
    ]
}
