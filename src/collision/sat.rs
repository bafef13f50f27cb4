//! Box-box contact generation: separating-axis search over the six face axes,
//! then Sutherland-Hodgman clipping of the incident face against the
//! reference face.
//!
//! AABBs, cubes and planes all go through here; an AABB is a box with identity
//! rotation and a plane is a box with zero depth along its local Z.

use glam::{Mat3, Vec3};

use super::{
    clipping::{clip_polygon, rectangle_planes},
    contact::CollisionManifold,
};
use crate::{
    config::MAX_CONTACT_POINTS,
    core::shapes::{Aabb, Cube, Plane},
    utils::math::{abs_mat3, to_world, GEOMETRY_EPSILON},
};

/// A later candidate axis replaces the current one only if its separation
/// exceeds `RELATIVE_TOLERANCE * current + ABSOLUTE_TOLERANCE * half_extent`.
const RELATIVE_TOLERANCE: f32 = 0.95;
const ABSOLUTE_TOLERANCE: f32 = 0.01;

#[derive(Debug, Clone, Copy)]
pub struct OrientedBox {
    pub center: Vec3,
    pub half_size: Vec3,
    pub rotation: Mat3,
}

impl From<&Aabb> for OrientedBox {
    fn from(aabb: &Aabb) -> Self {
        Self {
            center: aabb.center,
            half_size: aabb.half_size,
            rotation: Mat3::IDENTITY,
        }
    }
}

impl From<&Cube> for OrientedBox {
    fn from(cube: &Cube) -> Self {
        Self {
            center: cube.center,
            half_size: cube.half_size,
            rotation: cube.rotation,
        }
    }
}

impl From<&Plane> for OrientedBox {
    fn from(plane: &Plane) -> Self {
        Self {
            center: plane.center,
            half_size: plane.half_size,
            rotation: plane.rotation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ReferenceAxis {
    FaceA(usize),
    FaceB(usize),
}

#[derive(Debug, Clone, Copy)]
struct ClippedPoint {
    position: Vec3,
    separation: f32,
}

fn sign(value: f32) -> f32 {
    if value >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Contact manifold between two boxes, normal pointing from `a` to `b`.
pub fn collide_boxes(a: &OrientedBox, b: &OrientedBox) -> CollisionManifold {
    let rot_a_t = a.rotation.transpose();
    let rot_b_t = b.rotation.transpose();

    let displacement = b.center - a.center;
    let d_a = rot_a_t * displacement;
    let d_b = rot_b_t * displacement;

    // c.col(j)[i] = A_i . B_j
    let c = rot_a_t * b.rotation;
    let abs_c = abs_mat3(&c);

    let face_a = d_a.abs() - a.half_size - abs_c * b.half_size;
    if face_a.cmpgt(Vec3::ZERO).any() {
        return CollisionManifold::none();
    }

    let face_b = d_b.abs() - b.half_size - abs_c.transpose() * a.half_size;
    if face_b.cmpgt(Vec3::ZERO).any() {
        return CollisionManifold::none();
    }

    let mut axis = ReferenceAxis::FaceA(0);
    let mut separation = face_a.x;
    for i in 1..3 {
        if face_a[i] > RELATIVE_TOLERANCE * separation + ABSOLUTE_TOLERANCE * a.half_size[i] {
            axis = ReferenceAxis::FaceA(i);
            separation = face_a[i];
        }
    }
    for j in 0..3 {
        if face_b[j] > RELATIVE_TOLERANCE * separation + ABSOLUTE_TOLERANCE * b.half_size[j] {
            axis = ReferenceAxis::FaceB(j);
            separation = face_b[j];
        }
    }

    let (normal, points) = match axis {
        ReferenceAxis::FaceA(i) => {
            let normal = a.rotation.col(i) * sign(d_a[i]);
            (normal, clip_incident_face(a, i, normal, b))
        }
        ReferenceAxis::FaceB(j) => {
            let normal = b.rotation.col(j) * sign(d_b[j]);
            (normal, clip_incident_face(b, j, -normal, a))
        }
    };

    if points.is_empty() {
        return CollisionManifold::none();
    }

    let depth = points
        .iter()
        .map(|p| -p.separation)
        .fold(0.0_f32, f32::max);
    let contacts = reduce_contacts(points, normal)
        .into_iter()
        .map(|p| p.position)
        .collect();

    CollisionManifold::hit(normal, depth, contacts)
}

/// Corners of the incident box face most opposed to `front_normal`, in winding order.
fn incident_face(incident: &OrientedBox, front_normal: Vec3) -> [Vec3; 4] {
    let n_local = incident.rotation.transpose() * front_normal;
    let abs_n = n_local.abs();
    let axis = if abs_n.x >= abs_n.y && abs_n.x >= abs_n.z {
        0
    } else if abs_n.y >= abs_n.z {
        1
    } else {
        2
    };
    let (u, v) = ((axis + 1) % 3, (axis + 2) % 3);
    let h = incident.half_size;

    // The face whose outward normal points back against the reference normal.
    let mut corner = Vec3::ZERO;
    corner[axis] = -sign(n_local[axis]) * h[axis];

    [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)].map(|(su, sv)| {
        let mut local = corner;
        local[u] = su * h[u];
        local[v] = sv * h[v];
        to_world(local, incident.center, &incident.rotation)
    })
}

/// Clips the incident face against the side planes of `reference`'s face on
/// `axis` (outward normal `front_normal`) and keeps points below that face,
/// projected onto it.
fn clip_incident_face(
    reference: &OrientedBox,
    axis: usize,
    front_normal: Vec3,
    incident: &OrientedBox,
) -> Vec<ClippedPoint> {
    let (u_axis, v_axis) = ((axis + 1) % 3, (axis + 2) % 3);
    let front = front_normal.dot(reference.center) + reference.half_size[axis];
    let face_center = reference.center + front_normal * reference.half_size[axis];

    let planes = rectangle_planes(
        face_center,
        reference.rotation.col(u_axis),
        reference.rotation.col(v_axis),
        reference.half_size[u_axis],
        reference.half_size[v_axis],
    );
    let clipped = clip_polygon(&incident_face(incident, front_normal), &planes);

    clipped
        .into_iter()
        .filter_map(|point| {
            let separation = front_normal.dot(point) - front;
            (separation <= GEOMETRY_EPSILON).then(|| ClippedPoint {
                position: point - front_normal * separation,
                separation,
            })
        })
        .collect()
}

/// Keeps at most four points: the deepest, the one farthest from it, and the
/// two spanning the largest triangles on either side of that pair.
fn reduce_contacts(points: Vec<ClippedPoint>, normal: Vec3) -> Vec<ClippedPoint> {
    if points.len() <= MAX_CONTACT_POINTS {
        return points;
    }

    let index_by = |score: &dyn Fn(&ClippedPoint) -> f32| {
        points
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| score(a).total_cmp(&score(b)))
            .map(|(index, _)| index)
            .unwrap_or(0)
    };

    let deepest = index_by(&|p| -p.separation);
    let origin = points[deepest].position;
    let farthest = index_by(&|p| p.position.distance_squared(origin));
    let edge = points[farthest].position - origin;
    let signed_area = |p: &ClippedPoint| edge.cross(p.position - origin).dot(normal);
    let left = index_by(&signed_area);
    let right = index_by(&|p| -signed_area(p));

    let mut chosen = vec![deepest];
    for index in [farthest, left, right] {
        if !chosen.contains(&index) {
            chosen.push(index);
        }
    }
    chosen.into_iter().map(|index| points[index]).collect()
}
