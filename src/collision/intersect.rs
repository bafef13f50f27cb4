//! Boolean intersection tests and closest-point helpers between primitives.
//!
//! Points are moved into a shape's local frame with the transpose of its
//! cached rotation before any bounds check.

use glam::{Mat3, Vec3};

use crate::{
    core::{
        collider::Collider,
        shapes::{Aabb, Cube, Plane, Sphere},
    },
    utils::math::{abs_mat3, to_local, to_world, GEOMETRY_EPSILON},
};

fn within_half_size(local: Vec3, half_size: Vec3) -> bool {
    local.abs().cmple(half_size + Vec3::splat(GEOMETRY_EPSILON)).all()
}

pub fn point_in_sphere(point: Vec3, sphere: &Sphere) -> bool {
    point.distance_squared(sphere.center) <= sphere.radius * sphere.radius
}

pub fn point_in_aabb(point: Vec3, aabb: &Aabb) -> bool {
    within_half_size(point - aabb.center, aabb.half_size)
}

pub fn point_in_cube(point: Vec3, cube: &Cube) -> bool {
    within_half_size(to_local(point, cube.center, &cube.rotation), cube.half_size)
}

/// True when `point` lies on the finite rectangle (within a small tolerance along the normal).
pub fn point_on_plane(point: Vec3, plane: &Plane) -> bool {
    within_half_size(to_local(point, plane.center, &plane.rotation), plane.half_size)
}

pub fn closest_point_sphere(point: Vec3, sphere: &Sphere) -> Vec3 {
    let offset = point - sphere.center;
    if offset.length_squared() <= sphere.radius * sphere.radius {
        return point;
    }
    sphere.center + offset.normalize_or_zero() * sphere.radius
}

pub fn closest_point_aabb(point: Vec3, aabb: &Aabb) -> Vec3 {
    point.clamp(aabb.min(), aabb.max())
}

pub fn closest_point_cube(point: Vec3, cube: &Cube) -> Vec3 {
    let local = to_local(point, cube.center, &cube.rotation);
    to_world(
        local.clamp(-cube.half_size, cube.half_size),
        cube.center,
        &cube.rotation,
    )
}

pub fn closest_point_plane(point: Vec3, plane: &Plane) -> Vec3 {
    let local = to_local(point, plane.center, &plane.rotation);
    to_world(
        local.clamp(-plane.half_size, plane.half_size),
        plane.center,
        &plane.rotation,
    )
}

pub fn sphere_sphere(a: &Sphere, b: &Sphere) -> bool {
    let radii = a.radius + b.radius;
    a.center.distance_squared(b.center) <= radii * radii
}

pub fn sphere_aabb(sphere: &Sphere, aabb: &Aabb) -> bool {
    point_in_sphere(closest_point_aabb(sphere.center, aabb), sphere)
}

pub fn sphere_cube(sphere: &Sphere, cube: &Cube) -> bool {
    point_in_sphere(closest_point_cube(sphere.center, cube), sphere)
}

pub fn sphere_plane(sphere: &Sphere, plane: &Plane) -> bool {
    point_in_sphere(closest_point_plane(sphere.center, plane), sphere)
}

pub fn aabb_sphere(aabb: &Aabb, sphere: &Sphere) -> bool {
    sphere_aabb(sphere, aabb)
}

pub fn cube_sphere(cube: &Cube, sphere: &Sphere) -> bool {
    sphere_cube(sphere, cube)
}

pub fn plane_sphere(plane: &Plane, sphere: &Sphere) -> bool {
    sphere_plane(sphere, plane)
}

pub fn aabb_aabb(a: &Aabb, b: &Aabb) -> bool {
    let (a_min, a_max, b_min, b_max) = (a.min(), a.max(), b.min(), b.max());
    a_min.cmple(b_max).all() && b_min.cmple(a_max).all()
}

pub fn aabb_cube(aabb: &Aabb, cube: &Cube) -> bool {
    boxes_overlap(
        aabb.center,
        aabb.half_size,
        &Mat3::IDENTITY,
        cube.center,
        cube.half_size,
        &cube.rotation,
    )
}

pub fn cube_aabb(cube: &Cube, aabb: &Aabb) -> bool {
    aabb_cube(aabb, cube)
}

pub fn aabb_plane(aabb: &Aabb, plane: &Plane) -> bool {
    boxes_overlap(
        aabb.center,
        aabb.half_size,
        &Mat3::IDENTITY,
        plane.center,
        plane.half_size,
        &plane.rotation,
    )
}

pub fn plane_aabb(plane: &Plane, aabb: &Aabb) -> bool {
    aabb_plane(aabb, plane)
}

pub fn cube_cube(a: &Cube, b: &Cube) -> bool {
    boxes_overlap(
        a.center,
        a.half_size,
        &a.rotation,
        b.center,
        b.half_size,
        &b.rotation,
    )
}

pub fn cube_plane(cube: &Cube, plane: &Plane) -> bool {
    boxes_overlap(
        cube.center,
        cube.half_size,
        &cube.rotation,
        plane.center,
        plane.half_size,
        &plane.rotation,
    )
}

pub fn plane_cube(plane: &Plane, cube: &Cube) -> bool {
    cube_plane(cube, plane)
}

pub fn plane_plane(a: &Plane, b: &Plane) -> bool {
    boxes_overlap(
        a.center,
        a.half_size,
        &a.rotation,
        b.center,
        b.half_size,
        &b.rotation,
    )
}

/// Full 15-axis separating-axis overlap test between two oriented boxes.
fn boxes_overlap(
    center_a: Vec3,
    half_a: Vec3,
    rot_a: &Mat3,
    center_b: Vec3,
    half_b: Vec3,
    rot_b: &Mat3,
) -> bool {
    // B's axes expressed in A's frame, plus an epsilon against near-parallel edge axes.
    let c = rot_a.transpose() * *rot_b;
    let abs_c = abs_mat3(&c);
    let abs_c = Mat3::from_cols(
        abs_c.x_axis + Vec3::splat(GEOMETRY_EPSILON),
        abs_c.y_axis + Vec3::splat(GEOMETRY_EPSILON),
        abs_c.z_axis + Vec3::splat(GEOMETRY_EPSILON),
    );
    let t = rot_a.transpose() * (center_b - center_a);

    // A's face axes.
    let projected_b = abs_c * half_b;
    if t.abs().cmpgt(half_a + projected_b).any() {
        return false;
    }

    // B's face axes.
    let t_b = c.transpose() * t;
    let projected_a = abs_c.transpose() * half_a;
    if t_b.abs().cmpgt(half_b + projected_a).any() {
        return false;
    }

    // Edge-edge axes A_i x B_j.
    let (a, b) = (half_a.to_array(), half_b.to_array());
    let cm = |i: usize, j: usize| c.col(j)[i];
    let acm = |i: usize, j: usize| abs_c.col(j)[i];
    let tv = t.to_array();
    for i in 0..3 {
        let (i1, i2) = ((i + 1) % 3, (i + 2) % 3);
        for j in 0..3 {
            let (j1, j2) = ((j + 1) % 3, (j + 2) % 3);
            let ra = a[i1] * acm(i2, j) + a[i2] * acm(i1, j);
            let rb = b[j1] * acm(i, j2) + b[j2] * acm(i, j1);
            let dist = (tv[i2] * cm(i1, j) - tv[i1] * cm(i2, j)).abs();
            if dist > ra + rb {
                return false;
            }
        }
    }

    true
}

impl Collider {
    /// Boolean overlap test between two colliders.
    ///
    /// Custom shapes answer through their own manifold generation.
    pub fn intersects(&self, other: &Collider) -> bool {
        use Collider::*;
        match (self, other) {
            (Sphere(a), Sphere(b)) => sphere_sphere(a, b),
            (Sphere(s), Aabb(b)) => sphere_aabb(s, b),
            (Sphere(s), Cube(c)) => sphere_cube(s, c),
            (Sphere(s), Plane(p)) => sphere_plane(s, p),
            (Aabb(b), Sphere(s)) => aabb_sphere(b, s),
            (Aabb(a), Aabb(b)) => aabb_aabb(a, b),
            (Aabb(b), Cube(c)) => aabb_cube(b, c),
            (Aabb(b), Plane(p)) => aabb_plane(b, p),
            (Cube(c), Sphere(s)) => cube_sphere(c, s),
            (Cube(c), Aabb(b)) => cube_aabb(c, b),
            (Cube(a), Cube(b)) => cube_cube(a, b),
            (Cube(c), Plane(p)) => cube_plane(c, p),
            (Plane(p), Sphere(s)) => plane_sphere(p, s),
            (Plane(p), Aabb(b)) => plane_aabb(p, b),
            (Plane(p), Cube(c)) => plane_cube(p, c),
            (Plane(a), Plane(b)) => plane_plane(a, b),
            (Custom(shape), other) => shape.find_collision_features(other).colliding,
            (other, Custom(shape)) => shape.find_collision_features(other).colliding,
        }
    }
}
