//! Manifold generation for every pair of collider types, plus the dispatcher.
//!
//! Pairs involving a sphere produce a single contact at the closest point of
//! the other shape; box-like pairs go through [`sat::collide_boxes`]. Each
//! unordered pair has one canonical function and the reversed order flips
//! its normal, so the normal always points from the first argument to the
//! second.

use glam::{Mat3, Vec3};

use super::{
    contact::CollisionManifold,
    sat::{self, OrientedBox},
};
use crate::{
    core::{
        collider::Collider,
        shapes::{Aabb, Cube, Plane, Sphere},
    },
    utils::math::{normalize_or, to_local, to_world},
};

pub fn sphere_sphere(a: &Sphere, b: &Sphere) -> CollisionManifold {
    let offset = b.center - a.center;
    let radii = a.radius + b.radius;
    let distance_sq = offset.length_squared();
    if distance_sq > radii * radii {
        return CollisionManifold::none();
    }

    let distance = distance_sq.sqrt();
    // Concentric spheres have no preferred direction; push along +Y.
    let normal = normalize_or(offset, Vec3::Y);
    let depth = radii - distance;
    let contact = a.center + normal * (a.radius - depth * 0.5);
    CollisionManifold::hit(normal, depth, vec![contact])
}

/// Box-like shape as A, sphere as B: the normal runs from the box surface
/// toward the sphere center.
fn box_sphere(center: Vec3, half_size: Vec3, rotation: &Mat3, sphere: &Sphere) -> CollisionManifold {
    let local = to_local(sphere.center, center, rotation);
    let clamped = local.clamp(-half_size, half_size);
    let closest = to_world(clamped, center, rotation);
    let offset = sphere.center - closest;
    let distance_sq = offset.length_squared();
    let radius_sq = sphere.radius * sphere.radius;

    if distance_sq > radius_sq {
        return CollisionManifold::none();
    }

    if distance_sq > f32::EPSILON {
        let distance = distance_sq.sqrt();
        return CollisionManifold::hit(
            offset / distance,
            sphere.radius - distance,
            vec![closest],
        );
    }

    // The center sits inside (or on) the box: leave through the nearest face.
    let gap = half_size - local.abs();
    let axis = if gap.x <= gap.y && gap.x <= gap.z {
        0
    } else if gap.y <= gap.z {
        1
    } else {
        2
    };
    let side = if local[axis] >= 0.0 { 1.0 } else { -1.0 };
    let mut on_face = local;
    on_face[axis] = side * half_size[axis];

    CollisionManifold::hit(
        rotation.col(axis) * side,
        sphere.radius + gap[axis],
        vec![to_world(on_face, center, rotation)],
    )
}

pub fn aabb_sphere(aabb: &Aabb, sphere: &Sphere) -> CollisionManifold {
    box_sphere(aabb.center, aabb.half_size, &Mat3::IDENTITY, sphere)
}

pub fn cube_sphere(cube: &Cube, sphere: &Sphere) -> CollisionManifold {
    box_sphere(cube.center, cube.half_size, &cube.rotation, sphere)
}

pub fn plane_sphere(plane: &Plane, sphere: &Sphere) -> CollisionManifold {
    box_sphere(plane.center, plane.half_size, &plane.rotation, sphere)
}

pub fn sphere_aabb(sphere: &Sphere, aabb: &Aabb) -> CollisionManifold {
    aabb_sphere(aabb, sphere).flipped()
}

pub fn sphere_cube(sphere: &Sphere, cube: &Cube) -> CollisionManifold {
    cube_sphere(cube, sphere).flipped()
}

pub fn sphere_plane(sphere: &Sphere, plane: &Plane) -> CollisionManifold {
    plane_sphere(plane, sphere).flipped()
}

pub fn aabb_aabb(a: &Aabb, b: &Aabb) -> CollisionManifold {
    sat::collide_boxes(&OrientedBox::from(a), &OrientedBox::from(b))
}

pub fn aabb_cube(aabb: &Aabb, cube: &Cube) -> CollisionManifold {
    sat::collide_boxes(&OrientedBox::from(aabb), &OrientedBox::from(cube))
}

pub fn aabb_plane(aabb: &Aabb, plane: &Plane) -> CollisionManifold {
    sat::collide_boxes(&OrientedBox::from(aabb), &OrientedBox::from(plane))
}

pub fn cube_cube(a: &Cube, b: &Cube) -> CollisionManifold {
    sat::collide_boxes(&OrientedBox::from(a), &OrientedBox::from(b))
}

pub fn cube_plane(cube: &Cube, plane: &Plane) -> CollisionManifold {
    sat::collide_boxes(&OrientedBox::from(cube), &OrientedBox::from(plane))
}

pub fn plane_plane(a: &Plane, b: &Plane) -> CollisionManifold {
    sat::collide_boxes(&OrientedBox::from(a), &OrientedBox::from(b))
}

pub fn cube_aabb(cube: &Cube, aabb: &Aabb) -> CollisionManifold {
    aabb_cube(aabb, cube).flipped()
}

pub fn plane_aabb(plane: &Plane, aabb: &Aabb) -> CollisionManifold {
    aabb_plane(aabb, plane).flipped()
}

pub fn plane_cube(plane: &Plane, cube: &Cube) -> CollisionManifold {
    cube_plane(cube, plane).flipped()
}

/// Generates the manifold between two colliders with the normal pointing from `a` to `b`.
pub fn find_collision_features(a: &Collider, b: &Collider) -> CollisionManifold {
    use Collider::*;
    match (a, b) {
        (Sphere(a), Sphere(b)) => sphere_sphere(a, b),
        (Sphere(s), Aabb(x)) => sphere_aabb(s, x),
        (Sphere(s), Cube(c)) => sphere_cube(s, c),
        (Sphere(s), Plane(p)) => sphere_plane(s, p),

        (Aabb(x), Sphere(s)) => aabb_sphere(x, s),
        (Aabb(a), Aabb(b)) => aabb_aabb(a, b),
        (Aabb(x), Cube(c)) => aabb_cube(x, c),
        (Aabb(x), Plane(p)) => aabb_plane(x, p),

        (Cube(c), Sphere(s)) => cube_sphere(c, s),
        (Cube(c), Aabb(x)) => cube_aabb(c, x),
        (Cube(a), Cube(b)) => cube_cube(a, b),
        (Cube(c), Plane(p)) => cube_plane(c, p),

        (Plane(p), Sphere(s)) => plane_sphere(p, s),
        (Plane(p), Aabb(x)) => plane_aabb(p, x),
        (Plane(p), Cube(c)) => plane_cube(p, c),
        (Plane(a), Plane(b)) => plane_plane(a, b),

        (Custom(shape), other) => shape.find_collision_features(other),
        (other, Custom(shape)) => shape.find_collision_features(other).flipped(),
    }
}
