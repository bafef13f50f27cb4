use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::shapes::{Aabb, Cube, Plane, Ray, Sphere};
use crate::collision::{contact::CollisionManifold, queries::RaycastHit};

/// Discriminant of a [`Collider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColliderKind {
    Sphere,
    Aabb,
    Cube,
    Plane,
    Custom,
}

/// User-defined collision geometry.
///
/// The engine hands every pair involving a custom shape to the shape itself;
/// the returned manifold must treat `self` as body A (normal pointing away
/// from `self`).
pub trait CustomShape: fmt::Debug + Send + Sync {
    fn center(&self) -> Vec3;

    fn set_center(&mut self, center: Vec3);

    fn find_collision_features(&self, other: &Collider) -> CollisionManifold;

    fn raycast(&self, _ray: &Ray) -> Option<RaycastHit> {
        None
    }

    fn clone_box(&self) -> Box<dyn CustomShape>;
}

impl Clone for Box<dyn CustomShape> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Collision geometry owned by a body. Exactly one shape is active.
#[derive(Debug, Clone)]
pub enum Collider {
    Sphere(Sphere),
    Aabb(Aabb),
    Cube(Cube),
    Plane(Plane),
    Custom(Box<dyn CustomShape>),
}

impl Collider {
    pub fn custom<S: CustomShape + 'static>(shape: S) -> Self {
        Collider::Custom(Box::new(shape))
    }

    pub fn kind(&self) -> ColliderKind {
        match self {
            Collider::Sphere(_) => ColliderKind::Sphere,
            Collider::Aabb(_) => ColliderKind::Aabb,
            Collider::Cube(_) => ColliderKind::Cube,
            Collider::Plane(_) => ColliderKind::Plane,
            Collider::Custom(_) => ColliderKind::Custom,
        }
    }

    pub fn center(&self) -> Vec3 {
        match self {
            Collider::Sphere(s) => s.center(),
            Collider::Aabb(b) => b.center(),
            Collider::Cube(c) => c.center(),
            Collider::Plane(p) => p.center(),
            Collider::Custom(c) => c.center(),
        }
    }

    pub fn set_center(&mut self, center: Vec3) {
        match self {
            Collider::Sphere(s) => s.set_center(center),
            Collider::Aabb(b) => b.set_center(center),
            Collider::Cube(c) => c.set_center(center),
            Collider::Plane(p) => p.set_center(center),
            Collider::Custom(c) => c.set_center(center),
        }
    }

    /// Fixed `(theta, phi)` orientation for shapes that carry one.
    pub fn orientation(&self) -> Option<(f32, f32)> {
        match self {
            Collider::Cube(c) => Some((c.theta(), c.phi())),
            Collider::Plane(p) => Some((p.theta(), p.phi())),
            _ => None,
        }
    }
}

impl From<Sphere> for Collider {
    fn from(shape: Sphere) -> Self {
        Collider::Sphere(shape)
    }
}

impl From<Aabb> for Collider {
    fn from(shape: Aabb) -> Self {
        Collider::Aabb(shape)
    }
}

impl From<Cube> for Collider {
    fn from(shape: Cube) -> Self {
        Collider::Cube(shape)
    }
}

impl From<Plane> for Collider {
    fn from(shape: Plane) -> Self {
        Collider::Plane(shape)
    }
}
