//! Geometric primitives used as collider payloads and query inputs.
//!
//! Every shape caches its half-size and (for oriented shapes) its rotation at
//! construction; queries never recompute or mutate them.

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

use crate::{
    error::{PhysicsError, PhysicsResult},
    utils::math::{normalize_or, rotation_from_angles, to_world},
};

fn check_finite(v: Vec3, what: &'static str) -> PhysicsResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(PhysicsError::InvalidShape(what))
    }
}

fn check_half_size(half_size: Vec3) -> PhysicsResult<()> {
    check_finite(half_size, "half-size must be finite")?;
    if half_size.cmplt(Vec3::ZERO).any() {
        return Err(PhysicsError::InvalidShape("half-size must be non-negative"));
    }
    Ok(())
}

fn check_angles(theta: f32, phi: f32) -> PhysicsResult<()> {
    if theta.is_finite() && phi.is_finite() {
        Ok(())
    } else {
        Err(PhysicsError::InvalidShape("rotation angles must be finite"))
    }
}

/// The 8 corners of a box in its local frame; bit 0 picks +x, bit 1 +y, bit 2 +z.
fn box_corners(half_size: Vec3) -> [Vec3; 8] {
    std::array::from_fn(|i| {
        Vec3::new(
            if i & 1 != 0 { half_size.x } else { -half_size.x },
            if i & 2 != 0 { half_size.y } else { -half_size.y },
            if i & 4 != 0 { half_size.z } else { -half_size.z },
        )
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SphereDef", into = "SphereDef")]
pub struct Sphere {
    pub(crate) center: Vec3,
    pub(crate) radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> PhysicsResult<Self> {
        check_finite(center, "sphere center must be finite")?;
        if !radius.is_finite() || radius < 0.0 {
            return Err(PhysicsError::InvalidShape("sphere radius must be non-negative"));
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn half_size(&self) -> Vec3 {
        Vec3::splat(self.radius)
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.half_size()
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_size()
    }

    pub fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }
}

/// Axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoxDef", into = "BoxDef")]
pub struct Aabb {
    pub(crate) center: Vec3,
    pub(crate) half_size: Vec3,
}

impl Aabb {
    pub fn new(center: Vec3, half_size: Vec3) -> PhysicsResult<Self> {
        check_finite(center, "box center must be finite")?;
        check_half_size(half_size)?;
        Ok(Self { center, half_size })
    }

    /// Builds the box spanned by two opposite corners, in any order.
    pub fn from_corners(a: Vec3, b: Vec3) -> PhysicsResult<Self> {
        Self::new((a + b) * 0.5, (b - a).abs() * 0.5)
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn half_size(&self) -> Vec3 {
        self.half_size
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.half_size
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_size
    }

    pub fn rotation(&self) -> Mat3 {
        Mat3::IDENTITY
    }

    pub fn vertices(&self) -> [Vec3; 8] {
        box_corners(self.half_size).map(|corner| self.center + corner)
    }

    pub fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }
}

/// Oriented box with a rotation fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OrientedDef", into = "OrientedDef")]
pub struct Cube {
    pub(crate) center: Vec3,
    pub(crate) half_size: Vec3,
    theta: f32,
    phi: f32,
    pub(crate) rotation: Mat3,
}

impl Cube {
    pub fn new(center: Vec3, half_size: Vec3, theta: f32, phi: f32) -> PhysicsResult<Self> {
        check_finite(center, "box center must be finite")?;
        check_half_size(half_size)?;
        check_angles(theta, phi)?;
        Ok(Self {
            center,
            half_size,
            theta,
            phi,
            rotation: rotation_from_angles(theta, phi),
        })
    }

    /// Builds a box from two opposite corners of its unrotated extent, then
    /// rotates it about its center.
    pub fn from_corners(a: Vec3, b: Vec3, theta: f32, phi: f32) -> PhysicsResult<Self> {
        Self::new((a + b) * 0.5, (b - a).abs() * 0.5, theta, phi)
    }

    pub fn axis_aligned(center: Vec3, half_size: Vec3) -> PhysicsResult<Self> {
        Self::new(center, half_size, 0.0, 0.0)
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn half_size(&self) -> Vec3 {
        self.half_size
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn phi(&self) -> f32 {
        self.phi
    }

    pub fn rotation(&self) -> Mat3 {
        self.rotation
    }

    /// Minimum corner in the box's local (unrotated) frame, offset by the center.
    pub fn min(&self) -> Vec3 {
        self.center - self.half_size
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_size
    }

    pub fn vertices(&self) -> [Vec3; 8] {
        box_corners(self.half_size).map(|corner| to_world(corner, self.center, &self.rotation))
    }

    pub fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }
}

/// Finite rectangle lying in its local XY plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OrientedDef", into = "OrientedDef")]
pub struct Plane {
    pub(crate) center: Vec3,
    pub(crate) half_size: Vec3,
    theta: f32,
    phi: f32,
    pub(crate) rotation: Mat3,
    pub(crate) normal: Vec3,
}

impl Plane {
    pub fn new(
        center: Vec3,
        half_width: f32,
        half_height: f32,
        theta: f32,
        phi: f32,
    ) -> PhysicsResult<Self> {
        check_finite(center, "plane center must be finite")?;
        let half_size = Vec3::new(half_width, half_height, 0.0);
        check_half_size(half_size)?;
        check_angles(theta, phi)?;

        let rotation = rotation_from_angles(theta, phi);
        let right = rotation * Vec3::new(half_size.x, -half_size.y, 0.0)
            - rotation * Vec3::new(-half_size.x, -half_size.y, 0.0);
        let up = rotation * Vec3::new(-half_size.x, half_size.y, 0.0)
            - rotation * Vec3::new(-half_size.x, -half_size.y, 0.0);
        let normal = normalize_or(right.cross(up), rotation.z_axis);

        Ok(Self {
            center,
            half_size,
            theta,
            phi,
            rotation,
            normal,
        })
    }

    /// Builds a plane from two opposite corners of its unrotated extent; the
    /// z components only contribute to the center.
    pub fn from_corners(a: Vec3, b: Vec3, theta: f32, phi: f32) -> PhysicsResult<Self> {
        let half = (b - a).abs() * 0.5;
        Self::new((a + b) * 0.5, half.x, half.y, theta, phi)
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn half_size(&self) -> Vec3 {
        self.half_size
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn phi(&self) -> f32 {
        self.phi
    }

    pub fn rotation(&self) -> Mat3 {
        self.rotation
    }

    /// Unit normal of the rectangle (local +Z rotated into world space).
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.half_size
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_size
    }

    /// World-space corners in winding order.
    pub fn vertices(&self) -> [Vec3; 4] {
        let h = self.half_size;
        [
            Vec3::new(-h.x, -h.y, 0.0),
            Vec3::new(h.x, -h.y, 0.0),
            Vec3::new(h.x, h.y, 0.0),
            Vec3::new(-h.x, h.y, 0.0),
        ]
        .map(|corner| to_world(corner, self.center, &self.rotation))
    }

    pub fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }
}

/// Half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RayDef", into = "RayDef")]
pub struct Ray {
    pub(crate) origin: Vec3,
    pub(crate) direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> PhysicsResult<Self> {
        check_finite(origin, "ray origin must be finite")?;
        check_finite(direction, "ray direction must be finite")?;
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return Err(PhysicsError::InvalidShape("ray direction must be non-zero"));
        }
        Ok(Self { origin, direction })
    }

    pub fn from_points(from: Vec3, to: Vec3) -> PhysicsResult<Self> {
        Self::new(from, to - from)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Vec3,
    pub end: Vec3,
}

impl Line {
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    pub fn length_squared(&self) -> f32 {
        self.start.distance_squared(self.end)
    }

    /// Ray starting at `start` pointing toward `end`; `None` for a zero-length segment.
    pub fn to_ray(&self) -> Option<Ray> {
        Ray::from_points(self.start, self.end).ok()
    }
}

// Serialized forms carry only the construction inputs; deserializing goes
// back through the validating constructors and recomputes cached data.

#[derive(Serialize, Deserialize)]
struct SphereDef {
    center: Vec3,
    radius: f32,
}

impl TryFrom<SphereDef> for Sphere {
    type Error = PhysicsError;

    fn try_from(def: SphereDef) -> PhysicsResult<Self> {
        Sphere::new(def.center, def.radius)
    }
}

impl From<Sphere> for SphereDef {
    fn from(sphere: Sphere) -> Self {
        Self {
            center: sphere.center,
            radius: sphere.radius,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct BoxDef {
    center: Vec3,
    half_size: Vec3,
}

impl TryFrom<BoxDef> for Aabb {
    type Error = PhysicsError;

    fn try_from(def: BoxDef) -> PhysicsResult<Self> {
        Aabb::new(def.center, def.half_size)
    }
}

impl From<Aabb> for BoxDef {
    fn from(aabb: Aabb) -> Self {
        Self {
            center: aabb.center,
            half_size: aabb.half_size,
        }
    }
}

/// Planes store a zero z half-size; it is ignored when rebuilding one.
#[derive(Serialize, Deserialize)]
struct OrientedDef {
    center: Vec3,
    half_size: Vec3,
    theta: f32,
    phi: f32,
}

impl TryFrom<OrientedDef> for Cube {
    type Error = PhysicsError;

    fn try_from(def: OrientedDef) -> PhysicsResult<Self> {
        Cube::new(def.center, def.half_size, def.theta, def.phi)
    }
}

impl From<Cube> for OrientedDef {
    fn from(cube: Cube) -> Self {
        Self {
            center: cube.center,
            half_size: cube.half_size,
            theta: cube.theta,
            phi: cube.phi,
        }
    }
}

impl TryFrom<OrientedDef> for Plane {
    type Error = PhysicsError;

    fn try_from(def: OrientedDef) -> PhysicsResult<Self> {
        Plane::new(def.center, def.half_size.x, def.half_size.y, def.theta, def.phi)
    }
}

impl From<Plane> for OrientedDef {
    fn from(plane: Plane) -> Self {
        Self {
            center: plane.center,
            half_size: plane.half_size,
            theta: plane.theta,
            phi: plane.phi,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RayDef {
    origin: Vec3,
    direction: Vec3,
}

impl TryFrom<RayDef> for Ray {
    type Error = PhysicsError;

    fn try_from(def: RayDef) -> PhysicsResult<Self> {
        Ray::new(def.origin, def.direction)
    }
}

impl From<Ray> for RayDef {
    fn from(ray: Ray) -> Self {
        Self {
            origin: ray.origin,
            direction: ray.direction,
        }
    }
}
