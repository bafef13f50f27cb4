use glam::Vec3;

use crate::{
    collision::intersect::{point_in_aabb, point_in_cube, point_in_sphere, point_on_plane},
    core::{
        collider::Collider,
        shapes::{Aabb, Cube, Line, Plane, Ray, Sphere},
    },
    utils::math::{normalize_or, to_local, GEOMETRY_EPSILON},
};

/// Distance reported by [`Raycast::ray_distance`] when nothing is hit.
pub const NO_HIT: f32 = -1.0;

/// Result of a ray cast against a single shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// Distance along the (unit) ray direction.
    pub distance: f32,
    pub point: Vec3,
    /// Outward surface normal at `point`.
    pub normal: Vec3,
}

/// Ray and segment queries shared by every shape.
pub trait Raycast {
    /// Nearest non-negative hit along the ray. A ray starting inside a solid
    /// shape reports where it exits.
    fn raycast(&self, ray: &Ray) -> Option<RaycastHit>;

    fn contains(&self, point: Vec3) -> bool;

    /// Hit distance, or [`NO_HIT`] on a miss.
    fn ray_distance(&self, ray: &Ray) -> f32 {
        self.raycast(ray).map_or(NO_HIT, |hit| hit.distance)
    }

    /// True when the segment starts inside the shape or crosses its surface.
    fn linetest(&self, line: &Line) -> bool {
        if self.contains(line.start) {
            return true;
        }
        let Some(ray) = line.to_ray() else {
            return false;
        };
        self.raycast(&ray)
            .is_some_and(|hit| hit.distance * hit.distance <= line.length_squared())
    }
}

/// Slab test against the box `[min, max]`, returning the hit time and face normal.
fn slab_raycast(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<(f32, Vec3)> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut enter_normal = Vec3::ZERO;
    let mut exit_normal = Vec3::ZERO;

    for axis in 0..3 {
        let (o, d) = (origin[axis], direction[axis]);
        if d.abs() < f32::EPSILON {
            // Parallel to this slab: either always inside it or never.
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t_near = (min[axis] - o) * inv;
        let mut t_far = (max[axis] - o) * inv;
        let mut near_normal = Vec3::ZERO;
        near_normal[axis] = -1.0;
        let mut far_normal = -near_normal;
        if t_near > t_far {
            std::mem::swap(&mut t_near, &mut t_far);
            std::mem::swap(&mut near_normal, &mut far_normal);
        }

        if t_near > t_enter {
            t_enter = t_near;
            enter_normal = near_normal;
        }
        if t_far < t_exit {
            t_exit = t_far;
            exit_normal = far_normal;
        }
    }

    if t_exit < 0.0 || t_enter > t_exit {
        return None;
    }
    if t_enter < 0.0 {
        Some((t_exit, exit_normal))
    } else {
        Some((t_enter, enter_normal))
    }
}

impl Raycast for Sphere {
    fn raycast(&self, ray: &Ray) -> Option<RaycastHit> {
        let to_center = self.center - ray.origin;
        let radius_sq = self.radius * self.radius;
        let to_center_sq = to_center.length_squared();
        let projection = to_center.dot(ray.direction);
        let offset_sq = to_center_sq - projection * projection;
        let half_chord_sq = radius_sq - offset_sq;

        if half_chord_sq < 0.0 {
            return None;
        }

        let distance = if to_center_sq < radius_sq {
            projection + half_chord_sq.sqrt()
        } else if half_chord_sq <= f32::EPSILON {
            // Tangent: the ray grazes the surface at the projected point.
            projection
        } else {
            projection - half_chord_sq.sqrt()
        };

        if distance < 0.0 {
            return None;
        }

        let point = ray.point_at(distance);
        Some(RaycastHit {
            distance,
            point,
            normal: normalize_or(point - self.center, -ray.direction),
        })
    }

    fn contains(&self, point: Vec3) -> bool {
        point_in_sphere(point, self)
    }
}

impl Raycast for Aabb {
    fn raycast(&self, ray: &Ray) -> Option<RaycastHit> {
        let (distance, normal) = slab_raycast(ray.origin, ray.direction, self.min(), self.max())?;
        Some(RaycastHit {
            distance,
            point: ray.point_at(distance),
            normal,
        })
    }

    fn contains(&self, point: Vec3) -> bool {
        point_in_aabb(point, self)
    }
}

impl Raycast for Cube {
    fn raycast(&self, ray: &Ray) -> Option<RaycastHit> {
        let inverse = self.rotation.transpose();
        let local_origin = to_local(ray.origin, self.center, &self.rotation);
        let local_direction = inverse * ray.direction;
        let (distance, local_normal) =
            slab_raycast(local_origin, local_direction, -self.half_size, self.half_size)?;
        Some(RaycastHit {
            distance,
            point: ray.point_at(distance),
            normal: self.rotation * local_normal,
        })
    }

    fn contains(&self, point: Vec3) -> bool {
        point_in_cube(point, self)
    }
}

impl Raycast for Plane {
    fn raycast(&self, ray: &Ray) -> Option<RaycastHit> {
        let facing = self.normal.dot(ray.direction);
        if facing.abs() < f32::EPSILON {
            return None;
        }

        let distance = self.normal.dot(self.center - ray.origin) / facing;
        if distance < 0.0 {
            return None;
        }

        let point = ray.point_at(distance);
        let local = to_local(point, self.center, &self.rotation);
        let bounds = self.half_size + Vec3::splat(GEOMETRY_EPSILON);
        if local.abs().cmpgt(bounds).any() {
            return None;
        }

        Some(RaycastHit {
            distance,
            point,
            normal: if facing > 0.0 { -self.normal } else { self.normal },
        })
    }

    fn contains(&self, point: Vec3) -> bool {
        point_on_plane(point, self)
    }
}

impl Raycast for Collider {
    fn raycast(&self, ray: &Ray) -> Option<RaycastHit> {
        match self {
            Collider::Sphere(s) => s.raycast(ray),
            Collider::Aabb(b) => b.raycast(ray),
            Collider::Cube(c) => c.raycast(ray),
            Collider::Plane(p) => p.raycast(ray),
            Collider::Custom(c) => c.raycast(ray),
        }
    }

    /// Custom shapes do not expose containment and always answer `false`.
    fn contains(&self, point: Vec3) -> bool {
        match self {
            Collider::Sphere(s) => s.contains(point),
            Collider::Aabb(b) => b.contains(point),
            Collider::Cube(c) => c.contains(point),
            Collider::Plane(p) => p.contains(point),
            Collider::Custom(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ray(origin: Vec3, direction: Vec3) -> Ray {
        Ray::new(origin, direction).expect("valid ray")
    }

    #[test]
    fn sphere_general_tangent_and_inside_cases() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0).expect("valid");

        let hit = sphere.raycast(&ray(Vec3::ZERO, Vec3::Z)).expect("front hit");
        assert_relative_eq!(hit.distance, 4.0, epsilon = 1e-5);
        assert_relative_eq!(hit.normal.z, -1.0, epsilon = 1e-5);

        let tangent = sphere
            .raycast(&ray(Vec3::new(1.0, 0.0, 0.0), Vec3::Z))
            .expect("tangent hit");
        assert_relative_eq!(tangent.distance, 5.0, epsilon = 1e-4);

        let inside = sphere
            .raycast(&ray(Vec3::new(0.0, 0.0, 5.0), Vec3::X))
            .expect("exit hit");
        assert_relative_eq!(inside.distance, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn sphere_behind_ray_misses_with_sentinel() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0).expect("valid");
        let r = ray(Vec3::ZERO, Vec3::Z);
        assert!(sphere.raycast(&r).is_none());
        assert_eq!(sphere.ray_distance(&r), NO_HIT);
    }

    #[test]
    fn aabb_slab_handles_axis_parallel_rays() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE).expect("valid");

        let hit = aabb
            .raycast(&ray(Vec3::new(-5.0, 0.5, 0.5), Vec3::X))
            .expect("hit");
        assert_relative_eq!(hit.distance, 4.0, epsilon = 1e-5);
        assert_eq!(hit.normal, Vec3::NEG_X);

        // Parallel to the Y slab but outside it.
        assert!(aabb.raycast(&ray(Vec3::new(-5.0, 2.0, 0.0), Vec3::X)).is_none());
    }

    #[test]
    fn aabb_ray_from_inside_reports_exit() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::new(2.0, 1.0, 1.0)).expect("valid");
        let hit = aabb.raycast(&ray(Vec3::ZERO, Vec3::X)).expect("exit");
        assert_relative_eq!(hit.distance, 2.0, epsilon = 1e-5);
        assert_eq!(hit.normal, Vec3::X);
    }

    #[test]
    fn cube_raycast_uses_local_frame() {
        let cube = Cube::new(
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::ONE,
            std::f32::consts::FRAC_PI_4,
            0.0,
        )
        .expect("valid");
        let hit = cube.raycast(&ray(Vec3::ZERO, Vec3::X)).expect("hit");
        // The yawed cube presents an edge at 5 - sqrt(2).
        assert_relative_eq!(hit.distance, 5.0 - std::f32::consts::SQRT_2, epsilon = 1e-4);
    }

    #[test]
    fn plane_raycast_checks_rectangle_bounds() {
        let plane = Plane::new(Vec3::ZERO, 1.0, 1.0, 0.0, -std::f32::consts::FRAC_PI_2)
            .expect("valid");

        let hit = plane
            .raycast(&ray(Vec3::new(0.5, 3.0, 0.5), Vec3::NEG_Y))
            .expect("hit");
        assert_relative_eq!(hit.distance, 3.0, epsilon = 1e-5);
        assert_relative_eq!(hit.normal.y, 1.0, epsilon = 1e-5);

        assert!(plane
            .raycast(&ray(Vec3::new(2.0, 3.0, 0.0), Vec3::NEG_Y))
            .is_none());
        assert!(plane.raycast(&ray(Vec3::new(0.0, 3.0, 0.0), Vec3::X)).is_none());
    }

    #[test]
    fn linetest_respects_segment_length() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0).expect("valid");
        assert!(sphere.linetest(&Line::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 4.5))));
        assert!(!sphere.linetest(&Line::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 3.5))));
        assert!(sphere.linetest(&Line::new(
            Vec3::new(0.0, 0.0, 5.2),
            Vec3::new(0.0, 0.0, 5.3)
        )));
    }
}
