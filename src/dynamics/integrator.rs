use glam::Vec3;

use crate::{core::rigidbody::RigidBody, utils::allocator::Arena};

/// Semi-implicit Euler integrator for translational bodies.
#[derive(Debug, Clone, Copy)]
pub struct Integrator {
    pub gravity: Vec3,
}

impl Integrator {
    pub fn new(gravity: Vec3) -> Self {
        Self { gravity }
    }

    /// Applies gravity and accumulated forces, moves the body, damps its
    /// velocity, clears the force accumulator and re-syncs the collider.
    pub fn integrate(&self, body: &mut RigidBody, dt: f32) {
        body.net_force += self.gravity * body.mass();
        body.velocity += body.net_force * body.inverse_mass() * dt;
        body.position += body.velocity * dt;
        body.velocity *= body.linear_damping();
        body.net_force = Vec3::ZERO;
        body.collider.set_center(body.position);
    }

    pub fn step(&self, bodies: &mut Arena<RigidBody>, dt: f32) {
        for (_, body) in bodies.iter_mut() {
            self.integrate(body, dt);
        }
    }
}
