//! Velocity-level collision response.

use crate::{
    collision::{
        broadphase::{BodyPair, PairManifold},
        contact::CollisionManifold,
    },
    config::DEFAULT_SOLVER_ITERATIONS,
    core::{
        rigidbody::{RigidBody, StaticBody},
        types::MixingMode,
    },
    utils::allocator::Arena,
};

/// Sequential impulse solver for translational bodies.
///
/// Every manifold is visited a fixed number of times per step; repeated
/// passes let impulses propagate between touching bodies instead of solving
/// the coupled system exactly.
#[derive(Debug, Clone)]
pub struct ImpulseSolver {
    pub iterations: u32,
    pub restitution_mixing: MixingMode,
}

impl Default for ImpulseSolver {
    fn default() -> Self {
        Self::new(DEFAULT_SOLVER_ITERATIONS, MixingMode::default())
    }
}

impl ImpulseSolver {
    pub fn new(iterations: u32, restitution_mixing: MixingMode) -> Self {
        Self {
            iterations,
            restitution_mixing,
        }
    }

    /// Runs all iterations over the step's manifolds.
    pub fn solve(
        &self,
        bodies: &mut Arena<RigidBody>,
        statics: &Arena<StaticBody>,
        manifolds: &[PairManifold],
    ) {
        for _ in 0..self.iterations {
            for entry in manifolds {
                match entry.pair {
                    BodyPair::Dynamic(a, b) => {
                        if let Some((body_a, body_b)) = bodies.get2_mut(a.0, b.0) {
                            self.resolve_dynamic(body_a, body_b, &entry.manifold);
                        }
                    }
                    BodyPair::Static(a, s) => {
                        if let (Some(body), Some(fixed)) = (bodies.get_mut(a.0), statics.get(s.0)) {
                            self.resolve_static(body, fixed, &entry.manifold);
                        }
                    }
                }
            }
        }
    }

    /// Applies the impulse between two dynamic bodies and returns its magnitude.
    ///
    /// `j = -(1 + e) * ((v_a - v_b) . n) / (1/m_a + 1/m_b)`; pairs already
    /// moving apart along the normal are left alone.
    pub fn resolve_dynamic(
        &self,
        a: &mut RigidBody,
        b: &mut RigidBody,
        manifold: &CollisionManifold,
    ) -> f32 {
        if !manifold.colliding {
            return 0.0;
        }
        let inverse_mass_sum = a.inverse_mass() + b.inverse_mass();
        if inverse_mass_sum <= 0.0 {
            return 0.0;
        }

        let approach = (a.velocity - b.velocity).dot(manifold.normal);
        if approach <= 0.0 {
            return 0.0;
        }

        let restitution = self
            .restitution_mixing
            .combine(a.restitution(), b.restitution());
        let impulse = -(1.0 + restitution) * approach / inverse_mass_sum;

        a.apply_impulse(manifold.normal * impulse);
        b.apply_impulse(-manifold.normal * impulse);
        impulse.abs()
    }

    /// One-body form of [`resolve_dynamic`](Self::resolve_dynamic): the static
    /// partner has zero inverse mass.
    pub fn resolve_static(
        &self,
        body: &mut RigidBody,
        fixed: &StaticBody,
        manifold: &CollisionManifold,
    ) -> f32 {
        if !manifold.colliding {
            return 0.0;
        }

        let approach = body.velocity.dot(manifold.normal);
        if approach <= 0.0 {
            return 0.0;
        }

        let restitution = self
            .restitution_mixing
            .combine(body.restitution(), fixed.restitution());
        let impulse = -(1.0 + restitution) * approach / body.inverse_mass();

        body.apply_impulse(manifold.normal * impulse);
        impulse.abs()
    }
}
