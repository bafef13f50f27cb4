//! Candidate pair enumeration and the narrow-phase pass over it.

use crate::{
    collision::{contact::CollisionManifold, narrowphase::find_collision_features},
    core::{
        handle::{RigidBodyHandle, StaticBodyHandle},
        rigidbody::{RigidBody, StaticBody},
    },
    utils::allocator::Arena,
};

/// Candidate pair produced by the broad phase. The rigid body is always A.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyPair {
    Dynamic(RigidBodyHandle, RigidBodyHandle),
    Static(RigidBodyHandle, StaticBodyHandle),
}

/// A colliding pair and its manifold, kept only for the step that produced it.
#[derive(Debug, Clone)]
pub struct PairManifold {
    pub pair: BodyPair,
    pub manifold: CollisionManifold,
}

/// Exhaustive O(n^2) broad phase: every rigid-rigid and rigid-static pair is a candidate.
#[derive(Debug, Default)]
pub struct BroadPhase {
    pairs: Vec<BodyPair>,
}

impl BroadPhase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the candidate list, reusing its allocation.
    pub fn update(&mut self, bodies: &Arena<RigidBody>, statics: &Arena<StaticBody>) {
        self.pairs.clear();

        let rigid: Vec<RigidBodyHandle> = bodies.ids().map(RigidBodyHandle).collect();
        for (i, &a) in rigid.iter().enumerate() {
            for &b in &rigid[i + 1..] {
                self.pairs.push(BodyPair::Dynamic(a, b));
            }
            for static_id in statics.ids() {
                self.pairs
                    .push(BodyPair::Static(a, StaticBodyHandle(static_id)));
            }
        }
    }

    pub fn pairs(&self) -> &[BodyPair] {
        &self.pairs
    }
}

/// Narrow phase over `pairs`, appending every colliding pair to `out` in pair order.
pub fn detect_collisions(
    pairs: &[BodyPair],
    bodies: &Arena<RigidBody>,
    statics: &Arena<StaticBody>,
    parallel: bool,
    out: &mut Vec<PairManifold>,
) {
    let detect = |pair: &BodyPair| -> Option<PairManifold> {
        let manifold = match *pair {
            BodyPair::Dynamic(a, b) => {
                find_collision_features(&bodies.get(a.0)?.collider, &bodies.get(b.0)?.collider)
            }
            BodyPair::Static(a, s) => {
                find_collision_features(&bodies.get(a.0)?.collider, &statics.get(s.0)?.collider)
            }
        };
        manifold.colliding.then_some(PairManifold {
            pair: *pair,
            manifold,
        })
    };

    #[cfg(feature = "parallel")]
    {
        if parallel {
            use rayon::prelude::*;
            out.par_extend(pairs.par_iter().filter_map(detect));
            return;
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    out.extend(pairs.iter().filter_map(detect));
}
