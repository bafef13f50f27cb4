//! Zeta Physics – a small rigid-body collision and impulse engine.
//!
//! Bodies carry one primitive collider (sphere, axis-aligned box, oriented
//! box, bounded plane, or a user shape). A [`PhysicsHandler`] owns them and
//! advances the simulation at a fixed rate: every pair is tested, colliding
//! pairs produce a [`CollisionManifold`] whose normal points from the first
//! body toward the second, a sequential impulse solver separates velocities,
//! and bodies integrate under gravity and linear damping.
//!
//! ```
//! use zeta_physics::{PhysicsHandler, Plane, RigidBody, Sphere, StaticBody, Vec3};
//!
//! let mut handler = PhysicsHandler::new();
//! let floor = Plane::new(Vec3::ZERO, 10.0, 10.0, 0.0, -std::f32::consts::FRAC_PI_2)?;
//! handler.add_static_body(StaticBody::from_collider(floor));
//! let ball = handler.add_rigid_body(
//!     RigidBody::builder(Sphere::new(Vec3::new(0.0, 2.0, 0.0), 0.5)?).build()?,
//! );
//!
//! let mut dt = 0.11;
//! let steps = handler.update(&mut dt);
//! assert_eq!(steps, 6);
//! assert!(handler.rigid_body(ball).is_some());
//! # Ok::<(), zeta_physics::PhysicsError>(())
//! ```

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod handler;
pub mod utils;

pub use glam::{Mat3, Vec3};

pub use collision::{
    broadphase::{BodyPair, PairManifold},
    contact::CollisionManifold,
    narrowphase::find_collision_features,
    queries::{Raycast, RaycastHit, NO_HIT},
};
pub use config::HandlerConfig;
pub use core::{
    collider::{Collider, ColliderKind, CustomShape},
    handle::{BodyHandle, RigidBodyHandle, StaticBodyHandle},
    rigidbody::{RigidBody, RigidBodyBuilder, StaticBody},
    shapes::{Aabb, Cube, Line, Plane, Ray, Sphere},
    types::MixingMode,
};
pub use dynamics::{ImpulseSolver, Integrator};
pub use error::{PhysicsError, PhysicsResult};
pub use handler::{BodyRaycastHit, PhysicsHandler, SimulationState};
pub use utils::{
    allocator::{Arena, EntityId},
    profiling::StepProfiler,
};
