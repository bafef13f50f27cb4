//! Core types describing bodies, their colliders, and shared data.

pub mod collider;
pub mod handle;
pub mod rigidbody;
pub mod shapes;
pub mod types;

pub use collider::{Collider, ColliderKind, CustomShape};
pub use handle::{BodyHandle, RigidBodyHandle, StaticBodyHandle};
pub use rigidbody::{RigidBody, RigidBodyBuilder, StaticBody};
pub use shapes::{Aabb, Cube, Line, Plane, Ray, Sphere};
pub use types::MixingMode;
