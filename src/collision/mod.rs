//! Collision detection: candidate pairs, boolean tests, manifolds, and ray queries.

pub mod broadphase;
pub mod clipping;
pub mod contact;
pub mod intersect;
pub mod narrowphase;
pub mod queries;
pub mod sat;

pub use broadphase::{BodyPair, BroadPhase, PairManifold};
pub use contact::CollisionManifold;
pub use narrowphase::find_collision_features;
pub use queries::{Raycast, RaycastHit, NO_HIT};
