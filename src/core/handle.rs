use serde::{Deserialize, Serialize};

use crate::utils::allocator::EntityId;

/// Stable reference to a rigid body owned by a [`PhysicsHandler`](crate::PhysicsHandler).
///
/// Handles survive arena growth; once the body is removed the handle never
/// resolves again, even if its slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RigidBodyHandle(pub(crate) EntityId);

/// Stable reference to a static body owned by a [`PhysicsHandler`](crate::PhysicsHandler).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StaticBodyHandle(pub(crate) EntityId);

/// Either kind of body handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyHandle {
    Rigid(RigidBodyHandle),
    Static(StaticBodyHandle),
}

impl From<RigidBodyHandle> for BodyHandle {
    fn from(handle: RigidBodyHandle) -> Self {
        BodyHandle::Rigid(handle)
    }
}

impl From<StaticBodyHandle> for BodyHandle {
    fn from(handle: StaticBodyHandle) -> Self {
        BodyHandle::Static(handle)
    }
}
