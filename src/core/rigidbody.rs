use glam::Vec3;

use super::collider::Collider;
use crate::{
    config::{DEFAULT_LINEAR_DAMPING, DEFAULT_RESTITUTION, DEFAULT_STATIC_RESTITUTION},
    error::{PhysicsError, PhysicsResult},
};

fn check_restitution(restitution: f32) -> PhysicsResult<()> {
    if (0.0..=1.0).contains(&restitution) {
        Ok(())
    } else {
        Err(PhysicsError::InvalidRestitution(restitution))
    }
}

/// Dynamic body: translational state plus the collider it owns.
///
/// Orientation is not simulated; oriented colliders keep the rotation they
/// were built with.
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub(crate) position: Vec3,
    pub(crate) velocity: Vec3,
    pub(crate) net_force: Vec3,
    mass: f32,
    inverse_mass: f32,
    restitution: f32,
    linear_damping: f32,
    pub(crate) collider: Collider,
}

impl RigidBody {
    /// Creates a body at `position`, moving the collider onto it.
    ///
    /// `mass` must be positive and finite, `restitution` within `[0, 1]` and
    /// `linear_damping` within `(0, 1]` (1 keeps all velocity).
    pub fn new(
        position: Vec3,
        mass: f32,
        restitution: f32,
        linear_damping: f32,
        mut collider: Collider,
    ) -> PhysicsResult<Self> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(PhysicsError::InvalidMass(mass));
        }
        check_restitution(restitution)?;
        if !(linear_damping > 0.0 && linear_damping <= 1.0) {
            return Err(PhysicsError::InvalidDamping(linear_damping));
        }
        if !position.is_finite() {
            return Err(PhysicsError::InvalidShape("body position must be finite"));
        }

        collider.set_center(position);
        Ok(Self {
            position,
            velocity: Vec3::ZERO,
            net_force: Vec3::ZERO,
            mass,
            inverse_mass: 1.0 / mass,
            restitution,
            linear_damping,
            collider,
        })
    }

    pub fn builder(collider: impl Into<Collider>) -> RigidBodyBuilder {
        RigidBodyBuilder::new(collider.into())
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Teleports the body, keeping the collider in sync.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.collider.set_center(position);
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Force accumulated since the last integration.
    pub fn net_force(&self) -> Vec3 {
        self.net_force
    }

    /// Adds a force that acts during the next integration step only.
    pub fn apply_force(&mut self, force: Vec3) {
        self.net_force += force;
    }

    /// Changes velocity by `impulse / mass`.
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse * self.inverse_mass;
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn inverse_mass(&self) -> f32 {
        self.inverse_mass
    }

    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    pub fn linear_damping(&self) -> f32 {
        self.linear_damping
    }

    pub fn collider(&self) -> &Collider {
        &self.collider
    }
}

/// Builder with engine defaults for every physical property.
#[derive(Debug, Clone)]
pub struct RigidBodyBuilder {
    collider: Collider,
    position: Vec3,
    velocity: Vec3,
    mass: f32,
    restitution: f32,
    linear_damping: f32,
}

impl RigidBodyBuilder {
    pub fn new(collider: Collider) -> Self {
        Self {
            position: collider.center(),
            collider,
            velocity: Vec3::ZERO,
            mass: 1.0,
            restitution: DEFAULT_RESTITUTION,
            linear_damping: DEFAULT_LINEAR_DAMPING,
        }
    }

    pub fn position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn linear_damping(mut self, linear_damping: f32) -> Self {
        self.linear_damping = linear_damping;
        self
    }

    pub fn build(self) -> PhysicsResult<RigidBody> {
        let mut body = RigidBody::new(
            self.position,
            self.mass,
            self.restitution,
            self.linear_damping,
            self.collider,
        )?;
        body.velocity = self.velocity;
        Ok(body)
    }
}

/// Immovable collider holder; behaves as infinite mass in collision response.
#[derive(Debug, Clone)]
pub struct StaticBody {
    position: Vec3,
    restitution: f32,
    pub(crate) collider: Collider,
}

impl StaticBody {
    pub fn new(position: Vec3, mut collider: Collider) -> Self {
        collider.set_center(position);
        Self {
            position,
            restitution: DEFAULT_STATIC_RESTITUTION,
            collider,
        }
    }

    /// Builds a static body wherever its collider already sits.
    pub fn from_collider(collider: impl Into<Collider>) -> Self {
        let collider = collider.into();
        Self::new(collider.center(), collider)
    }

    pub fn with_restitution(mut self, restitution: f32) -> PhysicsResult<Self> {
        check_restitution(restitution)?;
        self.restitution = restitution;
        Ok(self)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.collider.set_center(position);
    }

    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    pub fn collider(&self) -> &Collider {
        &self.collider
    }
}
