use glam::Vec3;

/// Narrow-phase result for one pair of colliders.
///
/// The normal is a unit vector pointing from collider A toward collider B;
/// `depth` is positive while the shapes overlap. At most
/// [`MAX_CONTACT_POINTS`](crate::config::MAX_CONTACT_POINTS) contacts are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionManifold {
    pub colliding: bool,
    pub normal: Vec3,
    pub depth: f32,
    pub contacts: Vec<Vec3>,
}

impl Default for CollisionManifold {
    fn default() -> Self {
        Self::none()
    }
}

impl CollisionManifold {
    /// Manifold describing a pair that does not touch.
    pub fn none() -> Self {
        Self {
            colliding: false,
            normal: Vec3::ZERO,
            depth: 0.0,
            contacts: Vec::new(),
        }
    }

    pub fn hit(normal: Vec3, depth: f32, contacts: Vec<Vec3>) -> Self {
        Self {
            colliding: true,
            normal,
            depth,
            contacts,
        }
    }

    pub fn is_colliding(&self) -> bool {
        self.colliding
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    /// Same manifold seen with A and B swapped.
    pub fn flipped(mut self) -> Self {
        self.normal = -self.normal;
        self
    }
}
