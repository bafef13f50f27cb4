//! Error types surfaced when constructing bodies and shapes.

use thiserror::Error;

/// Errors reported by constructors that validate physical or geometric input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    #[error("mass must be positive and finite, got {0}")]
    InvalidMass(f32),
    #[error("restitution must lie in [0, 1], got {0}")]
    InvalidRestitution(f32),
    #[error("linear damping must lie in (0, 1], got {0}")]
    InvalidDamping(f32),
    #[error("invalid shape: {0}")]
    InvalidShape(&'static str),
}

pub type PhysicsResult<T> = Result<T, PhysicsError>;
