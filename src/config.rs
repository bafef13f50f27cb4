//! Global configuration constants and runtime configuration for the Zeta engine.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::types::MixingMode;

/// Default gravity vector applied by the handler (Y-up).
pub const DEFAULT_GRAVITY: [f32; 3] = [0.0, -9.8, 0.0];

/// Default (and largest allowed) fixed timestep, in seconds.
pub const DEFAULT_TIME_STEP: f32 = 1.0 / 60.0;

/// Number of impulse iterations performed over the manifolds every step.
pub const DEFAULT_SOLVER_ITERATIONS: u32 = 6;

/// Restitution given to bodies built without an explicit value.
pub const DEFAULT_RESTITUTION: f32 = 0.5;

/// Multiplicative velocity damping given to bodies built without an explicit value.
pub const DEFAULT_LINEAR_DAMPING: f32 = 0.99;

/// Restitution of static bodies unless overridden.
pub const DEFAULT_STATIC_RESTITUTION: f32 = 1.0;

/// Fixed steps a single `update` call may run; the default never caps.
pub const DEFAULT_MAX_STEPS_PER_UPDATE: u32 = u32::MAX;

/// Upper bound on the number of contact points kept per manifold.
pub const MAX_CONTACT_POINTS: usize = 4;

/// Runtime configuration for a [`PhysicsHandler`](crate::PhysicsHandler).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerConfig {
    pub gravity: Vec3,
    pub time_step: f32,
    pub solver_iterations: u32,
    pub restitution_mixing: MixingMode,
    /// Runs the narrow phase on the rayon pool when the `parallel` feature is compiled in.
    pub parallel: bool,
    /// Time beyond this many steps stays in the caller's `dt`.
    pub max_steps_per_update: u32,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::from_slice(&DEFAULT_GRAVITY),
            time_step: DEFAULT_TIME_STEP,
            solver_iterations: DEFAULT_SOLVER_ITERATIONS,
            restitution_mixing: MixingMode::default(),
            parallel: false,
            max_steps_per_update: DEFAULT_MAX_STEPS_PER_UPDATE,
        }
    }
}

impl HandlerConfig {
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_time_step(mut self, time_step: f32) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_solver_iterations(mut self, iterations: u32) -> Self {
        self.solver_iterations = iterations;
        self
    }

    pub fn with_restitution_mixing(mut self, mode: MixingMode) -> Self {
        self.restitution_mixing = mode;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_max_steps_per_update(mut self, max_steps: u32) -> Self {
        self.max_steps_per_update = max_steps;
        self
    }

    /// Returns the gravity the handler will actually use; non-finite vectors
    /// fall back to the default.
    pub fn effective_gravity(&self) -> Vec3 {
        if self.gravity.is_finite() {
            self.gravity
        } else {
            Vec3::from_slice(&DEFAULT_GRAVITY)
        }
    }

    /// Returns the timestep the handler will actually use.
    ///
    /// Steps slower than 60 Hz are clamped to 60 Hz; non-positive or non-finite
    /// values fall back to the default.
    pub fn effective_time_step(&self) -> f32 {
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            DEFAULT_TIME_STEP
        } else {
            self.time_step.min(DEFAULT_TIME_STEP)
        }
    }
}
