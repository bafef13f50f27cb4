//! Simulation dynamics: impulse resolution and integration.

pub mod integrator;
pub mod solver;

pub use integrator::Integrator;
pub use solver::ImpulseSolver;
