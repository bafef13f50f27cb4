//! The physics handler: body ownership and the fixed-step simulation loop.

use std::{collections::HashSet, time::Instant};

use glam::Vec3;
use log::{debug, warn};

use crate::{
    collision::{
        broadphase::{detect_collisions, BroadPhase, PairManifold},
        queries::{Raycast, RaycastHit},
    },
    config::HandlerConfig,
    core::{
        handle::{BodyHandle, RigidBodyHandle, StaticBodyHandle},
        rigidbody::{RigidBody, StaticBody},
        shapes::Ray,
    },
    dynamics::{integrator::Integrator, solver::ImpulseSolver},
    utils::{
        allocator::Arena,
        logging::ScopedTimer,
        profiling::{PhaseTimer, StepProfiler},
    },
};

/// Coarse lifecycle of a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    /// No rigid bodies; stepping only advances time.
    Idle,
    Running,
}

/// Ray hit tagged with the body it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyRaycastHit {
    pub body: BodyHandle,
    pub hit: RaycastHit,
}

/// Owns every body of one simulation and advances it at a fixed rate.
///
/// The handler owns its bodies outright and is deliberately not `Clone`:
///
/// ```compile_fail
/// use zeta_physics::PhysicsHandler;
///
/// let handler = PhysicsHandler::new();
/// let copy = handler.clone();
/// ```
#[derive(Debug)]
pub struct PhysicsHandler {
    bodies: Arena<RigidBody>,
    statics: Arena<StaticBody>,
    broadphase: BroadPhase,
    manifolds: Vec<PairManifold>,
    integrator: Integrator,
    solver: ImpulseSolver,
    time_step: f32,
    max_steps_per_update: u32,
    parallel_enabled: bool,
    profiler: StepProfiler,
}

impl Default for PhysicsHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsHandler {
    pub fn new() -> Self {
        Self::with_config(HandlerConfig::default())
    }

    pub fn with_config(config: HandlerConfig) -> Self {
        let time_step = config.effective_time_step();
        if time_step != config.time_step {
            warn!(
                "requested time step {} is not usable, stepping at {}",
                config.time_step, time_step
            );
        }
        let gravity = config.effective_gravity();
        if gravity != config.gravity {
            warn!(
                "gravity {:?} is not finite, using {:?}",
                config.gravity, gravity
            );
        }
        #[cfg(not(feature = "parallel"))]
        {
            if config.parallel {
                debug!("parallel narrow phase requested but the `parallel` feature is disabled");
            }
        }

        Self {
            bodies: Arena::new(),
            statics: Arena::new(),
            broadphase: BroadPhase::new(),
            manifolds: Vec::new(),
            integrator: Integrator::new(gravity),
            solver: ImpulseSolver::new(config.solver_iterations, config.restitution_mixing),
            time_step,
            max_steps_per_update: config.max_steps_per_update,
            parallel_enabled: config.parallel,
            profiler: StepProfiler::default(),
        }
    }

    pub fn gravity(&self) -> Vec3 {
        self.integrator.gravity
    }

    /// Non-finite gravity is ignored.
    pub fn set_gravity(&mut self, gravity: Vec3) {
        if !gravity.is_finite() {
            warn!("ignoring non-finite gravity {:?}", gravity);
            return;
        }
        self.integrator.gravity = gravity;
    }

    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    pub fn set_parallel_enabled(&mut self, enabled: bool) {
        self.parallel_enabled = enabled;
    }

    pub fn parallel_enabled(&self) -> bool {
        self.parallel_enabled
    }

    pub fn state(&self) -> SimulationState {
        if self.bodies.is_empty() {
            SimulationState::Idle
        } else {
            SimulationState::Running
        }
    }

    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        let handle = RigidBodyHandle(self.bodies.insert(body));
        debug!("added rigid body {:?}", handle.0);
        handle
    }

    pub fn add_rigid_bodies<I>(&mut self, bodies: I) -> Vec<RigidBodyHandle>
    where
        I: IntoIterator<Item = RigidBody>,
    {
        bodies
            .into_iter()
            .map(|body| self.add_rigid_body(body))
            .collect()
    }

    /// Removes and returns the body, or `None` if the handle is stale.
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) -> Option<RigidBody> {
        let body = self.bodies.remove(handle.0)?;
        debug!("removed rigid body {:?}", handle.0);
        Some(body)
    }

    /// Removes every listed body and returns how many were removed.
    ///
    /// Repeated handles count once. If any handle does not resolve, nothing
    /// is removed and `None` is returned.
    pub fn remove_rigid_bodies(&mut self, handles: &[RigidBodyHandle]) -> Option<usize> {
        let unique: HashSet<RigidBodyHandle> = handles.iter().copied().collect();
        if let Some(missing) = unique.iter().find(|h| !self.bodies.contains(h.0)) {
            debug!("rigid body {:?} not found, batch removal aborted", missing.0);
            return None;
        }
        for handle in &unique {
            self.bodies.remove(handle.0);
        }
        debug!("removed {} rigid bodies", unique.len());
        Some(unique.len())
    }

    pub fn rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle.0)
    }

    pub fn rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle.0)
    }

    pub fn rigid_bodies(&self) -> impl Iterator<Item = (RigidBodyHandle, &RigidBody)> + '_ {
        self.bodies.iter().map(|(id, body)| (RigidBodyHandle(id), body))
    }

    pub fn rigid_body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn add_static_body(&mut self, body: StaticBody) -> StaticBodyHandle {
        let handle = StaticBodyHandle(self.statics.insert(body));
        debug!("added static body {:?}", handle.0);
        handle
    }

    pub fn add_static_bodies<I>(&mut self, bodies: I) -> Vec<StaticBodyHandle>
    where
        I: IntoIterator<Item = StaticBody>,
    {
        bodies
            .into_iter()
            .map(|body| self.add_static_body(body))
            .collect()
    }

    pub fn remove_static_body(&mut self, handle: StaticBodyHandle) -> Option<StaticBody> {
        let body = self.statics.remove(handle.0)?;
        debug!("removed static body {:?}", handle.0);
        Some(body)
    }

    /// Same all-or-nothing policy as [`remove_rigid_bodies`](Self::remove_rigid_bodies).
    pub fn remove_static_bodies(&mut self, handles: &[StaticBodyHandle]) -> Option<usize> {
        let unique: HashSet<StaticBodyHandle> = handles.iter().copied().collect();
        if let Some(missing) = unique.iter().find(|h| !self.statics.contains(h.0)) {
            debug!("static body {:?} not found, batch removal aborted", missing.0);
            return None;
        }
        for handle in &unique {
            self.statics.remove(handle.0);
        }
        debug!("removed {} static bodies", unique.len());
        Some(unique.len())
    }

    pub fn static_body(&self, handle: StaticBodyHandle) -> Option<&StaticBody> {
        self.statics.get(handle.0)
    }

    pub fn static_body_mut(&mut self, handle: StaticBodyHandle) -> Option<&mut StaticBody> {
        self.statics.get_mut(handle.0)
    }

    pub fn static_bodies(&self) -> impl Iterator<Item = (StaticBodyHandle, &StaticBody)> + '_ {
        self.statics.iter().map(|(id, body)| (StaticBodyHandle(id), body))
    }

    pub fn static_body_count(&self) -> usize {
        self.statics.len()
    }

    /// Runs as many fixed steps as fit in `dt` (at most
    /// `max_steps_per_update`), leaving the unconsumed remainder in `dt`, and
    /// returns the number of steps taken.
    ///
    /// The step count is fixed before stepping, so the call terminates even
    /// when `dt` is too large for subtracting one step to change it.
    pub fn update(&mut self, dt: &mut f32) -> u32 {
        if !dt.is_finite() {
            warn!("ignoring non-finite frame time {}", dt);
            *dt = 0.0;
            return 0;
        }

        let whole = (*dt / self.time_step).floor();
        if whole < 1.0 {
            return 0;
        }
        let steps = (whole as u32).min(self.max_steps_per_update);
        if steps < whole as u32 {
            debug!("update capped at {} of {} steps", steps, whole);
        }

        for _ in 0..steps {
            self.step();
        }
        *dt = (*dt - steps as f32 * self.time_step).max(0.0);
        steps
    }

    /// Advances the simulation by exactly one fixed step.
    pub fn step(&mut self) {
        let step_start = Instant::now();
        self.profiler.reset();
        self.profiler.body_count = self.bodies.len();
        self.profiler.static_body_count = self.statics.len();

        {
            let _timer = ScopedTimer::new("broadphase::update");
            let _phase = PhaseTimer::new(&mut self.profiler.broad_phase_time);
            self.broadphase.update(&self.bodies, &self.statics);
        }
        self.profiler.pairs_tested = self.broadphase.pairs().len();

        {
            let label = if self.parallel_enabled {
                "narrowphase::parallel"
            } else {
                "narrowphase::sequential"
            };
            let _timer = ScopedTimer::new(label);
            let _phase = PhaseTimer::new(&mut self.profiler.narrow_phase_time);
            detect_collisions(
                self.broadphase.pairs(),
                &self.bodies,
                &self.statics,
                self.parallel_enabled,
                &mut self.manifolds,
            );
        }
        self.profiler.manifold_count = self.manifolds.len();
        self.profiler.contact_point_count = self
            .manifolds
            .iter()
            .map(|entry| entry.manifold.contact_count())
            .sum();

        {
            let _timer = ScopedTimer::new("solver");
            let _phase = PhaseTimer::new(&mut self.profiler.solver_time);
            self.solver
                .solve(&mut self.bodies, &self.statics, &self.manifolds);
        }
        self.manifolds.clear();

        {
            let _timer = ScopedTimer::new("integrator");
            let _phase = PhaseTimer::new(&mut self.profiler.integrator_time);
            self.integrator.step(&mut self.bodies, self.time_step);
        }

        self.profiler.total_step_time = step_start.elapsed();
        self.profiler.report();
    }

    /// Colliding pairs for the current state, without advancing the simulation.
    pub fn collect_manifolds(&mut self) -> Vec<PairManifold> {
        self.broadphase.update(&self.bodies, &self.statics);
        let mut manifolds = Vec::new();
        detect_collisions(
            self.broadphase.pairs(),
            &self.bodies,
            &self.statics,
            self.parallel_enabled,
            &mut manifolds,
        );
        manifolds
    }

    /// Casts against every body, nearest hit first.
    pub fn raycast(&self, ray: &Ray) -> Vec<BodyRaycastHit> {
        let rigid = self.bodies.iter().filter_map(|(id, body)| {
            body.collider.raycast(ray).map(|hit| BodyRaycastHit {
                body: RigidBodyHandle(id).into(),
                hit,
            })
        });
        let fixed = self.statics.iter().filter_map(|(id, body)| {
            body.collider.raycast(ray).map(|hit| BodyRaycastHit {
                body: StaticBodyHandle(id).into(),
                hit,
            })
        });

        let mut hits: Vec<BodyRaycastHit> = rigid.chain(fixed).collect();
        hits.sort_by(|a, b| a.hit.distance.total_cmp(&b.hit.distance));
        hits
    }

    pub fn raycast_closest(&self, ray: &Ray) -> Option<BodyRaycastHit> {
        self.raycast(ray).into_iter().next()
    }

    /// Timings and counters of the most recent [`step`](Self::step).
    pub fn last_step_stats(&self) -> &StepProfiler {
        &self.profiler
    }
}
