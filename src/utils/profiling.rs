use std::time::{Duration, Instant};

/// Timing and counter data for the most recent fixed step.
#[derive(Debug, Default, Clone, Copy)]
pub struct StepProfiler {
    pub broad_phase_time: Duration,
    pub narrow_phase_time: Duration,
    pub solver_time: Duration,
    pub integrator_time: Duration,
    pub total_step_time: Duration,

    pub body_count: usize,
    pub static_body_count: usize,
    pub pairs_tested: usize,
    pub manifold_count: usize,
    pub contact_point_count: usize,
}

impl StepProfiler {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn report(&self) {
        let total_us = self.total_step_time.as_micros() as f32;
        if total_us < 1.0 {
            return;
        }

        log::debug!(
            "step: {} bodies, {} statics, {} pairs, {} manifolds ({} points), {:.3} ms \
             [broad {:.1}%, narrow {:.1}%, solver {:.1}%, integrate {:.1}%]",
            self.body_count,
            self.static_body_count,
            self.pairs_tested,
            self.manifold_count,
            self.contact_point_count,
            self.total_step_time.as_secs_f32() * 1000.0,
            (self.broad_phase_time.as_micros() as f32 / total_us) * 100.0,
            (self.narrow_phase_time.as_micros() as f32 / total_us) * 100.0,
            (self.solver_time.as_micros() as f32 / total_us) * 100.0,
            (self.integrator_time.as_micros() as f32 / total_us) * 100.0,
        );
    }
}

/// Adds the elapsed time of its scope to the referenced duration.
pub struct PhaseTimer<'a> {
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> PhaseTimer<'a> {
    pub fn new(output: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            output,
        }
    }
}

impl<'a> Drop for PhaseTimer<'a> {
    fn drop(&mut self) {
        *self.output += self.start.elapsed();
    }
}
