use tracing::debug;

use crate::systems::engine::PhysicsBackend;

use super::{PerfTimer, SessionCore};

pub(super) fn tick<B: PhysicsBackend>(session: &mut SessionCore<B>) {
    session.stats.ticks += 1;

    if !session.paused || session.config.control.impulses_while_paused {
        apply_control_impulse(session);
    }
    if !session.paused {
        step(session);
    }
}

/// Push the held control's impulse into its segment. Returns false when idle.
pub(super) fn apply_control_impulse<B: PhysicsBackend>(session: &mut SessionCore<B>) -> bool {
    let Some(impulse) = session.controls.tick_impulse() else {
        return false;
    };
    let Some(segment) = session.rig.segment(impulse.segment) else {
        // Reduced rigs may lack the target.
        return false;
    };

    session
        .backend
        .apply_impulse_at_local_point(segment.body(), impulse.impulse, impulse.local_point);
    session.stats.impulses += 1;
    true
}

pub(super) fn step<B: PhysicsBackend>(session: &mut SessionCore<B>) {
    let timer = PerfTimer::start();
    let substeps = session.config.step.substeps;
    let dt = session.config.step.substep_dt();

    for _ in 0..substeps {
        session.backend.step(dt);
    }

    session.sim_time += session.config.step.duration;
    session.stats.stepper_calls += 1;
    session.stats.substeps += substeps;
    session.stats.sim_seconds = session.sim_time;
    session.stats.last_step_ms = timer.elapsed_ms();

    if let Some(event) = session.fall.take_event() {
        session.stats.falls += 1;
        debug!(?event, t = session.sim_time, "fall recorded");
    }
}
