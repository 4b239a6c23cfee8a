use tracing::info;

use crate::core::RigError;
use crate::domain::control::ControlMapper;
use crate::systems::engine::PhysicsBackend;
use crate::systems::fall::FallDetector;
use crate::systems::rig_builder::{build_ground, build_rig};

use super::perf_stats::StepStats;
use super::{SessionConfig, SessionCore};

pub(super) fn create_session<B: PhysicsBackend>(
    mut backend: B,
    config: SessionConfig,
) -> Result<SessionCore<B>, RigError> {
    // Validate everything first; nothing below can fail once this passes.
    config.validate()?;

    backend.set_gravity(config.gravity_vec());
    backend.set_damping(config.damping);

    let ground = build_ground(&mut backend, &config.ground)?;
    let rig = build_rig(&mut backend, &config.rig_dimensions())?;
    let fall = FallDetector::install(&mut backend, &config.fall.disallowed);

    info!(
        paused = config.start_paused,
        step = config.step.duration,
        substeps = config.step.substeps,
        "session ready"
    );

    Ok(SessionCore {
        backend,
        controls: ControlMapper::new(config.control.impulse),
        paused: config.start_paused,
        config,
        rig,
        ground,
        fall,
        quit: false,
        sim_time: 0.0,
        stats: StepStats::default(),
    })
}
