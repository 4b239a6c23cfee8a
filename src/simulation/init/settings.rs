use crate::core::error::check_finite;
use crate::core::RigError;
use crate::systems::engine::PhysicsBackend;

use super::config::validate_damping;
use super::SessionCore;

pub(super) fn set_gravity<B: PhysicsBackend>(session: &mut SessionCore<B>, x: f32, y: f32) -> Result<(), RigError> {
    check_finite("gravity", &[x, y])?;
    session.config.gravity = [x, y];
    session.backend.set_gravity(session.config.gravity_vec());
    Ok(())
}

pub(super) fn set_damping<B: PhysicsBackend>(session: &mut SessionCore<B>, damping: f32) -> Result<(), RigError> {
    validate_damping(damping)?;
    session.config.damping = damping;
    session.backend.set_damping(damping);
    Ok(())
}

pub(super) fn set_paused<B: PhysicsBackend>(session: &mut SessionCore<B>, paused: bool) {
    session.paused = paused;
}

pub(super) fn set_impulse<B: PhysicsBackend>(session: &mut SessionCore<B>, impulse: f32) -> Result<(), RigError> {
    check_finite("control.impulse", &[impulse])?;
    session.config.control.impulse = impulse;
    session.controls.set_impulse(impulse);
    Ok(())
}

pub(super) fn set_impulses_while_paused<B: PhysicsBackend>(session: &mut SessionCore<B>, enabled: bool) {
    session.config.control.impulses_while_paused = enabled;
}
