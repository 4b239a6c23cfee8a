use tracing::{debug, info};

use crate::domain::control::{ControlKey, InputAction};
use crate::domain::segment::Velocity;
use crate::systems::engine::PhysicsBackend;

use super::{step, SessionCore};

pub(super) fn key_down<B: PhysicsBackend>(session: &mut SessionCore<B>, code: &str) -> bool {
    match InputAction::from_key_code(code) {
        Some(action) => {
            apply(session, action);
            true
        }
        None => false,
    }
}

pub(super) fn key_up<B: PhysicsBackend>(session: &mut SessionCore<B>, code: &str) -> bool {
    match InputAction::from_key_code(code) {
        Some(InputAction::Hold(key)) => {
            release(session, key);
            true
        }
        // Only holds care about release.
        Some(_) => true,
        None => false,
    }
}

pub(super) fn apply<B: PhysicsBackend>(session: &mut SessionCore<B>, action: InputAction) {
    match action {
        InputAction::Hold(key) => press(session, key),
        InputAction::Reset => reset(session),
        InputAction::TogglePause => toggle_pause(session),
        InputAction::SingleStep => single_step(session),
        InputAction::Quit => quit(session),
    }
}

pub(super) fn press<B: PhysicsBackend>(session: &mut SessionCore<B>, key: ControlKey) {
    session.controls.press(key);
    debug!(state = ?session.controls.state(), "control pressed");
}

pub(super) fn release<B: PhysicsBackend>(session: &mut SessionCore<B>, key: ControlKey) {
    let before = session.controls.state();
    session.controls.release(key);
    if before != session.controls.state() {
        debug!(?key, "control released");
    }
}

pub(super) fn reset<B: PhysicsBackend>(session: &mut SessionCore<B>) {
    for segment in session.rig.segments() {
        session.backend.set_pose(segment.body(), segment.start_pose());
        session.backend.set_velocity(segment.body(), Velocity::ZERO);
    }
    session.fall.clear();
    session.stats.resets += 1;
    info!(segments = session.rig.segment_count(), "rig reset to start pose");
}

pub(super) fn toggle_pause<B: PhysicsBackend>(session: &mut SessionCore<B>) {
    session.paused = !session.paused;
    debug!(paused = session.paused, "pause toggled");
}

pub(super) fn single_step<B: PhysicsBackend>(session: &mut SessionCore<B>) {
    step::step(session);
}

pub(super) fn quit<B: PhysicsBackend>(session: &mut SessionCore<B>) {
    session.quit = true;
    info!("quit requested");
}
