use super::*;
use crate::domain::control::ControlState;
use crate::domain::rig::RigVariant;
use approx::assert_relative_eq;

fn config() -> SessionConfig {
    let mut config = SessionConfig::default();
    config.rig.anchor = Some([340.0, 230.0]);
    config.ground.surface = 0.0;
    config.start_paused = false;
    config
}

fn paused_with_impulses() -> SessionCore {
    let mut config = config();
    config.start_paused = true;
    config.control.impulses_while_paused = true;
    SessionCore::new(config).unwrap()
}

#[test]
fn session_starts_paused_by_default() {
    let mut session = SessionCore::new(SessionConfig::default()).unwrap();
    assert!(session.paused());
    assert_eq!(session.rig().segment_count(), 8);
    assert_eq!(session.backend().body_count(), 9); // rig + ground

    let before = session.pose(SegmentKind::Torso).unwrap();
    session.tick();
    assert_eq!(session.pose(SegmentKind::Torso).unwrap(), before);
    assert_eq!(session.stats().ticks(), 1);
    assert_eq!(session.stats().stepper_calls(), 0);
    assert_eq!(session.sim_time(), 0.0);
}

#[test]
fn step_advances_time_by_configured_duration() {
    let mut session = SessionCore::new(config()).unwrap();
    session.step();
    assert_eq!(session.sim_time(), 0.02);
    assert_eq!(session.stats().substeps(), 10);

    for _ in 0..49 {
        session.step();
    }
    assert_relative_eq!(session.sim_time(), 1.0, epsilon = 1e-12);
    assert_eq!(session.stats().stepper_calls(), 50);
}

#[test]
fn custom_step_duration_is_honoured() {
    let mut config = config();
    config.step = StepConfig { duration: 0.01, substeps: 4 };
    let mut session = SessionCore::new(config).unwrap();
    session.step();
    assert_eq!(session.sim_time(), 0.01);
    assert_eq!(session.stats().substeps(), 4);
}

#[test]
fn held_control_pushes_only_its_segment_every_tick() {
    let mut session = paused_with_impulses();
    session.press(ControlKey::LeftThigh);

    session.tick();
    let v = session.velocity(SegmentKind::ThighLeft).unwrap();
    assert_relative_eq!(v.linear.x, 90.0 / 20.0, epsilon = 1e-4);
    for kind in SegmentKind::ALL {
        if kind != SegmentKind::ThighLeft {
            assert_eq!(session.velocity(kind).unwrap().linear, glam::Vec2::ZERO, "{}", kind.name());
        }
    }

    session.tick();
    let v = session.velocity(SegmentKind::ThighLeft).unwrap();
    assert_relative_eq!(v.linear.x, 2.0 * 90.0 / 20.0, epsilon = 1e-4);
    assert_eq!(session.stats().impulses(), 2);
    assert_eq!(session.sim_time(), 0.0);
}

#[test]
fn last_pressed_control_wins() {
    let mut session = paused_with_impulses();
    session.press(ControlKey::LeftThigh);
    session.press(ControlKey::RightCalf);
    session.tick();

    assert_eq!(session.control_state(), ControlState::RightCalfActive);
    assert_eq!(session.velocity(SegmentKind::ThighLeft).unwrap().linear.x, 0.0);
    assert_relative_eq!(
        session.velocity(SegmentKind::CalfRight).unwrap().linear.x,
        -90.0 / 20.0,
        epsilon = 1e-4
    );
}

#[test]
fn paused_session_ignores_controls_by_default() {
    let mut config = config();
    config.start_paused = true;
    let mut session = SessionCore::new(config).unwrap();
    session.press(ControlKey::RightThigh);
    session.tick();

    assert_eq!(session.stats().impulses(), 0);
    assert_eq!(session.velocity(SegmentKind::ThighRight).unwrap(), Velocity::ZERO);
}

#[test]
fn single_step_runs_once_while_paused_without_impulse() {
    let mut config = config();
    config.start_paused = true;
    let mut session = SessionCore::new(config).unwrap();
    session.press(ControlKey::LeftThigh);

    assert!(session.key_down("KeyS"));
    assert_eq!(session.stats().stepper_calls(), 1);
    assert_eq!(session.stats().impulses(), 0);
    assert_eq!(session.sim_time(), 0.02);
    assert!(session.paused());
}

#[test]
fn reset_restores_start_pose_and_is_idempotent() {
    let mut session = SessionCore::new(config()).unwrap();
    session.press(ControlKey::LeftCalf);
    for _ in 0..30 {
        session.tick();
    }
    let moved = session.pose(SegmentKind::Torso).unwrap();
    assert_ne!(moved, session.rig().segment(SegmentKind::Torso).unwrap().start_pose());

    session.reset();
    let first: Vec<_> = SegmentKind::ALL.iter().map(|&k| session.pose(k).unwrap()).collect();
    for segment in session.rig().segments() {
        let pose = session.pose(segment.kind()).unwrap();
        let start = segment.start_pose();
        assert_relative_eq!(pose.position.x, start.position.x, epsilon = 1e-4);
        assert_relative_eq!(pose.position.y, start.position.y, epsilon = 1e-4);
        assert_relative_eq!(pose.angle, 0.0, epsilon = 1e-4);
        assert_eq!(session.velocity(segment.kind()).unwrap(), Velocity::ZERO);
    }

    session.reset();
    let second: Vec<_> = SegmentKind::ALL.iter().map(|&k| session.pose(k).unwrap()).collect();
    assert_eq!(first, second);
    assert_eq!(session.stats().resets(), 2);
}

#[test]
fn key_codes_drive_actions() {
    let mut session = SessionCore::new(SessionConfig::default()).unwrap();

    assert!(!session.key_down("KeyZ"));
    assert!(session.key_down("Space"));
    assert!(!session.paused());
    assert!(session.key_down("Space"));
    assert!(session.paused());

    assert!(session.key_down("KeyW"));
    assert_eq!(session.control_state(), ControlState::RightThighActive);
    assert!(session.key_up("KeyQ"));
    assert_eq!(session.control_state(), ControlState::RightThighActive);
    assert!(session.key_up("KeyW"));
    assert_eq!(session.control_state(), ControlState::Idle);

    assert!(session.key_down("KeyR"));
    assert_eq!(session.stats().resets(), 1);

    assert!(!session.should_quit());
    assert!(session.key_down("Escape"));
    assert!(session.should_quit());
}

#[test]
fn non_control_keys_keep_the_held_control() {
    let mut session = SessionCore::new(SessionConfig::default()).unwrap();
    session.key_down("KeyO");
    session.key_down("Space");
    session.key_down("KeyR");
    assert_eq!(session.control_state(), ControlState::LeftCalfActive);
}

#[test]
fn draw_list_is_sorted_back_to_front() {
    let session = SessionCore::new(config()).unwrap();
    let list = session.draw_list();

    assert_eq!(list.len(), 8);
    assert_eq!(list.first().map(|d| d.segment), Some(SegmentKind::ThighRight));
    assert_eq!(list.last().map(|d| d.segment), Some(SegmentKind::Head));
    assert!(list.windows(2).all(|w| w[0].z_order < w[1].z_order));

    let torso = list.iter().find(|d| d.segment == SegmentKind::Torso).unwrap();
    assert_eq!(torso.asset, "torso.png");
    assert_relative_eq!(torso.x, 340.0);
    assert_relative_eq!(torso.half_height, 75.0);

    let buffer = session.pose_buffer();
    assert_eq!(buffer.len(), 8 * POSE_STRIDE);
    assert_eq!(buffer[0], SegmentKind::ThighRight.z_order() as f32);

    let json = session.draw_list_json();
    assert!(json.contains("\"segment\":\"thigh_right\""));
    assert!(json.contains("\"zOrder\":7"));
}

#[test]
fn reduced_variant_skips_missing_targets() {
    let mut config = config();
    config.rig.variant = RigVariant::Reduced;
    config.start_paused = true;
    config.control.impulses_while_paused = true;
    let mut session = SessionCore::new(config).unwrap();

    assert_eq!(session.draw_list().len(), 5);
    assert!(session.pose(SegmentKind::Head).is_none());
    session.press(ControlKey::LeftThigh);
    session.tick();
    assert_eq!(session.stats().impulses(), 1);
}

#[test]
fn settings_validate_before_applying() {
    let mut session = SessionCore::new(config()).unwrap();

    assert!(session.set_damping(0.0).is_err());
    assert!(session.set_damping(1.2).is_err());
    assert_relative_eq!(session.backend().damping(), 0.99);

    session.set_damping(0.5).unwrap();
    assert_relative_eq!(session.config().damping, 0.5);
    assert_relative_eq!(session.backend().damping(), 0.5);

    assert!(session.set_gravity(f32::NAN, 0.0).is_err());
    session.set_gravity(0.0, -100.0).unwrap();
    assert_eq!(session.backend().gravity(), glam::Vec2::new(0.0, -100.0));
}

#[test]
fn invalid_config_builds_nothing() {
    let mut config = config();
    config.rig.width = -5.0;
    assert!(matches!(
        SessionCore::with_backend(RapierBackend::default(), config),
        Err(RigError::InvalidDimension { name: "width", .. })
    ));
    assert!(SessionCore::from_json("not json").is_err());
}

#[test]
fn joint_angles_start_at_zero() {
    let session = SessionCore::new(config()).unwrap();
    assert_eq!(session.joint_angle(SegmentKind::Torso, SegmentKind::ThighLeft), Some(0.0));
    assert_eq!(session.joint_angle(SegmentKind::Head, SegmentKind::FootLeft), None);
}
