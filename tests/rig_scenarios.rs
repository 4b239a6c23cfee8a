use particula_ragdoll::domain::ControlKey;
use particula_ragdoll::systems::rig_builder::HIP;
use particula_ragdoll::{SegmentKind, SessionConfig, SessionCore};

fn scenario_config() -> SessionConfig {
    let mut config = SessionConfig::default();
    config.rig.anchor = Some([340.0, 230.0]);
    config.rig.width = 100.0;
    config.rig.height = 200.0;
    config.rig.mass = 20.0;
    config.ground.surface = 0.0;
    config.start_paused = false;
    config
}

#[test]
fn idle_rig_falls_then_stays_in_a_band() {
    let mut session = SessionCore::new(scenario_config()).expect("scenario config is valid");
    let start_y = session.pose(SegmentKind::Torso).unwrap().position.y;

    let mut heights = Vec::with_capacity(500);
    for _ in 0..500 {
        session.tick();
        for kind in SegmentKind::ALL {
            let pose = session.pose(kind).unwrap();
            assert!(pose.position.is_finite() && pose.angle.is_finite(), "{} blew up", kind.name());
        }
        heights.push(session.pose(SegmentKind::Torso).unwrap().position.y);
    }

    let last = *heights.last().unwrap();
    assert!(last < start_y - 1.0, "torso never fell: {last}");
    assert!(last > -5.0, "torso went through the ground: {last}");

    let tail = &heights[400..];
    let lo = tail.iter().cloned().fold(f32::INFINITY, f32::min);
    let hi = tail.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    assert!(hi - lo < 100.0, "torso still bouncing: {lo}..{hi}");
    assert!((session.sim_time() - 10.0).abs() < 1e-9);
}

#[test]
fn joints_settle_inside_their_limits() {
    let mut session = SessionCore::new(scenario_config()).unwrap();
    for _ in 0..150 {
        session.tick();
    }

    let rig = session.rig();
    for joint in rig.joints() {
        let angle = session.joint_angle(joint.a(), joint.b()).unwrap();
        assert!(
            joint.limit().contains(angle, 0.15),
            "{} rests at {angle} outside [{}, {}]",
            joint.label(),
            joint.limit().min,
            joint.limit().max
        );
    }
}

#[test]
fn held_thigh_swings_to_its_hip_limit_and_clamps() {
    let mut config = scenario_config();
    config.gravity = [0.0, 0.0];
    config.control.impulse = 1000.0;
    let mut session = SessionCore::new(config).unwrap();

    // Let the knees snap into their range before pushing.
    for _ in 0..10 {
        session.tick();
    }

    session.press(ControlKey::LeftThigh);
    let mut angles = Vec::with_capacity(50);
    for _ in 0..50 {
        session.tick();
        angles.push(session.joint_angle(SegmentKind::Torso, SegmentKind::ThighLeft).unwrap());
    }

    for pair in angles.windows(2) {
        assert!(pair[1] >= pair[0] - 0.1, "hip swung back: {} -> {}", pair[0], pair[1]);
    }
    assert!(angles.iter().all(|&a| a <= HIP.max + 0.1), "hip exceeded limit: {angles:?}");
    assert!(*angles.last().unwrap() >= HIP.max - 0.1, "hip never reached limit: {angles:?}");
}

#[test]
fn a_fall_is_reported_once_and_reset_rearms_it() {
    let mut session = SessionCore::new(scenario_config()).unwrap();
    // Knock the rig over backwards.
    session.press(ControlKey::LeftCalf);
    for _ in 0..500 {
        session.tick();
    }

    assert!(session.fall_notifications() <= 1);
    assert_eq!(session.stats().falls(), session.fall_notifications());

    session.reset();
    assert!(!session.fallen());
}
