use particula_ragdoll::{SessionConfig, SessionCore};

#[test]
fn perf_smoke_step() {
    let mut config = SessionConfig::default();
    config.start_paused = false;
    let mut session = SessionCore::new(config).expect("default config is valid");

    for _ in 0..25 {
        session.tick();
    }
    let stats = session.stats();
    assert_eq!(stats.ticks(), 25);
    assert_eq!(stats.stepper_calls(), 25);
    assert_eq!(stats.substeps(), 250);
    assert!(stats.last_step_ms() >= 0.0);
    assert!((stats.sim_seconds() - 0.5).abs() < 1e-9);
}
