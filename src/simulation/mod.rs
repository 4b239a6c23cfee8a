//! Session - one ragdoll, its ground, controls and fall latch
//!
//! `SessionCore` owns the physics backend and every piece of mutable game
//! state. The operations live in the files mapped below; this file only
//! wires them together.

use crate::core::RigError;
use crate::domain::control::{ControlKey, ControlMapper, ControlState, InputAction};
use crate::domain::rig::Rig;
use crate::domain::segment::{Pose, SegmentKind, Velocity};
use crate::systems::engine::{BodyHandle, PhysicsBackend, RapierBackend};
use crate::systems::fall::FallDetector;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/config.rs"]
mod config;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/render_extract.rs"]
mod render_extract;
mod facade;

pub use config::{ControlConfig, FallConfig, RigConfig, SessionConfig, StepConfig};
pub use facade::Game;
pub use perf_stats::StepStats;
pub use render_extract::{Drawable, POSE_STRIDE};

use perf_timer::PerfTimer;

pub struct SessionCore<B: PhysicsBackend = RapierBackend> {
    backend: B,
    config: SessionConfig,
    rig: Rig,
    ground: BodyHandle,
    controls: ControlMapper,
    fall: FallDetector,
    paused: bool,
    quit: bool,
    /// Simulated seconds, accumulated in f64 so fixed steps add up exactly.
    sim_time: f64,
    stats: StepStats,
}

impl SessionCore<RapierBackend> {
    /// Build a session on a fresh rapier world.
    pub fn new(config: SessionConfig) -> Result<Self, RigError> {
        let backend = RapierBackend::new(config.gravity_vec(), config.damping);
        init::create_session(backend, config)
    }

    pub fn from_json(json: &str) -> Result<Self, RigError> {
        Self::new(SessionConfig::from_json(json)?)
    }
}

impl<B: PhysicsBackend> SessionCore<B> {
    /// Build a session on a caller-supplied backend. On error the backend is dropped untouched.
    pub fn with_backend(backend: B, config: SessionConfig) -> Result<Self, RigError> {
        init::create_session(backend, config)
    }

    pub fn config(&self) -> &SessionConfig { &self.config }

    pub fn rig(&self) -> &Rig { &self.rig }

    pub fn backend(&self) -> &B { &self.backend }

    pub fn ground(&self) -> BodyHandle { self.ground }

    pub fn paused(&self) -> bool { self.paused }

    pub fn should_quit(&self) -> bool { self.quit }

    pub fn sim_time(&self) -> f64 { self.sim_time }

    pub fn control_state(&self) -> ControlState { self.controls.state() }

    pub fn fallen(&self) -> bool { self.fall.fallen() }

    pub fn fall_notifications(&self) -> u32 { self.fall.notifications() }

    pub fn stats(&self) -> StepStats {
        self.stats.clone()
    }

    // === SETTINGS ===

    pub fn set_gravity(&mut self, x: f32, y: f32) -> Result<(), RigError> {
        settings::set_gravity(self, x, y)
    }

    pub fn set_damping(&mut self, damping: f32) -> Result<(), RigError> {
        settings::set_damping(self, damping)
    }

    pub fn set_paused(&mut self, paused: bool) {
        settings::set_paused(self, paused);
    }

    pub fn set_impulse(&mut self, impulse: f32) -> Result<(), RigError> {
        settings::set_impulse(self, impulse)
    }

    pub fn set_impulses_while_paused(&mut self, enabled: bool) {
        settings::set_impulses_while_paused(self, enabled);
    }

    // === INPUT ===

    /// Handle a raw key-down. Returns false for unmapped codes.
    pub fn key_down(&mut self, code: &str) -> bool {
        commands::key_down(self, code)
    }

    /// Handle a raw key-up. Returns false for unmapped codes.
    pub fn key_up(&mut self, code: &str) -> bool {
        commands::key_up(self, code)
    }

    pub fn apply(&mut self, action: InputAction) {
        commands::apply(self, action);
    }

    pub fn press(&mut self, key: ControlKey) {
        commands::press(self, key);
    }

    pub fn release(&mut self, key: ControlKey) {
        commands::release(self, key);
    }

    /// Restore every segment to its start pose with zero velocity and re-arm the fall latch.
    pub fn reset(&mut self) {
        commands::reset(self);
    }

    pub fn toggle_pause(&mut self) {
        commands::toggle_pause(self);
    }

    /// Exactly one stepper call regardless of pause; no control impulse.
    pub fn single_step(&mut self) {
        commands::single_step(self);
    }

    pub fn quit(&mut self) {
        commands::quit(self);
    }

    // === STEPPING ===

    /// One presentation frame: control impulse (unless paused), then one stepper call (unless paused).
    pub fn tick(&mut self) {
        step::tick(self);
    }

    /// Advance the world by the configured duration in equal substeps.
    pub fn step(&mut self) {
        step::step(self);
    }

    // === QUERIES ===

    pub fn pose(&self, kind: SegmentKind) -> Option<Pose> {
        let segment = self.rig.segment(kind)?;
        self.backend.pose(segment.body())
    }

    pub fn velocity(&self, kind: SegmentKind) -> Option<Velocity> {
        let segment = self.rig.segment(kind)?;
        self.backend.velocity(segment.body())
    }

    /// Current `angle(b) - angle(a)` of the joint linking `a` and `b`.
    pub fn joint_angle(&self, a: SegmentKind, b: SegmentKind) -> Option<f32> {
        let joint = self.rig.joint_between(a, b)?;
        let pose_a = self.pose(joint.a())?;
        let pose_b = self.pose(joint.b())?;
        Some(joint.relative_angle(&pose_a, &pose_b))
    }

    /// Drawables sorted back to front.
    pub fn draw_list(&self) -> Vec<Drawable> {
        render_extract::draw_list(self)
    }

    pub fn draw_list_json(&self) -> String {
        render_extract::draw_list_json(self)
    }

    /// Flat `[z, x, y, angle, half_w, half_h]` records, back to front.
    pub fn pose_buffer(&self) -> Vec<f32> {
        render_extract::pose_buffer(self)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
