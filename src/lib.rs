//! Particula Ragdoll - articulated biped ragdoll in WASM
//!
//! Architecture:
//! - core/        - Errors and validation helpers
//! - domain/      - Segments, joints, rig, control state
//! - systems/     - Physics backend boundary, rig builder, fall detector
//! - simulation/  - Session orchestration and the wasm facade

pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the module
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"🦀 Particula Ragdoll initialized!".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::RigError;
pub use domain::{ControlKey, ControlState, InputAction, Pose, Rig, RigVariant, SegmentKind, Velocity};
pub use simulation::{Drawable, Game, SessionConfig, SessionCore, StepStats};
pub use systems::engine::{ContactDecision, PhysicsBackend, RapierBackend};
