//! Systems - engine boundary, rig assembly, fall detection

pub mod engine;
pub mod fall;
pub mod rig_builder;

pub use engine::{PhysicsBackend, RapierBackend};
pub use fall::{FallDetector, FallEvent};
pub use rig_builder::{build_ground, build_rig, connect, GroundDimensions, RigDimensions};
