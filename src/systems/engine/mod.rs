//! Physics engine boundary
//!
//! The rig, stepper and fall detector only talk to the solver through
//! [`PhysicsBackend`]. Handles are plain indices owned by the backend, so no
//! engine type leaks into the core.

mod events;
mod rapier;

use glam::Vec2;

use crate::domain::joint::AngleLimit;
use crate::domain::segment::{CollisionCategory, Pose, Velocity};

pub use rapier::RapierBackend;

/// Opaque reference to a body living inside a backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) u32);

/// Opaque reference to a constraint (pivot or rotation limit).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintHandle(pub(crate) u32);

/// Box collision shape attached to a body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxShape {
    pub half_extents: Vec2,
    pub friction: f32,
    pub category: CollisionCategory,
    /// Shapes sharing a non-zero group never collide with each other.
    pub group: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DynamicBodyDesc {
    pub mass: f32,
    pub moment: f32,
    pub pose: Pose,
    pub shape: BoxShape,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaticBodyDesc {
    pub pose: Pose,
    pub shape: BoxShape,
}

/// Answer of a begin-contact callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactDecision {
    /// Resolve the contact normally.
    Accept,
    /// Ignore the pair until the shapes separate.
    Reject,
}

impl ContactDecision {
    /// Boolean form expected by engines that take a bare accept flag.
    pub fn accepted(self) -> bool {
        matches!(self, ContactDecision::Accept)
    }
}

impl From<bool> for ContactDecision {
    fn from(accept: bool) -> Self {
        if accept {
            ContactDecision::Accept
        } else {
            ContactDecision::Reject
        }
    }
}

/// A contact that just began, ordered to match the registered category pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContactBegin {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    pub category_a: CollisionCategory,
    pub category_b: CollisionCategory,
}

pub type ContactCallback = Box<dyn FnMut(&ContactBegin) -> ContactDecision>;

/// Engine surface consumed by the core.
///
/// Calls are single-threaded and strictly ordered; `step` is one substep.
pub trait PhysicsBackend {
    fn add_dynamic_body(&mut self, desc: &DynamicBodyDesc) -> BodyHandle;

    fn add_static_body(&mut self, desc: &StaticBodyDesc) -> BodyHandle;

    fn contains_body(&self, body: BodyHandle) -> bool;

    /// Pin `a` and `b` together at `world_point` (current world coordinates).
    fn add_pivot(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
        world_point: Vec2,
        collide_connected: bool,
    ) -> ConstraintHandle;

    /// Bound `angle(b) - angle(a)` to `limit`.
    fn add_rotation_limit(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
        limit: AngleLimit,
        collide_connected: bool,
    ) -> ConstraintHandle;

    /// `impulse` and `local_point` are both in the body's local frame.
    fn apply_impulse_at_local_point(&mut self, body: BodyHandle, impulse: Vec2, local_point: Vec2);

    /// Call `callback` whenever a shape of category `a` starts touching one of category `b`.
    fn on_contact_begin(&mut self, a: CollisionCategory, b: CollisionCategory, callback: ContactCallback);

    /// Advance the world by `dt` seconds.
    fn step(&mut self, dt: f32);

    fn set_gravity(&mut self, gravity: Vec2);

    fn gravity(&self) -> Vec2;

    /// Fraction of velocity a body keeps after one second (1.0 = no damping).
    fn set_damping(&mut self, damping: f32);

    fn damping(&self) -> f32;

    fn pose(&self, body: BodyHandle) -> Option<Pose>;

    fn set_pose(&mut self, body: BodyHandle, pose: Pose);

    fn velocity(&self, body: BodyHandle) -> Option<Velocity>;

    fn set_velocity(&mut self, body: BodyHandle, velocity: Velocity);

    fn body_count(&self) -> usize;

    fn constraint_count(&self) -> usize;
}
