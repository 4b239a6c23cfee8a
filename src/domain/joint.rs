use std::f32::consts::{PI, TAU};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::RigError;
use crate::systems::engine::ConstraintHandle;

use super::segment::{Pose, SegmentKind};

/// Allowed range of `angle(b) - angle(a)`, radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AngleLimit {
    pub min: f32,
    pub max: f32,
}

impl AngleLimit {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, angle: f32, tolerance: f32) -> bool {
        angle >= self.min - tolerance && angle <= self.max + tolerance
    }

    pub(crate) fn validate(&self, label: &str) -> Result<(), RigError> {
        if self.min.is_finite() && self.max.is_finite() && self.min <= self.max {
            Ok(())
        } else {
            Err(RigError::InvalidLimit {
                joint: label.to_string(),
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Wrap an angle into `(-PI, PI]`.
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let mut a = angle % TAU;
    if a <= -PI {
        a += TAU;
    } else if a > PI {
        a -= TAU;
    }
    a
}

/// A joint before it is committed to the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JointSpec {
    pub a: SegmentKind,
    pub b: SegmentKind,
    /// Shared pivot in world coordinates at build time.
    pub pivot: Vec2,
    pub limit: AngleLimit,
    pub collide_connected: bool,
}

impl JointSpec {
    pub fn new(a: SegmentKind, b: SegmentKind, pivot: Vec2, limit: AngleLimit) -> Self {
        Self { a, b, pivot, limit, collide_connected: false }
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.a.name(), self.b.name())
    }
}

/// Pivot + rotation limit linking two segments. Fixed for the rig's lifetime.
#[derive(Clone, Debug)]
pub struct Joint {
    spec: JointSpec,
    pivot_constraint: ConstraintHandle,
    limit_constraint: ConstraintHandle,
}

impl Joint {
    pub(crate) fn new(
        spec: JointSpec,
        pivot_constraint: ConstraintHandle,
        limit_constraint: ConstraintHandle,
    ) -> Self {
        Self { spec, pivot_constraint, limit_constraint }
    }

    pub fn a(&self) -> SegmentKind { self.spec.a }

    pub fn b(&self) -> SegmentKind { self.spec.b }

    pub fn pivot(&self) -> Vec2 { self.spec.pivot }

    pub fn limit(&self) -> AngleLimit { self.spec.limit }

    pub fn collide_connected(&self) -> bool { self.spec.collide_connected }

    pub fn pivot_constraint(&self) -> ConstraintHandle { self.pivot_constraint }

    pub fn limit_constraint(&self) -> ConstraintHandle { self.limit_constraint }

    pub fn label(&self) -> String { self.spec.label() }

    /// Relative angle the limit bounds, wrapped into `(-PI, PI]`.
    pub fn relative_angle(&self, pose_a: &Pose, pose_b: &Pose) -> f32 {
        wrap_angle(pose_b.angle - pose_a.angle)
    }
}
