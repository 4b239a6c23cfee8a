//! Rig builder - places the biped's segments and wires its joints
//!
//! Everything is validated up front; the backend is only touched once the
//! whole rig is known to be buildable.

pub mod layout;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::error::{check_finite, check_positive};
use crate::core::RigError;
use crate::domain::joint::{AngleLimit, Joint, JointSpec};
use crate::domain::rig::{Rig, RigVariant};
use crate::domain::segment::{moment_for_box, CollisionCategory, Pose, Segment, SegmentKind};
use crate::systems::engine::{BodyHandle, BoxShape, DynamicBodyDesc, PhysicsBackend, StaticBodyDesc};

pub use layout::{SegmentPlan, ANKLE, HIP, KNEE, NECK};

/// Collision group shared by every rig part.
pub const RIG_GROUP: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigDimensions {
    /// Centre of the hip line.
    pub anchor: Vec2,
    pub width: f32,
    pub height: f32,
    /// Base mass; the torso weighs twice this, head and feet half.
    pub mass: f32,
    pub friction: f32,
    pub variant: RigVariant,
}

impl RigDimensions {
    pub fn new(anchor: Vec2, width: f32, height: f32, mass: f32) -> Self {
        Self {
            anchor,
            width,
            height,
            mass,
            friction: 0.3,
            variant: RigVariant::Full,
        }
    }

    pub fn validate(&self) -> Result<(), RigError> {
        check_finite("anchor", &[self.anchor.x, self.anchor.y])?;
        check_positive("width", self.width)?;
        check_positive("height", self.height)?;
        check_positive("mass", self.mass)?;
        check_finite("friction", &[self.friction])?;
        if self.friction < 0.0 {
            return Err(RigError::OutOfRange { name: "friction", value: self.friction });
        }
        Ok(())
    }
}

/// Static ground box: top face at `surface`, spanning `left..right`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundDimensions {
    pub surface: f32,
    /// Full thickness below the surface.
    pub depth: f32,
    pub left: f32,
    pub right: f32,
    pub friction: f32,
}

impl Default for GroundDimensions {
    fn default() -> Self {
        Self {
            surface: 11.0,
            depth: 20.0,
            left: -640.0,
            right: 1280.0,
            friction: 0.3,
        }
    }
}

impl GroundDimensions {
    pub fn centre(&self) -> Vec2 {
        Vec2::new((self.left + self.right) / 2.0, self.surface - self.depth / 2.0)
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new((self.right - self.left) / 2.0, self.depth / 2.0)
    }

    pub fn validate(&self) -> Result<(), RigError> {
        check_finite("ground", &[self.surface, self.left, self.right, self.friction])?;
        check_positive("ground.depth", self.depth)?;
        check_positive("ground.length", self.right - self.left)?;
        if self.friction < 0.0 {
            return Err(RigError::OutOfRange { name: "ground.friction", value: self.friction });
        }
        Ok(())
    }
}

pub fn build_ground<B: PhysicsBackend>(backend: &mut B, ground: &GroundDimensions) -> Result<BodyHandle, RigError> {
    ground.validate()?;
    let centre = ground.centre();
    let body = backend.add_static_body(&StaticBodyDesc {
        pose: Pose::new(centre.x, centre.y, 0.0),
        shape: BoxShape {
            half_extents: ground.half_extents(),
            friction: ground.friction,
            category: CollisionCategory::Ground,
            group: 0,
        },
    });
    Ok(body)
}

/// Build every segment and joint of `dims.variant` into `backend`.
///
/// On error nothing has been added to the backend.
pub fn build_rig<B: PhysicsBackend>(backend: &mut B, dims: &RigDimensions) -> Result<Rig, RigError> {
    dims.validate()?;
    let plans = layout::plan_segments(dims);
    let joint_specs = layout::plan_joints(dims);
    for spec in &joint_specs {
        spec.limit.validate(&spec.label())?;
    }

    let segments: Vec<Segment> = plans
        .iter()
        .map(|plan| place_segment(backend, plan, dims.friction))
        .collect();

    let joints = joint_specs
        .into_iter()
        .map(|spec| {
            let a = find(&segments, spec.a);
            let b = find(&segments, spec.b);
            connect(backend, a, b, spec.pivot, spec.limit)
        })
        .collect();

    let rig = Rig::new(dims.variant, segments, joints);
    info!(
        variant = ?dims.variant,
        segments = rig.segment_count(),
        joints = rig.joint_count(),
        "rig built at ({}, {})",
        dims.anchor.x,
        dims.anchor.y
    );
    Ok(rig)
}

fn find(segments: &[Segment], kind: SegmentKind) -> &Segment {
    segments
        .iter()
        .find(|s| s.kind() == kind)
        .unwrap_or_else(|| panic!("joint endpoint {} was not placed", kind.name()))
}

fn place_segment<B: PhysicsBackend>(backend: &mut B, plan: &SegmentPlan, friction: f32) -> Segment {
    // Start pose is recorded before any constraint or impulse touches the body.
    let start = Pose { position: plan.centre, angle: 0.0 };
    let body = backend.add_dynamic_body(&DynamicBodyDesc {
        mass: plan.mass,
        moment: moment_for_box(plan.mass, plan.half_extents * 2.0),
        pose: start,
        shape: BoxShape {
            half_extents: plan.half_extents,
            friction,
            category: plan.kind.category(),
            group: RIG_GROUP,
        },
    });
    Segment::new(plan.kind, body, plan.mass, plan.half_extents, start, RIG_GROUP)
}

/// Pin `a` and `b` at `pivot` (world coordinates) and bound their relative angle.
///
/// The two segments never collide with each other.
///
/// # Panics
/// If either segment's body is not in `backend`.
pub fn connect<B: PhysicsBackend>(
    backend: &mut B,
    a: &Segment,
    b: &Segment,
    pivot: Vec2,
    limit: AngleLimit,
) -> Joint {
    assert!(
        backend.contains_body(a.body()) && backend.contains_body(b.body()),
        "connect: {} or {} is not in the world",
        a.kind().name(),
        b.kind().name()
    );
    let spec = JointSpec::new(a.kind(), b.kind(), pivot, limit);
    let pivot_constraint = backend.add_pivot(a.body(), b.body(), pivot, spec.collide_connected);
    let limit_constraint = backend.add_rotation_limit(a.body(), b.body(), limit, spec.collide_connected);
    Joint::new(spec, pivot_constraint, limit_constraint)
}
