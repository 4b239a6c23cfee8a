//! Segment - one rigid part of the biped
//!
//! A segment references an opaque engine body and keeps the metadata the
//! core owns (kind, extents, start pose) on its own side of the boundary.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::systems::engine::BodyHandle;

/// Named body part. Identity never changes after the rig is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Torso,
    Head,
    ThighLeft,
    ThighRight,
    CalfLeft,
    CalfRight,
    FootLeft,
    FootRight,
}

impl SegmentKind {
    pub const ALL: [SegmentKind; 8] = [
        SegmentKind::Torso,
        SegmentKind::Head,
        SegmentKind::ThighLeft,
        SegmentKind::ThighRight,
        SegmentKind::CalfLeft,
        SegmentKind::CalfRight,
        SegmentKind::FootLeft,
        SegmentKind::FootRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SegmentKind::Torso => "torso",
            SegmentKind::Head => "head",
            SegmentKind::ThighLeft => "thigh_left",
            SegmentKind::ThighRight => "thigh_right",
            SegmentKind::CalfLeft => "calf_left",
            SegmentKind::CalfRight => "calf_right",
            SegmentKind::FootLeft => "foot_left",
            SegmentKind::FootRight => "foot_right",
        }
    }

    /// Sprite the presentation layer draws for this part.
    pub fn asset(self) -> &'static str {
        match self {
            SegmentKind::Torso => "torso.png",
            SegmentKind::Head => "head.png",
            SegmentKind::ThighLeft | SegmentKind::ThighRight => "thigh.png",
            SegmentKind::CalfLeft | SegmentKind::CalfRight => "calf.png",
            SegmentKind::FootLeft | SegmentKind::FootRight => "foot.png",
        }
    }

    /// Draw order, back to front: the right leg sits behind the torso,
    /// the left leg and head in front of it.
    pub fn z_order(self) -> i32 {
        match self {
            SegmentKind::ThighRight => 0,
            SegmentKind::CalfRight => 1,
            SegmentKind::FootRight => 2,
            SegmentKind::Torso => 3,
            SegmentKind::ThighLeft => 4,
            SegmentKind::CalfLeft => 5,
            SegmentKind::FootLeft => 6,
            SegmentKind::Head => 7,
        }
    }

    pub fn category(self) -> CollisionCategory {
        match self {
            SegmentKind::Torso | SegmentKind::Head => CollisionCategory::Trunk,
            _ => CollisionCategory::Limb,
        }
    }
}

/// Collision category used to route begin-contact callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionCategory {
    Ground,
    Trunk,
    Limb,
}

impl CollisionCategory {
    /// Numeric id stored in collider user data.
    pub fn id(self) -> u32 {
        match self {
            CollisionCategory::Ground => 100,
            CollisionCategory::Trunk => 1,
            CollisionCategory::Limb => 2,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            100 => Some(CollisionCategory::Ground),
            1 => Some(CollisionCategory::Trunk),
            2 => Some(CollisionCategory::Limb),
            _ => None,
        }
    }
}

/// Position (centre of mass) and orientation in radians, CCW positive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec2,
    pub angle: f32,
}

impl Pose {
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self { position: Vec2::new(x, y), angle }
    }

    /// Transform a body-local point to world coordinates.
    #[inline]
    pub fn local_to_world(&self, local: Vec2) -> Vec2 {
        self.position + Vec2::from_angle(self.angle).rotate(local)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    pub linear: Vec2,
    pub angular: f32,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { linear: Vec2::ZERO, angular: 0.0 };
}

/// Moment of inertia of a solid box about its centre: `m (w² + h²) / 12`.
pub fn moment_for_box(mass: f32, size: Vec2) -> f32 {
    mass * (size.x * size.x + size.y * size.y) / 12.0
}

/// One rigid part of the rig.
#[derive(Clone, Debug)]
pub struct Segment {
    kind: SegmentKind,
    body: BodyHandle,
    mass: f32,
    moment: f32,
    half_extents: Vec2,
    start: Pose,
    category: CollisionCategory,
    group: u32,
}

impl Segment {
    pub(crate) fn new(
        kind: SegmentKind,
        body: BodyHandle,
        mass: f32,
        half_extents: Vec2,
        start: Pose,
        group: u32,
    ) -> Self {
        Self {
            kind,
            body,
            mass,
            moment: moment_for_box(mass, half_extents * 2.0),
            half_extents,
            start,
            category: kind.category(),
            group,
        }
    }

    pub fn kind(&self) -> SegmentKind { self.kind }

    pub fn body(&self) -> BodyHandle { self.body }

    pub fn mass(&self) -> f32 { self.mass }

    pub fn moment(&self) -> f32 { self.moment }

    pub fn half_width(&self) -> f32 { self.half_extents.x }

    pub fn half_height(&self) -> f32 { self.half_extents.y }

    pub fn half_extents(&self) -> Vec2 { self.half_extents }

    /// Pose recorded at placement; the only value `reset` restores.
    pub fn start_pose(&self) -> Pose { self.start }

    pub fn category(&self) -> CollisionCategory { self.category }

    pub fn group(&self) -> u32 { self.group }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn box_moment_matches_closed_form() {
        // 40 kg, 100 x 150 box
        let m = moment_for_box(40.0, Vec2::new(100.0, 150.0));
        assert_relative_eq!(m, 40.0 * (10_000.0 + 22_500.0) / 12.0);
    }

    #[test]
    fn z_orders_are_unique() {
        let mut z: Vec<i32> = SegmentKind::ALL.iter().map(|k| k.z_order()).collect();
        z.sort_unstable();
        z.dedup();
        assert_eq!(z.len(), SegmentKind::ALL.len());
    }

    #[test]
    fn category_ids_round_trip() {
        for c in [CollisionCategory::Ground, CollisionCategory::Trunk, CollisionCategory::Limb] {
            assert_eq!(CollisionCategory::from_id(c.id()), Some(c));
        }
        assert_eq!(CollisionCategory::from_id(7), None);
    }

    #[test]
    fn local_to_world_rotates_then_translates() {
        let pose = Pose::new(10.0, 20.0, std::f32::consts::FRAC_PI_2);
        let p = pose.local_to_world(Vec2::new(1.0, 0.0));
        assert_relative_eq!(p.x, 10.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 21.0, epsilon = 1e-5);
    }
}
