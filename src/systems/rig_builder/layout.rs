use std::f32::consts::PI;

use glam::Vec2;

use crate::domain::joint::{AngleLimit, JointSpec};
use crate::domain::segment::SegmentKind;

use super::RigDimensions;

/// Placement of one segment before its body exists.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentPlan {
    pub kind: SegmentKind,
    pub centre: Vec2,
    pub half_extents: Vec2,
    pub mass: f32,
}

pub const NECK: AngleLimit = AngleLimit { min: -PI / 10.0, max: PI / 10.0 };
pub const HIP: AngleLimit = AngleLimit { min: -PI * 3.0 / 4.0, max: PI / 2.0 };
pub const KNEE: AngleLimit = AngleLimit { min: -PI / 2.0, max: -PI / 10.0 };
pub const ANKLE: AngleLimit = AngleLimit { min: -PI / 10.0, max: PI / 10.0 };

/// Centre, full extents and mass for `kind`, anchored at the hip line centre.
pub fn plan_segment(kind: SegmentKind, dims: &RigDimensions) -> SegmentPlan {
    let (x, y) = (dims.anchor.x, dims.anchor.y);
    let (w, h, m) = (dims.width, dims.height, dims.mass);

    let (centre, size, mass) = match kind {
        SegmentKind::Torso => (Vec2::new(x, y + h * 3.0 / 8.0), Vec2::new(w, h * 3.0 / 4.0), m * 2.0),
        SegmentKind::Head => (Vec2::new(x, y + h * 7.0 / 8.0), Vec2::new(w / 2.0, h / 4.0), m / 2.0),
        SegmentKind::ThighLeft => (Vec2::new(x - w / 4.0, y - h / 4.0), Vec2::new(w / 2.0, h / 2.0), m),
        SegmentKind::ThighRight => (Vec2::new(x + w / 4.0, y - h / 4.0), Vec2::new(w / 2.0, h / 2.0), m),
        SegmentKind::CalfLeft => (Vec2::new(x - w / 4.0, y - h * 3.0 / 4.0), Vec2::new(w / 2.0, h / 2.0), m),
        SegmentKind::CalfRight => (Vec2::new(x + w / 4.0, y - h * 3.0 / 4.0), Vec2::new(w / 2.0, h / 2.0), m),
        SegmentKind::FootLeft => (
            Vec2::new(x - w / 4.0 + w / 8.0, y - h * 17.0 / 16.0),
            Vec2::new(w * 3.0 / 4.0, h / 8.0),
            m / 2.0,
        ),
        SegmentKind::FootRight => (
            Vec2::new(x + w / 4.0 + w / 8.0, y - h * 17.0 / 16.0),
            Vec2::new(w * 3.0 / 4.0, h / 8.0),
            m / 2.0,
        ),
    };

    SegmentPlan { kind, centre, half_extents: size / 2.0, mass }
}

pub fn plan_segments(dims: &RigDimensions) -> Vec<SegmentPlan> {
    dims.variant
        .segment_kinds()
        .iter()
        .map(|&kind| plan_segment(kind, dims))
        .collect()
}

/// Joint table, parent first. Joints whose child is not in the variant are skipped.
pub fn plan_joints(dims: &RigDimensions) -> Vec<JointSpec> {
    let (x, y) = (dims.anchor.x, dims.anchor.y);
    let (w, h) = (dims.width, dims.height);
    let (l, r) = (x - w / 4.0, x + w / 4.0);

    use SegmentKind::*;
    let table = [
        (Torso, Head, Vec2::new(x, y + h * 3.0 / 4.0), NECK),
        (Torso, ThighLeft, Vec2::new(l, y), HIP),
        (Torso, ThighRight, Vec2::new(r, y), HIP),
        (ThighLeft, CalfLeft, Vec2::new(l, y - h / 2.0), KNEE),
        (ThighRight, CalfRight, Vec2::new(r, y - h / 2.0), KNEE),
        (CalfLeft, FootLeft, Vec2::new(l, y - h), ANKLE),
        (CalfRight, FootRight, Vec2::new(r, y - h), ANKLE),
    ];

    table
        .into_iter()
        .filter(|(a, b, _, _)| dims.variant.includes(*a) && dims.variant.includes(*b))
        .map(|(a, b, pivot, limit)| JointSpec::new(a, b, pivot, limit))
        .collect()
}

/// Hip-line anchor that leaves the soles 10 units above `surface`.
pub fn default_anchor(centre_x: f32, surface: f32, height: f32) -> Vec2 {
    Vec2::new(centre_x, surface + height * 9.0 / 8.0 + 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rig::RigVariant;
    use approx::assert_relative_eq;

    fn dims() -> RigDimensions {
        RigDimensions::new(Vec2::new(340.0, 230.0), 100.0, 200.0, 20.0)
    }

    #[test]
    fn torso_sits_above_hip_line() {
        let plan = plan_segment(SegmentKind::Torso, &dims());
        assert_eq!(plan.centre, Vec2::new(340.0, 305.0));
        assert_eq!(plan.half_extents, Vec2::new(50.0, 75.0));
        assert_relative_eq!(plan.mass, 40.0);
    }

    #[test]
    fn feet_are_offset_forward() {
        let l = plan_segment(SegmentKind::FootLeft, &dims());
        let r = plan_segment(SegmentKind::FootRight, &dims());
        assert_relative_eq!(l.centre.x, 340.0 - 25.0 + 12.5);
        assert_relative_eq!(r.centre.x, 340.0 + 25.0 + 12.5);
        assert_relative_eq!(l.centre.y, 230.0 - 212.5);
        assert_relative_eq!(l.mass, 10.0);
    }

    #[test]
    fn pivots_lie_on_both_segments() {
        let d = dims();
        for spec in plan_joints(&d) {
            for kind in [spec.a, spec.b] {
                let plan = plan_segment(kind, &d);
                let offset = (spec.pivot - plan.centre).abs();
                assert!(
                    offset.x <= plan.half_extents.x + 1e-3 && offset.y <= plan.half_extents.y + 1e-3,
                    "{} pivot outside {}",
                    spec.label(),
                    kind.name()
                );
            }
        }
    }

    #[test]
    fn reduced_variant_keeps_tree_shape() {
        let mut d = dims();
        d.variant = RigVariant::Reduced;
        assert_eq!(plan_segments(&d).len(), 5);
        assert_eq!(plan_joints(&d).len(), 4);
        assert_eq!(plan_joints(&dims()).len(), 7);
    }

    #[test]
    fn default_anchor_clears_the_ground() {
        let mut d = dims();
        d.anchor = default_anchor(320.0, 11.0, 200.0);
        let foot = plan_segment(SegmentKind::FootLeft, &d);
        assert_relative_eq!(foot.centre.y - foot.half_extents.y, 21.0, epsilon = 1e-4);
    }

    #[test]
    fn knee_limit_only_allows_backward_bend() {
        assert!(KNEE.max < 0.0);
        assert!(KNEE.contains(-PI / 4.0, 0.0));
        assert!(!KNEE.contains(0.0, 0.0));
    }
}
