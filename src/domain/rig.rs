//! Rig - the assembled biped (segments + joints)
//!
//! Joints always point parent -> child (`a` is the parent), so the torso is the
//! root and every other segment reaches it through exactly one chain.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::joint::Joint;
use super::segment::{Segment, SegmentKind};

/// Which body plan to build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RigVariant {
    /// Torso, head, thighs, calves, feet.
    #[default]
    Full,
    /// No head and no feet.
    Reduced,
}

impl RigVariant {
    pub fn segment_kinds(self) -> &'static [SegmentKind] {
        match self {
            RigVariant::Full => &SegmentKind::ALL,
            RigVariant::Reduced => &[
                SegmentKind::Torso,
                SegmentKind::ThighLeft,
                SegmentKind::ThighRight,
                SegmentKind::CalfLeft,
                SegmentKind::CalfRight,
            ],
        }
    }

    pub fn includes(self, kind: SegmentKind) -> bool {
        self.segment_kinds().contains(&kind)
    }
}

#[derive(Clone, Debug)]
pub struct Rig {
    variant: RigVariant,
    segments: Vec<Segment>,
    joints: Vec<Joint>,
}

impl Rig {
    pub(crate) fn new(variant: RigVariant, segments: Vec<Segment>, joints: Vec<Joint>) -> Self {
        Self { variant, segments, joints }
    }

    pub fn variant(&self) -> RigVariant { self.variant }

    pub fn segments(&self) -> &[Segment] { &self.segments }

    pub fn joints(&self) -> &[Joint] { &self.joints }

    pub fn segment_count(&self) -> usize { self.segments.len() }

    pub fn joint_count(&self) -> usize { self.joints.len() }

    pub fn segment(&self, kind: SegmentKind) -> Option<&Segment> {
        self.segments.iter().find(|s| s.kind() == kind)
    }

    /// Root of the joint tree.
    pub fn root(&self) -> SegmentKind {
        SegmentKind::Torso
    }

    pub fn joint_between(&self, a: SegmentKind, b: SegmentKind) -> Option<&Joint> {
        self.joints
            .iter()
            .find(|j| (j.a() == a && j.b() == b) || (j.a() == b && j.b() == a))
    }

    pub fn parent_of(&self, kind: SegmentKind) -> Option<SegmentKind> {
        self.joints.iter().find(|j| j.b() == kind).map(|j| j.a())
    }

    /// Segments from `kind` up to the root, inclusive. Empty if `kind` is not in the rig.
    pub fn chain_to_root(&self, kind: SegmentKind) -> Vec<SegmentKind> {
        if self.segment(kind).is_none() {
            return Vec::new();
        }
        let mut chain = vec![kind];
        let mut current = kind;
        while let Some(parent) = self.parent_of(current) {
            // A cycle would loop forever; bail out at the segment count.
            if chain.len() > self.segments.len() {
                break;
            }
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// True when the joints form a tree over the segments, rooted at the torso.
    pub fn is_tree(&self) -> bool {
        let kinds: HashSet<SegmentKind> = self.segments.iter().map(|s| s.kind()).collect();
        if kinds.len() != self.segments.len() || !kinds.contains(&self.root()) {
            return false;
        }
        if self.joints.len() + 1 != self.segments.len() {
            return false;
        }

        let mut adjacency: HashMap<SegmentKind, Vec<SegmentKind>> = HashMap::new();
        for joint in &self.joints {
            if !kinds.contains(&joint.a()) || !kinds.contains(&joint.b()) || joint.a() == joint.b() {
                return false;
            }
            adjacency.entry(joint.a()).or_default().push(joint.b());
            adjacency.entry(joint.b()).or_default().push(joint.a());
        }

        // n - 1 edges + connected => acyclic
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([self.root()]);
        seen.insert(self.root());
        while let Some(kind) = queue.pop_front() {
            for next in adjacency.get(&kind).into_iter().flatten() {
                if seen.insert(*next) {
                    queue.push_back(*next);
                }
            }
        }
        seen.len() == kinds.len()
    }
}
