use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use rapier2d::parry::bounding_volume::BoundingVolume;
use rapier2d::prelude::*;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Collects `Started` collision events during a pipeline step (no crossbeam,
/// so it stays usable on wasm).
pub(super) struct StartedContacts {
    started: Mutex<Vec<CollisionEvent>>,
}

impl StartedContacts {
    pub(super) fn new() -> Self {
        Self { started: Mutex::new(Vec::new()) }
    }

    pub(super) fn drain(&self) -> Vec<CollisionEvent> {
        std::mem::take(&mut *lock(&self.started))
    }
}

impl EventHandler for StartedContacts {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        if event.started() {
            lock(&self.started).push(event);
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

/// Pairs a contact callback rejected; they get no solver contacts until
/// their bounding boxes separate.
pub(super) struct RejectedPairs {
    pairs: Mutex<HashSet<(ColliderHandle, ColliderHandle)>>,
}

impl RejectedPairs {
    pub(super) fn new() -> Self {
        Self { pairs: Mutex::new(HashSet::new()) }
    }

    pub(super) fn reject(&self, a: ColliderHandle, b: ColliderHandle) {
        lock(&self.pairs).insert(ordered(a, b));
    }

    pub(super) fn is_rejected(&self, a: ColliderHandle, b: ColliderHandle) -> bool {
        lock(&self.pairs).contains(&ordered(a, b))
    }

    /// Forget pairs whose shapes no longer overlap.
    pub(super) fn prune(&self, colliders: &ColliderSet) {
        let mut pairs = lock(&self.pairs);
        if pairs.is_empty() {
            return;
        }
        pairs.retain(|(a, b)| match (colliders.get(*a), colliders.get(*b)) {
            (Some(ca), Some(cb)) => ca.compute_aabb().intersects(&cb.compute_aabb()),
            _ => false,
        });
    }
}

impl PhysicsHooks for RejectedPairs {
    fn filter_contact_pair(&self, context: &PairFilterContext) -> Option<SolverFlags> {
        if self.is_rejected(context.collider1, context.collider2) {
            None
        } else {
            Some(SolverFlags::COMPUTE_IMPULSES)
        }
    }
}

fn ordered(a: ColliderHandle, b: ColliderHandle) -> (ColliderHandle, ColliderHandle) {
    if a.into_raw_parts() <= b.into_raw_parts() {
        (a, b)
    } else {
        (b, a)
    }
}
