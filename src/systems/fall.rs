//! Fall detector - latched ground contact on disallowed body parts
//!
//! The first begin-contact between the ground and a disallowed category raises
//! one notification; further contacts are ignored until `clear()`. Contacts are
//! always accepted, so a fall never stops the simulation.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;

use crate::domain::segment::CollisionCategory;
use crate::systems::engine::{BodyHandle, ContactDecision, PhysicsBackend};

/// The contact that triggered a fall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FallEvent {
    pub body: BodyHandle,
    pub category: CollisionCategory,
}

#[derive(Debug, Default)]
struct FallLatch {
    fallen: bool,
    notifications: u32,
    pending: Option<FallEvent>,
}

#[derive(Clone, Debug)]
pub struct FallDetector {
    latch: Rc<RefCell<FallLatch>>,
    disallowed: Vec<CollisionCategory>,
}

impl FallDetector {
    /// Register ground observers for every category in `disallowed`.
    pub fn install<B: PhysicsBackend>(backend: &mut B, disallowed: &[CollisionCategory]) -> Self {
        let latch = Rc::new(RefCell::new(FallLatch::default()));

        for &category in disallowed {
            let latch = Rc::clone(&latch);
            backend.on_contact_begin(
                CollisionCategory::Ground,
                category,
                Box::new(move |contact| {
                    let mut l = latch.borrow_mut();
                    if !l.fallen {
                        l.fallen = true;
                        l.notifications += 1;
                        l.pending = Some(FallEvent { body: contact.body_b, category: contact.category_b });
                        warn!(?category, body = contact.body_b.0, "hit ground!");
                    }
                    ContactDecision::Accept
                }),
            );
        }

        Self { latch, disallowed: disallowed.to_vec() }
    }

    pub fn fallen(&self) -> bool {
        self.latch.borrow().fallen
    }

    /// Total notifications raised since install.
    pub fn notifications(&self) -> u32 {
        self.latch.borrow().notifications
    }

    /// The fall raised since the last call, if any.
    pub fn take_event(&self) -> Option<FallEvent> {
        self.latch.borrow_mut().pending.take()
    }

    pub fn disallowed(&self) -> &[CollisionCategory] {
        &self.disallowed
    }

    /// Re-arm the latch.
    pub fn clear(&self) {
        let mut l = self.latch.borrow_mut();
        l.fallen = false;
        l.pending = None;
    }
}
