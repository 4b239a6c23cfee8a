//! rapier2d adapter
//!
//! Damping is stored as a per-second keep fraction and converted to rapier's
//! damping coefficient (`-ln(d)`), so `0.99` keeps 99% of velocity per second.

use glam::Vec2;
use rapier2d::prelude::*;
use tracing::debug;

use super::events::{RejectedPairs, StartedContacts};
use super::{
    BodyHandle, BoxShape, ContactBegin, ContactCallback, ContactDecision, ConstraintHandle,
    DynamicBodyDesc, PhysicsBackend, StaticBodyDesc,
};
use crate::domain::joint::AngleLimit;
use crate::domain::segment::{CollisionCategory, Pose, Velocity};

struct ContactHandler {
    a: CollisionCategory,
    b: CollisionCategory,
    callback: ContactCallback,
}

pub struct RapierBackend {
    gravity: Vec2,
    damping: f32,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    started: StartedContacts,
    rejected: RejectedPairs,
    handlers: Vec<ContactHandler>,
    body_handles: Vec<RigidBodyHandle>,
    joint_handles: Vec<ImpulseJointHandle>,
}

impl RapierBackend {
    pub fn new(gravity: Vec2, damping: f32) -> Self {
        Self {
            gravity,
            damping,
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            started: StartedContacts::new(),
            rejected: RejectedPairs::new(),
            handlers: Vec::new(),
            body_handles: Vec::new(),
            joint_handles: Vec::new(),
        }
    }

    fn damping_coefficient(&self) -> f32 {
        -self.damping.clamp(f32::MIN_POSITIVE, 1.0).ln()
    }

    fn handle(&self, body: BodyHandle) -> Option<RigidBodyHandle> {
        self.body_handles.get(body.0 as usize).copied()
    }

    fn rigid_body(&self, body: BodyHandle) -> Option<&RigidBody> {
        self.handle(body).and_then(|h| self.bodies.get(h))
    }

    fn rigid_body_mut(&mut self, body: BodyHandle) -> Option<&mut RigidBody> {
        let handle = self.handle(body)?;
        self.bodies.get_mut(handle)
    }

    fn collider_for(shape: &BoxShape, body: BodyHandle) -> Collider {
        ColliderBuilder::cuboid(shape.half_extents.x, shape.half_extents.y)
            .density(0.0)
            .friction(shape.friction)
            .friction_combine_rule(CoefficientCombineRule::Multiply)
            .collision_groups(interaction_groups(shape.group))
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .active_hooks(ActiveHooks::FILTER_CONTACT_PAIRS)
            .user_data(encode_tag(body, shape.category))
            .build()
    }

    fn insert_body(&mut self, rb: RigidBody, shape: &BoxShape) -> BodyHandle {
        let body = BodyHandle(self.body_handles.len() as u32);
        let handle = self.bodies.insert(rb);
        self.colliders
            .insert_with_parent(Self::collider_for(shape, body), handle, &mut self.bodies);
        // Mass is otherwise only refreshed inside the next pipeline step.
        if let Some(rb) = self.bodies.get_mut(handle) {
            rb.recompute_mass_properties_from_colliders(&self.colliders);
        }
        self.body_handles.push(handle);
        body
    }

    fn insert_joint(&mut self, a: BodyHandle, b: BodyHandle, joint: GenericJoint) -> ConstraintHandle {
        let id = ConstraintHandle(self.joint_handles.len() as u32);
        match (self.handle(a), self.handle(b)) {
            (Some(ha), Some(hb)) => {
                let handle = self.impulse_joints.insert(ha, hb, joint, true);
                self.joint_handles.push(handle);
            }
            _ => debug!(?a, ?b, "joint between unknown bodies ignored"),
        }
        id
    }

    fn tag(&self, collider: ColliderHandle) -> Option<(BodyHandle, CollisionCategory)> {
        self.colliders.get(collider).and_then(|c| decode_tag(c.user_data))
    }

    /// Route this step's begin events to the registered callbacks.
    fn dispatch_contacts(&mut self) {
        for event in self.started.drain() {
            let CollisionEvent::Started(h1, h2, _) = event else {
                continue;
            };
            let (Some(t1), Some(t2)) = (self.tag(h1), self.tag(h2)) else {
                continue;
            };

            for handler in self.handlers.iter_mut() {
                let begin = if (handler.a, handler.b) == (t1.1, t2.1) {
                    ContactBegin { body_a: t1.0, body_b: t2.0, category_a: t1.1, category_b: t2.1 }
                } else if (handler.a, handler.b) == (t2.1, t1.1) {
                    ContactBegin { body_a: t2.0, body_b: t1.0, category_a: t2.1, category_b: t1.1 }
                } else {
                    continue;
                };
                if (handler.callback)(&begin) == ContactDecision::Reject {
                    self.rejected.reject(h1, h2);
                }
            }
        }
    }
}

impl Default for RapierBackend {
    fn default() -> Self {
        Self::new(Vec2::new(0.0, -9820.0), 0.99)
    }
}

impl PhysicsBackend for RapierBackend {
    fn add_dynamic_body(&mut self, desc: &DynamicBodyDesc) -> BodyHandle {
        let c = self.damping_coefficient();
        let rb = RigidBodyBuilder::dynamic()
            .translation(vector![desc.pose.position.x, desc.pose.position.y])
            .rotation(desc.pose.angle)
            .additional_mass_properties(MassProperties::new(point![0.0, 0.0], desc.mass, desc.moment))
            .linear_damping(c)
            .angular_damping(c)
            .build();
        self.insert_body(rb, &desc.shape)
    }

    fn add_static_body(&mut self, desc: &StaticBodyDesc) -> BodyHandle {
        let rb = RigidBodyBuilder::fixed()
            .translation(vector![desc.pose.position.x, desc.pose.position.y])
            .rotation(desc.pose.angle)
            .build();
        self.insert_body(rb, &desc.shape)
    }

    fn contains_body(&self, body: BodyHandle) -> bool {
        self.handle(body).is_some_and(|h| self.bodies.contains(h))
    }

    fn add_pivot(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
        world_point: Vec2,
        collide_connected: bool,
    ) -> ConstraintHandle {
        let p = point![world_point.x, world_point.y];
        let anchor = |body: BodyHandle| {
            self.rigid_body(body)
                .map(|rb| rb.position().inverse_transform_point(&p))
                .unwrap_or(p)
        };
        let (anchor_a, anchor_b) = (anchor(a), anchor(b));
        let joint = RevoluteJointBuilder::new()
            .local_anchor1(anchor_a)
            .local_anchor2(anchor_b)
            .contacts_enabled(collide_connected)
            .build();
        self.insert_joint(a, b, joint.into())
    }

    fn add_rotation_limit(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
        limit: AngleLimit,
        collide_connected: bool,
    ) -> ConstraintHandle {
        let joint = GenericJointBuilder::new(JointAxesMask::empty())
            .limits(JointAxis::AngX, [limit.min, limit.max])
            .contacts_enabled(collide_connected)
            .build();
        self.insert_joint(a, b, joint)
    }

    fn apply_impulse_at_local_point(&mut self, body: BodyHandle, impulse: Vec2, local_point: Vec2) {
        if let Some(rb) = self.rigid_body_mut(body) {
            let iso = *rb.position();
            let world_impulse = iso.rotation * vector![impulse.x, impulse.y];
            let world_point = iso * point![local_point.x, local_point.y];
            rb.apply_impulse_at_point(world_impulse, world_point, true);
        }
    }

    fn on_contact_begin(&mut self, a: CollisionCategory, b: CollisionCategory, callback: ContactCallback) {
        self.handlers.push(ContactHandler { a, b, callback });
    }

    fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        let gravity = vector![self.gravity.x, self.gravity.y];
        self.physics_pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &self.rejected,
            &self.started,
        );
        self.dispatch_contacts();
        self.rejected.prune(&self.colliders);
    }

    fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    fn gravity(&self) -> Vec2 {
        self.gravity
    }

    fn set_damping(&mut self, damping: f32) {
        self.damping = damping;
        let c = self.damping_coefficient();
        for handle in &self.body_handles {
            if let Some(rb) = self.bodies.get_mut(*handle) {
                rb.set_linear_damping(c);
                rb.set_angular_damping(c);
            }
        }
    }

    fn damping(&self) -> f32 {
        self.damping
    }

    fn pose(&self, body: BodyHandle) -> Option<Pose> {
        self.rigid_body(body).map(|rb| {
            let t = rb.translation();
            Pose::new(t.x, t.y, rb.rotation().angle())
        })
    }

    fn set_pose(&mut self, body: BodyHandle, pose: Pose) {
        if let Some(rb) = self.rigid_body_mut(body) {
            rb.set_position(
                Isometry::new(vector![pose.position.x, pose.position.y], pose.angle),
                true,
            );
        }
    }

    fn velocity(&self, body: BodyHandle) -> Option<Velocity> {
        self.rigid_body(body).map(|rb| {
            let v = rb.linvel();
            Velocity { linear: Vec2::new(v.x, v.y), angular: rb.angvel() }
        })
    }

    fn set_velocity(&mut self, body: BodyHandle, velocity: Velocity) {
        if let Some(rb) = self.rigid_body_mut(body) {
            rb.set_linvel(vector![velocity.linear.x, velocity.linear.y], true);
            rb.set_angvel(velocity.angular, true);
        }
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn constraint_count(&self) -> usize {
        self.impulse_joints.len()
    }
}

/// Group 0 collides with everything; group `g` (1..=31) skips its own members.
fn interaction_groups(group: u32) -> InteractionGroups {
    if group == 0 || group > 31 {
        return InteractionGroups::new(Group::GROUP_32, Group::ALL);
    }
    let bit = 1u32 << (group - 1);
    InteractionGroups::new(Group::from_bits_truncate(bit), Group::from_bits_truncate(!bit))
}

fn encode_tag(body: BodyHandle, category: CollisionCategory) -> u128 {
    ((body.0 as u128) << 32) | category.id() as u128
}

fn decode_tag(data: u128) -> Option<(BodyHandle, CollisionCategory)> {
    let category = CollisionCategory::from_id((data & 0xffff_ffff) as u32)?;
    Some((BodyHandle((data >> 32) as u32), category))
}
