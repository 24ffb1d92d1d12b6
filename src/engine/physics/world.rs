use rapier2d::prelude::*;
use std::collections::HashMap;

use super::collision::{CollisionEventQueue, ContactPhase};

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

/// A contact change between a watched collider and a tagged surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggedContact {
    pub tag: &'static str,
    pub phase: ContactPhase,
}

/// Physics world that manages all physics simulation
pub struct PhysicsWorld {
    /// Gravity vector (default: -9.81 m/s² in y-axis)
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Query pipeline kept in sync with the colliders
    query_pipeline: QueryPipeline,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,

    /// Collision event handler
    collision_event_queue: CollisionEventQueue,

    /// Surface tags of level colliders ("Ground", "Mount", ...)
    collider_tags: HashMap<ColliderHandle, &'static str>,

    /// Contact changes of the watched collider from the last step
    contacts: Vec<TaggedContact>,

    /// Collider whose contacts are reported (the player)
    watched: Option<ColliderHandle>,
}

impl PhysicsWorld {
    /// Create a new physics world with default settings
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, -9.81])
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        // Fixed timestep of 1/60 seconds (60 FPS)
        integration_parameters.dt = 1.0 / 60.0;

        Self {
            gravity,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            collision_event_queue: CollisionEventQueue::new(),
            collider_tags: HashMap::new(),
            contacts: Vec::new(),
            watched: None,
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.collision_event_queue,
        );

        self.contacts = self.collect_tagged_contacts();
    }

    /// Turn raw collider events into tag events for the watched collider
    fn collect_tagged_contacts(&self) -> Vec<TaggedContact> {
        let events = self.collision_event_queue.drain();
        let Some(watched) = self.watched else {
            return Vec::new();
        };

        events
            .into_iter()
            .filter_map(|event| {
                let other = event.other(watched)?;
                let tag = self.collider_tags.get(&other).copied()?;
                Some(TaggedContact {
                    tag,
                    phase: event.phase,
                })
            })
            .collect()
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Add a collider carrying a surface tag
    pub fn add_tagged_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
        tag: &'static str,
    ) -> ColliderHandle {
        let handle = self.add_collider(collider, parent_handle);
        self.collider_tags.insert(handle, tag);
        handle
    }

    /// Report contacts of `collider` with tagged colliders after each step
    pub fn watch_collider(&mut self, collider: ColliderHandle) {
        self.watched = Some(collider);
    }

    /// Contact changes of the watched collider produced by the last step
    pub fn tagged_contacts(&self) -> &[TaggedContact] {
        &self.contacts
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable reference to a rigid body
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::body::presets;

    /// Player capsule dropped just above a tagged floor
    fn drop_onto(tag: &'static str) -> (PhysicsWorld, RigidBodyHandle) {
        let mut world = PhysicsWorld::new();

        let floor = world.add_rigid_body(presets::static_body(0.0, 0.0));
        world.add_tagged_collider(presets::ground_collider(20.0, 1.0), floor, tag);

        let player = world.add_rigid_body(presets::player_body(0.0, 2.0));
        let collider = world.add_collider(presets::player_collider(1.0, 2.0), player);
        world.watch_collider(collider);

        (world, player)
    }

    #[test]
    fn test_falling_player_reports_ground_contact() {
        let (mut world, _) = drop_onto("Ground");

        let mut started = false;
        for _ in 0..120 {
            world.step();
            started |= world.tagged_contacts().contains(&TaggedContact {
                tag: "Ground",
                phase: ContactPhase::Started,
            });
        }
        assert!(started, "player never touched the floor");
    }

    #[test]
    fn test_player_comes_to_rest_on_floor() {
        let (mut world, player) = drop_onto("Ground");
        for _ in 0..180 {
            world.step();
        }

        let body = world.get_rigid_body(player).unwrap();
        assert!(body.linvel().y.abs() < 0.5);
        assert!(body.translation().y > 0.5);
    }

    #[test]
    fn test_untagged_contacts_are_not_reported() {
        let mut world = PhysicsWorld::new();
        let floor = world.add_rigid_body(presets::static_body(0.0, 0.0));
        world.add_collider(presets::ground_collider(20.0, 1.0), floor);

        let player = world.add_rigid_body(presets::player_body(0.0, 2.0));
        let collider = world.add_collider(presets::player_collider(1.0, 2.0), player);
        world.watch_collider(collider);

        for _ in 0..120 {
            world.step();
            assert!(world.tagged_contacts().is_empty());
        }
    }

    #[test]
    fn test_contact_carries_surface_tag() {
        let (mut world, _) = drop_onto("Mount");

        let mut tags = Vec::new();
        for _ in 0..120 {
            world.step();
            tags.extend(world.tagged_contacts().iter().map(|contact| contact.tag));
        }
        assert!(tags.contains(&"Mount"));
        assert!(!tags.contains(&"Ground"));
    }
}
