use log::warn;
use rapier2d::prelude::*;
use std::sync::{Mutex, MutexGuard};

/// Collision groups for filtering what objects can collide with each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Default group - interacts with everything
    Default = 0b0000_0001,

    /// The player character
    Player = 0b0000_0010,

    /// Floors and platforms
    Ground = 0b0000_0100,

    /// Rideable entities
    Mount = 0b0000_1000,
}

impl CollisionGroups {
    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            // The player stands on ground and rides mounts
            CollisionGroups::Player => Group::from_bits_truncate(
                CollisionGroups::Ground as u32
                    | CollisionGroups::Mount as u32
                    | CollisionGroups::Default as u32,
            ),

            // Level geometry only needs to stop moving things
            CollisionGroups::Ground | CollisionGroups::Mount => Group::from_bits_truncate(
                CollisionGroups::Player as u32 | CollisionGroups::Default as u32,
            ),

            CollisionGroups::Default => Group::ALL,
        };

        InteractionGroups::new(memberships, filter)
    }
}

/// Whether a contact began or ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPhase {
    Started,
    Stopped,
}

/// Contact change between two colliders, recorded during a physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    pub collider1: ColliderHandle,
    pub collider2: ColliderHandle,
    pub phase: ContactPhase,
}

impl CollisionEvent {
    /// The collider on the other side of the contact, if `collider` takes part in it
    pub fn other(&self, collider: ColliderHandle) -> Option<ColliderHandle> {
        if self.collider1 == collider {
            Some(self.collider2)
        } else if self.collider2 == collider {
            Some(self.collider1)
        } else {
            None
        }
    }
}

/// Collects contact changes while rapier steps the world
#[derive(Debug, Default)]
pub struct CollisionEventQueue {
    events: Mutex<Vec<CollisionEvent>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every event recorded since the last drain
    pub fn drain(&self) -> Vec<CollisionEvent> {
        std::mem::take(&mut *self.events())
    }

    fn push(&self, event: CollisionEvent) {
        self.events().push(event);
    }

    /// Lock the event list; a panic elsewhere cannot leave a `Vec` half-updated
    fn events(&self) -> MutexGuard<'_, Vec<CollisionEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| {
            warn!("Collision event queue was poisoned, recovering its events");
            poisoned.into_inner()
        })
    }
}

impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        let (collider1, collider2, phase) = match event {
            rapier2d::prelude::CollisionEvent::Started(h1, h2, _) => (h1, h2, ContactPhase::Started),
            rapier2d::prelude::CollisionEvent::Stopped(h1, h2, _) => (h1, h2, ContactPhase::Stopped),
        };
        self.push(CollisionEvent {
            collider1,
            collider2,
            phase,
        });
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
