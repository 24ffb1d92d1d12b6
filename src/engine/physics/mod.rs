// Physics system using rapier2d

pub mod body;
mod collision;
mod world;

pub use body::{presets, ColliderHandle, RigidBodyHandle};
pub use collision::{CollisionGroups, ContactPhase};
pub use world::{PhysicsWorld, TaggedContact};
