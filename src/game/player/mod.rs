// Player character
//
// This module contains the player-character controller and its seams:
// - Per-frame input snapshot consumed by the controller
// - Character states and the finite-state machine that drives them
// - Motion (horizontal velocity, facing, impulses) over a physics body
// - Animation clips and the animator contract
// - Collision flags fed by tagged surface contacts
// - Dash cooldown timing and tunable configuration

pub mod animation;
pub mod collision;
pub mod config;
pub mod controller;
pub mod cooldown;
pub mod input;
pub mod motion;
pub mod state;

// Re-export commonly used types
pub use animation::{AnimationClip, AnimationError, AnimationPlayer, Animator, Clip};
pub use collision::{CollisionListener, SurfaceTag};
pub use config::{ConfigError, ControllerConfig};
pub use controller::PlayerController;
pub use cooldown::DashCooldown;
pub use input::InputSnapshot;
pub use motion::{Facing, MotionController, PhysicsBody};
pub use state::PlayerState;
