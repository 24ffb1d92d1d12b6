// Keyboard input for the player controller
//
// - `action`: Player actions and default key bindings
// - `config`: Rebindable key-to-action map
// - `sampler`: Tracks held keys and turns them into per-frame snapshots
//
// ## Usage Example
//
// ```rust
// use engine::input::InputSampler;
//
// let mut sampler = InputSampler::default();
//
// // In your event loop, process keyboard events
// sampler.process_keyboard_event(&key_event);
//
// // Once per fixed update, hand a snapshot to the controller
// let snapshot = sampler.sample();
// ```

pub mod action;
pub mod config;
pub mod sampler;

// Re-export commonly used types
pub use action::Action;
pub use config::InputConfig;
pub use sampler::InputSampler;
