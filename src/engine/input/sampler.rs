// Held-key tracking and per-frame snapshots

use super::action::Action;
use super::config::InputConfig;
use crate::game::player::InputSnapshot;
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Turns keyboard events into the snapshot the player controller reads
#[derive(Debug, Default)]
pub struct InputSampler {
    /// Key bindings in use
    config: InputConfig,

    /// Bound keys currently held down
    held: HashSet<KeyCode>,
}

impl InputSampler {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            held: HashSet::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only process physical key presses
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return;
        };
        match event.state {
            ElementState::Pressed => self.press(key_code),
            ElementState::Released => self.release(key_code),
        }
    }

    /// Register a key press (repeats are harmless)
    pub(crate) fn press(&mut self, key: KeyCode) {
        if self.config.action_for(key).is_some() {
            self.held.insert(key);
        }
    }

    /// Register a key release
    pub(crate) fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    /// Forget every held key (e.g. when the window loses focus)
    pub fn reset(&mut self) {
        self.held.clear();
    }

    /// Check if any key bound to an action is held
    pub fn is_held(&self, action: Action) -> bool {
        self.config
            .keys_for(action)
            .iter()
            .any(|key| self.held.contains(key))
    }

    /// Horizontal axis: -1 left, 1 right, 0 for neither or both
    pub fn horizontal(&self) -> f32 {
        let mut horizontal = 0.0;
        if self.is_held(Action::MoveLeft) {
            horizontal -= 1.0;
        }
        if self.is_held(Action::MoveRight) {
            horizontal += 1.0;
        }
        horizontal
    }

    /// Build the snapshot for the current frame
    pub fn sample(&self) -> InputSnapshot {
        InputSnapshot {
            attack: self.is_held(Action::Attack),
            jump: self.is_held(Action::Jump),
            fireball: self.is_held(Action::Fireball),
            arrow: self.is_held(Action::Arrow),
            dance: self.is_held(Action::Dance),
            dash: self.is_held(Action::Dash),
            kick: self.is_held(Action::Kick),
            run: self.is_held(Action::Run),
            up: self.is_held(Action::Up),
            down: self.is_held(Action::Down),
            damage: self.is_held(Action::Damage),
            ..InputSnapshot::neutral()
        }
        .with_move(self.horizontal())
    }
}
