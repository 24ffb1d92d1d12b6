// Per-frame input snapshot consumed by the player controller

/// Immutable record of the player's input for a single frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    pub attack: bool,
    pub jump: bool,
    pub fireball: bool,
    pub arrow: bool,
    pub dance: bool,
    pub dash: bool,
    pub kick: bool,
    pub run: bool,
    pub up: bool,
    pub down: bool,
    /// Horizontal axis in [-1, 1]
    pub move_x: f32,
    /// Debug trigger that knocks the character down
    pub damage: bool,
}

impl InputSnapshot {
    /// Snapshot with no buttons held and a centered axis
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Set the horizontal axis, clamped to [-1, 1]
    pub fn with_move(mut self, move_x: f32) -> Self {
        self.move_x = if move_x.is_nan() {
            0.0
        } else {
            move_x.clamp(-1.0, 1.0)
        };
        self
    }

    /// Check if there is any horizontal input this frame
    pub fn is_moving(&self) -> bool {
        self.move_x != 0.0
    }

    /// Check if any of the melee triggers is held
    pub fn wants_attack(&self) -> bool {
        self.attack || self.up || self.down
    }
}
