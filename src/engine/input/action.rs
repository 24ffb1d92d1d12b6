// Player actions and their default keyboard bindings

use winit::keyboard::KeyCode;

/// Every input the player controller reads from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Horizontal axis
    MoveLeft,
    MoveRight,

    // Movement modifiers
    Jump,
    Run,
    Dash,
    Up,
    Down,

    // Combat and abilities
    Attack,
    Kick,
    Fireball,
    Arrow,
    Dance,

    // Debug knockdown trigger
    Damage,
}

impl Action {
    pub const ALL: [Action; 13] = [
        Self::MoveLeft,
        Self::MoveRight,
        Self::Jump,
        Self::Run,
        Self::Dash,
        Self::Up,
        Self::Down,
        Self::Attack,
        Self::Kick,
        Self::Fireball,
        Self::Arrow,
        Self::Dance,
        Self::Damage,
    ];
}

/// Default keyboard layout for the player
pub fn default_bindings() -> Vec<(KeyCode, Action)> {
    vec![
        // Horizontal axis (A/D and arrows)
        (KeyCode::KeyA, Action::MoveLeft),
        (KeyCode::ArrowLeft, Action::MoveLeft),
        (KeyCode::KeyD, Action::MoveRight),
        (KeyCode::ArrowRight, Action::MoveRight),
        // Movement
        (KeyCode::Space, Action::Jump),
        (KeyCode::ShiftLeft, Action::Run),
        (KeyCode::ShiftRight, Action::Run),
        (KeyCode::ControlLeft, Action::Dash),
        (KeyCode::ControlRight, Action::Dash),
        (KeyCode::KeyW, Action::Up),
        (KeyCode::KeyS, Action::Down),
        // Combat
        (KeyCode::KeyJ, Action::Attack),
        (KeyCode::KeyH, Action::Kick),
        (KeyCode::KeyK, Action::Fireball),
        (KeyCode::KeyL, Action::Arrow),
        (KeyCode::KeyB, Action::Dance),
        // Debug
        (KeyCode::Backspace, Action::Damage),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_action_has_a_default_key() {
        let bound: HashSet<_> = default_bindings().into_iter().map(|(_, a)| a).collect();
        for action in Action::ALL {
            assert!(bound.contains(&action), "{:?} has no default key", action);
        }
    }

    #[test]
    fn test_no_duplicate_keys() {
        let mut seen = HashSet::new();
        for (key, _) in default_bindings() {
            assert!(seen.insert(key), "Duplicate key {:?} in default bindings", key);
        }
    }

    #[test]
    fn test_both_shift_keys_run() {
        let bindings = default_bindings();
        assert!(bindings.contains(&(KeyCode::ShiftLeft, Action::Run)));
        assert!(bindings.contains(&(KeyCode::ShiftRight, Action::Run)));
    }
}
