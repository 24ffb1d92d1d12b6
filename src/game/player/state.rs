// Player character states

/// Represents the current behavior state of the player character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerState {
    /// Standing still (on foot or mounted)
    #[default]
    Idle,
    /// Shooting an arrow
    Arrow,
    /// Dancing emote
    Dance,
    /// Air dash or ground roll
    Dash,
    /// Melee attack (sub-clip chosen on entry)
    Attack,
    /// Airborne and moving downward, or landing
    Fall,
    /// Casting a fireball
    Fireball,
    /// Rising after a jump
    Jump,
    /// Kick attack
    Kick,
    /// Knocked down, recovers to Idle
    Lay,
    /// Walking or running on the ground
    Move,
}

impl PlayerState {
    /// All states, in declaration order
    pub const ALL: [PlayerState; 11] = [
        Self::Idle,
        Self::Arrow,
        Self::Dance,
        Self::Dash,
        Self::Attack,
        Self::Fall,
        Self::Fireball,
        Self::Jump,
        Self::Kick,
        Self::Lay,
        Self::Move,
    ];

    /// Check if this state is driven by a one-shot clip and exits when it finishes
    pub fn is_clip_driven(&self) -> bool {
        matches!(
            self,
            Self::Arrow
                | Self::Dance
                | Self::Dash
                | Self::Attack
                | Self::Fireball
                | Self::Kick
                | Self::Lay
        )
    }
}
