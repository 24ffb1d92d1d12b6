// Grounded/mounted flags fed by tagged collision events

use std::str::FromStr;

use log::trace;

/// Surface categories the player controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceTag {
    /// Floors and platforms the character can stand on
    Ground,
    /// Rideable entities
    Mount,
}

impl SurfaceTag {
    /// Tag string used by the level data
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ground => "Ground",
            Self::Mount => "Mount",
        }
    }
}

impl FromStr for SurfaceTag {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Ground" => Ok(Self::Ground),
            "Mount" => Ok(Self::Mount),
            _ => Err(()),
        }
    }
}

/// Tracks what the character is standing on or riding
#[derive(Debug, Default, Clone)]
pub struct CollisionListener {
    grounded: bool,
    mounted: bool,
}

impl CollisionListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called when the character starts touching a collider carrying `tag`
    pub fn on_enter(&mut self, tag: &str) {
        match tag.parse() {
            Ok(SurfaceTag::Ground) => self.grounded = true,
            Ok(SurfaceTag::Mount) => self.mounted = true,
            Err(()) => trace!("Ignoring collision enter with tag {:?}", tag),
        }
    }

    /// Called when the character stops touching a collider carrying `tag`
    pub fn on_exit(&mut self, tag: &str) {
        match tag.parse() {
            Ok(SurfaceTag::Ground) => self.grounded = false,
            Ok(SurfaceTag::Mount) => self.mounted = false,
            Err(()) => trace!("Ignoring collision exit with tag {:?}", tag),
        }
    }

    /// Mark the character as airborne (jump launch)
    pub fn leave_ground(&mut self) {
        self.grounded = false;
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }
}
