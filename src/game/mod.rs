// Gameplay modules built on top of the engine layer

pub mod player;
pub mod session;
