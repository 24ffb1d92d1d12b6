// Platform Hero - finite-state player controller for a 2D platformer
//
// - `engine`: Game loop, keyboard input and rapier2d physics
// - `game`: Player controller and the play session wiring it to the engine

pub mod engine;
pub mod game;
