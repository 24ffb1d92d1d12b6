// Play session - wires the player controller to rapier, winit input and the clip player

use std::time::Duration;

use log::{info, warn};

use super::player::{
    AnimationPlayer, ControllerConfig, PlayerController, PlayerState, SurfaceTag,
};
use crate::engine::game_loop::{GameLoop, FIXED_TIMESTEP};
use crate::engine::input::{InputConfig, InputSampler};
use crate::engine::physics::{presets, ContactPhase, PhysicsWorld, RigidBodyHandle};

/// Player capsule size in meters
const PLAYER_WIDTH: f32 = 1.0;
const PLAYER_HEIGHT: f32 = 2.0;

/// A small test level with one player
pub struct Session {
    physics: PhysicsWorld,
    player_body: RigidBodyHandle,
    controller: PlayerController,
    animation: AnimationPlayer,
    input: InputSampler,
    game_loop: GameLoop,
}

impl Session {
    pub fn new(config: ControllerConfig, bindings: InputConfig) -> Self {
        let mut physics = PhysicsWorld::new();

        // Floor spanning the level, top surface at y = 0.5
        let floor = physics.add_rigid_body(presets::static_body(0.0, 0.0));
        physics.add_tagged_collider(
            presets::ground_collider(40.0, 1.0),
            floor,
            SurfaceTag::Ground.as_str(),
        );

        // Horse standing on the floor to the right of the spawn point
        let horse = physics.add_rigid_body(presets::static_body(8.0, 1.0));
        physics.add_tagged_collider(
            presets::mount_collider(2.0, 1.0),
            horse,
            SurfaceTag::Mount.as_str(),
        );

        let player_body = physics.add_rigid_body(presets::player_body(0.0, 3.0));
        let player_collider = physics.add_collider(
            presets::player_collider(PLAYER_WIDTH, PLAYER_HEIGHT),
            player_body,
        );
        physics.watch_collider(player_collider);

        Self {
            physics,
            player_body,
            controller: PlayerController::new(config),
            animation: AnimationPlayer::with_player_clips(),
            input: InputSampler::new(bindings),
            game_loop: GameLoop::new(),
        }
    }

    /// Keyboard state fed by the window's events
    pub fn input_mut(&mut self) -> &mut InputSampler {
        &mut self.input
    }

    pub fn controller(&self) -> &PlayerController {
        &self.controller
    }

    pub fn animation(&self) -> &AnimationPlayer {
        &self.animation
    }

    /// Run as many fixed updates as the elapsed wall-clock time calls for
    pub fn frame(&mut self) {
        let updates = self.game_loop.begin_frame();
        let now = self.game_loop.elapsed();
        for _ in 0..updates {
            self.tick(now);
        }
    }

    /// One fixed update: physics, contact forwarding, controller, animation
    pub fn tick(&mut self, now: Duration) -> PlayerState {
        self.physics.step();

        for contact in self.physics.tagged_contacts() {
            match contact.phase {
                ContactPhase::Started => self.controller.on_collision_enter(contact.tag),
                ContactPhase::Stopped => self.controller.on_collision_exit(contact.tag),
            }
        }

        let snapshot = self.input.sample();
        let previous = self.controller.state();

        let Some(body) = self.physics.get_rigid_body_mut(self.player_body) else {
            warn!("Player body is missing from the physics world");
            return previous;
        };
        let state = self
            .controller
            .step(&snapshot, now, body, &mut self.animation);
        self.animation.update(FIXED_TIMESTEP);

        if state != previous {
            if let Some(position) = self.player_position() {
                info!("Player: {:?} -> {:?} at {}", previous, state, position);
            }
        }
        state
    }

    /// Player position in world space
    pub fn player_position(&self) -> Option<glam::Vec2> {
        self.physics
            .get_rigid_body(self.player_body)
            .map(|body| glam::Vec2::new(body.translation().x, body.translation().y))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ControllerConfig::default(), InputConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::player::{Animator, Clip};
    use winit::keyboard::KeyCode;

    const FRAME: Duration = Duration::from_micros(16_667);

    fn run(session: &mut Session, ticks: u32, start: u32) -> PlayerState {
        let mut state = session.controller().state();
        for i in start..start + ticks {
            state = session.tick(FRAME * i);
        }
        state
    }

    #[test]
    fn test_player_lands_and_idles() {
        let mut session = Session::default();
        let state = run(&mut session, 240, 0);

        assert!(session.controller().is_grounded());
        assert_eq!(state, PlayerState::Idle);
        assert_eq!(session.animation().current_clip(), Some(Clip::Idle));
    }

    #[test]
    fn test_holding_right_walks_the_player() {
        let mut session = Session::default();
        run(&mut session, 240, 0);
        let start = session.player_position().unwrap();

        session.input_mut().press(KeyCode::KeyD);
        let state = run(&mut session, 30, 240);

        assert_eq!(state, PlayerState::Move);
        assert!(session.player_position().unwrap().x > start.x);
    }

    #[test]
    fn test_damage_key_knocks_down() {
        let mut session = Session::default();
        run(&mut session, 240, 0);

        session.input_mut().press(KeyCode::Backspace);
        assert_eq!(session.tick(FRAME * 240), PlayerState::Lay);
    }
}
