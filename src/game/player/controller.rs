// Player controller - per-frame finite-state machine
//
// Each call to `step` runs the handler of the current state, which reads the
// input snapshot and the collision flags, drives the physics body and the
// animator, and may name a next state. A held damage trigger then overrides
// whatever the handler decided. At most one transition happens per frame.

use std::time::Duration;

use log::{debug, warn};

use super::animation::{AnimationError, Animator, Clip};
use super::collision::CollisionListener;
use super::config::{ConfigError, ControllerConfig};
use super::cooldown::{saturating_secs, DashCooldown};
use super::input::InputSnapshot;
use super::motion::{Facing, MotionController, PhysicsBody};
use super::state::PlayerState;

/// Collaborators and input for the frame being stepped
struct Frame<'a, B, A> {
    input: InputSnapshot,
    now: Duration,
    body: &'a mut B,
    animator: &'a mut A,
}

/// Drives the player character through its states
#[derive(Debug)]
pub struct PlayerController {
    config: ControllerConfig,
    state: PlayerState,
    previous_state: PlayerState,
    /// Clock value of the frame the current state was entered
    entered_at: Duration,
    /// Clock value of the last step
    now: Duration,
    motion: MotionController,
    collisions: CollisionListener,
    cooldown: DashCooldown,
    /// Knockdown trigger for the frame being stepped
    damage: bool,
    /// One-shot clip the current state is waiting on
    active_clip: Option<Clip>,
    /// Clip the animator rejected and the clock value it was first requested at
    missing_clip: Option<(Clip, Duration)>,
    missing_clip_timeout: Duration,
    gravity_suspended: bool,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

impl PlayerController {
    /// Create a controller in `Idle`, facing right, airborne until a ground contact arrives
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            cooldown: DashCooldown::from_secs(config.dash_cooldown),
            missing_clip_timeout: saturating_secs(config.missing_clip_timeout),
            config,
            state: PlayerState::Idle,
            previous_state: PlayerState::Idle,
            entered_at: Duration::ZERO,
            now: Duration::ZERO,
            motion: MotionController::new(Facing::Right),
            collisions: CollisionListener::new(),
            damage: false,
            active_clip: None,
            missing_clip: None,
            gravity_suspended: false,
        }
    }

    /// Create a controller after validating `config`
    pub fn try_new(config: ControllerConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.validate()?))
    }

    /// Get the current state
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Get the previous state
    pub fn previous_state(&self) -> PlayerState {
        self.previous_state
    }

    /// Time spent in the current state as of the last step
    pub fn state_time(&self) -> Duration {
        self.now.saturating_sub(self.entered_at)
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn facing(&self) -> Facing {
        self.motion.facing()
    }

    pub fn is_grounded(&self) -> bool {
        self.collisions.is_grounded()
    }

    pub fn is_mounted(&self) -> bool {
        self.collisions.is_mounted()
    }

    /// Whether a dash happened and its cooldown is still running
    pub fn has_dashed(&self) -> bool {
        self.cooldown.has_dashed()
    }

    /// Forward a collision-enter notification carrying the other collider's tag
    pub fn on_collision_enter(&mut self, tag: &str) {
        self.collisions.on_enter(tag);
    }

    /// Forward a collision-exit notification carrying the other collider's tag
    pub fn on_collision_exit(&mut self, tag: &str) {
        self.collisions.on_exit(tag);
    }

    /// Run one frame of the state machine
    ///
    /// `now` is the host clock (time since start); it times the dash
    /// cooldown and the fallback for clips the animator does not know.
    pub fn step<B: PhysicsBody, A: Animator>(
        &mut self,
        input: &InputSnapshot,
        now: Duration,
        body: &mut B,
        animator: &mut A,
    ) -> PlayerState {
        self.now = now;
        if self.cooldown.poll(now) {
            debug!("Dash cooldown elapsed");
        }
        self.damage = input.damage;

        let mut frame = Frame {
            input: *input,
            now,
            body,
            animator,
        };

        let next = match self.state {
            PlayerState::Idle => self.idle(&mut frame),
            PlayerState::Move => self.walk(&mut frame),
            PlayerState::Jump => self.jump(&mut frame),
            PlayerState::Fall => self.fall(&mut frame),
            PlayerState::Attack => self.attack(&mut frame),
            PlayerState::Dash => self.dash(&mut frame),
            PlayerState::Arrow => self.clip_state(Clip::Arrow, &mut frame),
            PlayerState::Dance => self.clip_state(Clip::Dance, &mut frame),
            PlayerState::Fireball => self.clip_state(Clip::Fireball, &mut frame),
            PlayerState::Kick => self.clip_state(Clip::Kick, &mut frame),
            PlayerState::Lay => self.lay(&mut frame),
        };

        let next = if self.damage {
            Some(PlayerState::Lay)
        } else {
            next
        };

        if let Some(next) = next {
            self.transition(next, &mut frame);
        }

        self.state
    }

    fn idle<B: PhysicsBody, A: Animator>(
        &mut self,
        f: &mut Frame<'_, B, A>,
    ) -> Option<PlayerState> {
        let input = f.input;

        if input.arrow {
            return Some(PlayerState::Arrow);
        }
        if input.fireball {
            return Some(PlayerState::Fireball);
        }
        if input.dance {
            return Some(PlayerState::Dance);
        }
        if input.dash && !self.cooldown.has_dashed() {
            return Some(self.begin_dash(f));
        }
        if input.wants_attack() {
            // A finished attack clip lingers until Idle plays again
            if f.animator.current_clip().is_some_and(|clip| clip.is_attack()) {
                return None;
            }
            return Some(PlayerState::Attack);
        }
        if input.is_moving() || input.run {
            return Some(PlayerState::Move);
        }
        if input.kick {
            return Some(PlayerState::Kick);
        }
        if !self.collisions.is_grounded() {
            return Some(PlayerState::Fall);
        }
        if input.jump {
            return Some(self.launch_jump(f));
        }

        let clip = if self.collisions.is_mounted() {
            Clip::HorseIdle
        } else {
            Clip::Idle
        };
        self.play(clip, f.animator);
        None
    }

    fn walk<B: PhysicsBody, A: Animator>(
        &mut self,
        f: &mut Frame<'_, B, A>,
    ) -> Option<PlayerState> {
        let input = f.input;
        let grounded = self.collisions.is_grounded();

        if grounded && input.jump {
            return Some(self.launch_jump(f));
        }
        if input.attack {
            return Some(PlayerState::Attack);
        }
        if !input.is_moving() {
            return Some(self.settle());
        }
        if !grounded {
            return Some(PlayerState::Fall);
        }

        let (clip, speed) = if input.run {
            (Clip::Run, self.config.run_speed)
        } else {
            (Clip::Walk, self.config.walk_speed)
        };
        self.play(clip, f.animator);
        self.motion
            .apply_horizontal(input.move_x, speed, f.body, f.animator);
        None
    }

    fn jump<B: PhysicsBody, A: Animator>(
        &mut self,
        f: &mut Frame<'_, B, A>,
    ) -> Option<PlayerState> {
        let input = f.input;

        self.play(Clip::Jump, f.animator);
        self.motion
            .apply_horizontal(input.move_x, self.config.walk_speed, f.body, f.animator);

        if input.attack {
            return Some(PlayerState::Attack);
        }
        if input.dash && !self.cooldown.has_dashed() {
            return Some(self.begin_dash(f));
        }
        if f.body.velocity().y < 0.0 {
            return Some(PlayerState::Fall);
        }
        None
    }

    fn fall<B: PhysicsBody, A: Animator>(
        &mut self,
        f: &mut Frame<'_, B, A>,
    ) -> Option<PlayerState> {
        let input = f.input;

        if f.body.velocity().y < 0.0 && !self.collisions.is_grounded() {
            self.play(Clip::Fall, f.animator);
            self.motion
                .apply_horizontal(input.move_x, self.config.walk_speed, f.body, f.animator);

            if input.attack {
                return Some(PlayerState::Attack);
            }
            if input.dash && !self.cooldown.has_dashed() {
                return Some(self.begin_dash(f));
            }
            return None;
        }

        self.play(Clip::Land, f.animator);
        if self.clip_finished(Clip::Land, &*f.animator, f.now) {
            return Some(PlayerState::Idle);
        }
        None
    }

    fn attack<B: PhysicsBody, A: Animator>(
        &mut self,
        f: &mut Frame<'_, B, A>,
    ) -> Option<PlayerState> {
        self.motion.face_input(f.input.move_x, f.animator);

        let clip = match self.active_clip {
            Some(clip) => clip,
            None => self.attack_clip(&f.input),
        };
        self.clip_state(clip, f)
    }

    fn dash<B: PhysicsBody, A: Animator>(
        &mut self,
        f: &mut Frame<'_, B, A>,
    ) -> Option<PlayerState> {
        let clip = match self.active_clip {
            Some(clip) => clip,
            None if self.collisions.is_grounded() => Clip::Roll,
            None => Clip::Dash,
        };
        self.clip_state(clip, f)
    }

    fn lay<B: PhysicsBody, A: Animator>(
        &mut self,
        f: &mut Frame<'_, B, A>,
    ) -> Option<PlayerState> {
        if self.hold_clip(Clip::Lay, f) {
            self.damage = false;
            return Some(PlayerState::Idle);
        }
        None
    }

    /// Play `clip` and leave for Idle or Fall once it has finished
    fn clip_state<B: PhysicsBody, A: Animator>(
        &mut self,
        clip: Clip,
        f: &mut Frame<'_, B, A>,
    ) -> Option<PlayerState> {
        if self.hold_clip(clip, f) {
            Some(self.settle())
        } else {
            None
        }
    }

    /// Keep `clip` playing for the current state, returning true once it has finished
    ///
    /// The first call in a state rewinds the clip and applies its entry effects.
    fn hold_clip<B: PhysicsBody, A: Animator>(
        &mut self,
        clip: Clip,
        f: &mut Frame<'_, B, A>,
    ) -> bool {
        debug_assert!(self.state.is_clip_driven());

        if self.active_clip == Some(clip) {
            self.play(clip, f.animator);
        } else {
            self.active_clip = Some(clip);
            if clip.suspends_gravity() {
                f.body.set_gravity_scale(0.0);
                self.gravity_suspended = true;
            }
            let result = f.animator.restart(clip);
            self.note_missing(clip, result, self.entered_at);
        }

        self.clip_finished(clip, &*f.animator, f.now)
    }

    /// Sub-attack for the current flags, evaluated when Attack is entered
    fn attack_clip(&self, input: &InputSnapshot) -> Clip {
        let grounded = self.collisions.is_grounded();
        if grounded && input.up {
            Clip::UpAttack
        } else if grounded && input.down {
            Clip::DownAttack
        } else if grounded {
            Clip::NormalAttack
        } else if self.collisions.is_mounted() {
            Clip::HorseAttack
        } else {
            Clip::JumpAttack
        }
    }

    fn begin_dash<B: PhysicsBody, A: Animator>(
        &mut self,
        f: &mut Frame<'_, B, A>,
    ) -> PlayerState {
        self.motion.dash(self.config.jump_force, f.body);
        self.cooldown.start(f.now);
        debug!(
            "Dash started facing {:?}, next dash in {:?}",
            self.motion.facing(),
            self.cooldown.duration()
        );
        PlayerState::Dash
    }

    fn launch_jump<B: PhysicsBody, A: Animator>(
        &mut self,
        f: &mut Frame<'_, B, A>,
    ) -> PlayerState {
        self.motion.jump(self.config.jump_force, f.body);
        self.collisions.leave_ground();
        PlayerState::Jump
    }

    /// Where a finished action returns to
    fn settle(&self) -> PlayerState {
        if self.collisions.is_grounded() {
            PlayerState::Idle
        } else {
            PlayerState::Fall
        }
    }

    fn play<A: Animator>(&mut self, clip: Clip, animator: &mut A) {
        let result = animator.play(clip);
        self.note_missing(clip, result, self.now);
    }

    /// Remember a rejected clip; its fallback timer runs from `since`
    fn note_missing(&mut self, clip: Clip, result: Result<(), AnimationError>, since: Duration) {
        let Err(err) = result else {
            // Another clip played; a later request for the missing one starts a new wait
            self.missing_clip = None;
            return;
        };
        if self.missing_clip.map(|(missing, _)| missing) != Some(clip) {
            warn!(
                "{} while in {:?}; treating it as finished after {:?}",
                err, self.state, self.missing_clip_timeout
            );
            self.missing_clip = Some((clip, since));
        }
    }

    fn clip_finished<A: Animator>(&self, clip: Clip, animator: &A, now: Duration) -> bool {
        if animator.is_finished(clip) {
            return true;
        }
        match self.missing_clip {
            Some((missing, since)) if missing == clip => {
                now.saturating_sub(since) >= self.missing_clip_timeout
            }
            _ => false,
        }
    }

    fn transition<B: PhysicsBody, A: Animator>(
        &mut self,
        next: PlayerState,
        f: &mut Frame<'_, B, A>,
    ) {
        if next == self.state {
            return;
        }

        if self.gravity_suspended {
            f.body.set_gravity_scale(self.config.gravity_scale);
            self.gravity_suspended = false;
        }

        debug!("Player state {:?} -> {:?}", self.state, next);
        self.previous_state = self.state;
        self.state = next;
        self.entered_at = f.now;
        self.active_clip = None;
        self.missing_clip = None;
    }
}
