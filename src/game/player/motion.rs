// Horizontal motion, facing and impulses for the player body

use glam::Vec2;

use super::animation::Animator;

/// The slice of a rigid body the player controller drives
pub trait PhysicsBody {
    /// Current linear velocity
    fn velocity(&self) -> Vec2;

    /// Overwrite the linear velocity
    fn set_velocity(&mut self, velocity: Vec2);

    /// Apply an instantaneous change of momentum
    fn apply_impulse(&mut self, impulse: Vec2);

    /// Current gravity multiplier
    fn gravity_scale(&self) -> f32;

    /// Set the gravity multiplier (0.0 = weightless)
    fn set_gravity_scale(&mut self, scale: f32);
}

/// Direction the character is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// Unit vector pointing the way the character faces
    pub fn direction(&self) -> Vec2 {
        match self {
            Self::Right => Vec2::X,
            Self::Left => Vec2::NEG_X,
        }
    }

    /// Whether the sprite must be mirrored for this facing
    pub fn is_flipped(&self) -> bool {
        *self == Self::Left
    }
}

/// Applies movement input to the physics body and keeps the sprite facing
#[derive(Debug, Default)]
pub struct MotionController {
    facing: Facing,
}

impl MotionController {
    pub fn new(facing: Facing) -> Self {
        Self { facing }
    }

    /// Direction the character is facing
    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Turn toward the horizontal input; zero input never turns
    ///
    /// Returns true when the facing changed.
    pub fn face_input<A: Animator>(&mut self, move_x: f32, animator: &mut A) -> bool {
        let wanted = if move_x < 0.0 {
            Facing::Left
        } else if move_x > 0.0 {
            Facing::Right
        } else {
            return false;
        };

        if wanted == self.facing {
            return false;
        }

        self.facing = wanted;
        animator.set_flip_x(wanted.is_flipped());
        true
    }

    /// Turn toward the input, then drive horizontal velocity at `speed`
    ///
    /// Vertical velocity is left untouched.
    pub fn apply_horizontal<B: PhysicsBody, A: Animator>(
        &mut self,
        move_x: f32,
        speed: f32,
        body: &mut B,
        animator: &mut A,
    ) {
        self.face_input(move_x, animator);

        let velocity = body.velocity();
        body.set_velocity(Vec2::new(move_x * speed, velocity.y));
    }

    /// Apply an impulse of `magnitude` along `direction`
    pub fn impulse<B: PhysicsBody>(&self, direction: Vec2, magnitude: f32, body: &mut B) {
        body.apply_impulse(direction.normalize_or_zero() * magnitude);
    }

    /// Launch straight up
    pub fn jump<B: PhysicsBody>(&self, force: f32, body: &mut B) {
        self.impulse(Vec2::Y, force, body);
    }

    /// Burst along the current facing
    pub fn dash<B: PhysicsBody>(&self, force: f32, body: &mut B) {
        self.impulse(self.facing.direction(), force, body);
    }
}
