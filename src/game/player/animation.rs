// Player animation clips and playback

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Animation clips the controller can request
///
/// The names are shared with the animation assets and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clip {
    Idle,
    HorseIdle,
    Walk,
    Run,
    Jump,
    Fall,
    Land,
    Dash,
    Roll,
    NormalAttack,
    UpAttack,
    DownAttack,
    HorseAttack,
    JumpAttack,
    Kick,
    Arrow,
    Fireball,
    Dance,
    Lay,
}

impl Clip {
    pub const ALL: [Clip; 19] = [
        Self::Idle,
        Self::HorseIdle,
        Self::Walk,
        Self::Run,
        Self::Jump,
        Self::Fall,
        Self::Land,
        Self::Dash,
        Self::Roll,
        Self::NormalAttack,
        Self::UpAttack,
        Self::DownAttack,
        Self::HorseAttack,
        Self::JumpAttack,
        Self::Kick,
        Self::Arrow,
        Self::Fireball,
        Self::Dance,
        Self::Lay,
    ];

    /// Asset name of the clip
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::HorseIdle => "HorseIdle",
            Self::Walk => "Walk",
            Self::Run => "Run",
            Self::Jump => "Jump",
            Self::Fall => "Fall",
            Self::Land => "Land",
            Self::Dash => "Dash",
            Self::Roll => "Roll",
            Self::NormalAttack => "NormalAttack",
            Self::UpAttack => "UpAttack",
            Self::DownAttack => "DownAttack",
            Self::HorseAttack => "HorseAttack",
            Self::JumpAttack => "JumpAttack",
            Self::Kick => "Kick",
            Self::Arrow => "Arrow",
            Self::Fireball => "Fireball",
            Self::Dance => "Dance",
            Self::Lay => "Lay",
        }
    }

    /// Check if this clip is one of the melee attacks (kick included)
    pub fn is_attack(&self) -> bool {
        matches!(
            self,
            Self::NormalAttack
                | Self::UpAttack
                | Self::DownAttack
                | Self::HorseAttack
                | Self::JumpAttack
                | Self::Kick
        )
    }

    /// Check if gravity is switched off while this clip plays
    pub fn suspends_gravity(&self) -> bool {
        matches!(self, Self::Dash | Self::JumpAttack)
    }
}

impl fmt::Display for Clip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Clip {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|clip| clip.name() == s)
            .ok_or_else(|| AnimationError::UnknownClip(s.to_string()))
    }
}

/// Errors reported by an animator
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnimationError {
    #[error("animation clip `{0}` is not available")]
    UnknownClip(String),
}

/// Contract between the player controller and whatever plays its animations
pub trait Animator {
    /// Switch to `clip`, leaving it untouched if it is already the current clip
    fn play(&mut self, clip: Clip) -> Result<(), AnimationError>;

    /// Switch to `clip` and rewind it to the first frame
    fn restart(&mut self, clip: Clip) -> Result<(), AnimationError>;

    /// Clip currently selected, if any
    fn current_clip(&self) -> Option<Clip>;

    /// Playback progress of the current clip, 1.0 meaning one full pass
    fn normalized_time(&self) -> f32;

    /// Mirror the visual horizontally
    fn set_flip_x(&mut self, flipped: bool);

    /// Check if `clip` is the current clip
    fn is_playing(&self, clip: Clip) -> bool {
        self.current_clip() == Some(clip)
    }

    /// Check if `clip` is current and has played through at least once
    fn is_finished(&self, clip: Clip) -> bool {
        self.is_playing(clip) && self.normalized_time() >= 1.0
    }
}

/// A single animation clip
#[derive(Debug, Clone)]
pub struct AnimationClip {
    /// Name of the animation (e.g., "Idle", "Walk", "Jump")
    pub name: String,
    /// Number of frames in the animation
    pub frame_count: usize,
    /// Duration of each frame in seconds
    pub frame_duration: f32,
    /// Whether the animation loops
    pub looping: bool,
}

impl AnimationClip {
    /// Create a new animation clip
    pub fn new(name: &str, frame_count: usize, fps: f32, looping: bool) -> Self {
        Self {
            name: name.to_string(),
            frame_count: frame_count.max(1),
            frame_duration: 1.0 / fps,
            looping,
        }
    }

    /// Create a looping animation
    pub fn looping(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, true)
    }

    /// Create a one-shot animation (plays once)
    pub fn one_shot(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, false)
    }

    /// Get the total duration of one animation cycle
    pub fn total_duration(&self) -> f32 {
        self.frame_count as f32 * self.frame_duration
    }
}

/// Frame-timed animation playback for the player sprite
#[derive(Debug)]
pub struct AnimationPlayer {
    /// All available animations, keyed by asset name
    animations: HashMap<String, AnimationClip>,
    /// Currently selected clip
    current: Option<Clip>,
    /// Current frame index
    current_frame: usize,
    /// Time elapsed in current frame
    frame_timer: f32,
    /// Time elapsed since the clip was (re)started
    clip_time: f32,
    /// Whether the sprite should be flipped horizontally
    flip_horizontal: bool,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self {
            animations: HashMap::new(),
            current: None,
            current_frame: 0,
            frame_timer: 0.0,
            clip_time: 0.0,
            flip_horizontal: false,
        }
    }

    /// Create an animation player holding every clip of the player sprite sheet
    pub fn with_player_clips() -> Self {
        let mut player = Self::new();

        // Locomotion
        player.add_animation(AnimationClip::looping("Idle", 8, 10.0));
        player.add_animation(AnimationClip::looping("HorseIdle", 8, 10.0));
        player.add_animation(AnimationClip::looping("Walk", 8, 12.0));
        player.add_animation(AnimationClip::looping("Run", 8, 16.0));
        player.add_animation(AnimationClip::looping("Jump", 4, 10.0));
        player.add_animation(AnimationClip::looping("Fall", 4, 10.0));
        player.add_animation(AnimationClip::one_shot("Land", 3, 15.0));
        player.add_animation(AnimationClip::one_shot("Dash", 6, 15.0));
        player.add_animation(AnimationClip::one_shot("Roll", 8, 16.0));

        // Attacks
        player.add_animation(AnimationClip::one_shot("NormalAttack", 6, 15.0));
        player.add_animation(AnimationClip::one_shot("UpAttack", 6, 15.0));
        player.add_animation(AnimationClip::one_shot("DownAttack", 6, 15.0));
        player.add_animation(AnimationClip::one_shot("HorseAttack", 6, 15.0));
        player.add_animation(AnimationClip::one_shot("JumpAttack", 6, 15.0));
        player.add_animation(AnimationClip::one_shot("Kick", 6, 15.0));

        // Abilities and reactions
        player.add_animation(AnimationClip::one_shot("Arrow", 9, 15.0));
        player.add_animation(AnimationClip::one_shot("Fireball", 9, 15.0));
        player.add_animation(AnimationClip::one_shot("Dance", 16, 12.0));
        player.add_animation(AnimationClip::one_shot("Lay", 12, 10.0));

        player
    }

    /// Add an animation clip
    pub fn add_animation(&mut self, clip: AnimationClip) {
        self.animations.insert(clip.name.clone(), clip);
    }

    /// Get horizontal flip state
    pub fn is_flipped_horizontal(&self) -> bool {
        self.flip_horizontal
    }

    /// Update the animation (called every frame)
    pub fn update(&mut self, dt: f32) {
        let Some(clip) = self
            .current
            .and_then(|current| self.animations.get(current.name()))
        else {
            return;
        };

        self.clip_time += dt;
        self.frame_timer += dt;

        while self.frame_timer >= clip.frame_duration {
            self.frame_timer -= clip.frame_duration;
            self.current_frame += 1;

            if self.current_frame >= clip.frame_count {
                self.current_frame = if clip.looping {
                    0
                } else {
                    // Stay on last frame
                    clip.frame_count - 1
                };
            }
        }
    }

    /// Get the current frame index
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    fn rewind(&mut self, clip: Clip) {
        self.current = Some(clip);
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.clip_time = 0.0;
    }

    fn ensure_known(&self, clip: Clip) -> Result<(), AnimationError> {
        if self.animations.contains_key(clip.name()) {
            Ok(())
        } else {
            Err(AnimationError::UnknownClip(clip.name().to_string()))
        }
    }
}

impl Animator for AnimationPlayer {
    fn play(&mut self, clip: Clip) -> Result<(), AnimationError> {
        self.ensure_known(clip)?;
        if self.current != Some(clip) {
            self.rewind(clip);
        }
        Ok(())
    }

    fn restart(&mut self, clip: Clip) -> Result<(), AnimationError> {
        self.ensure_known(clip)?;
        self.rewind(clip);
        Ok(())
    }

    fn current_clip(&self) -> Option<Clip> {
        self.current
    }

    fn normalized_time(&self) -> f32 {
        match self
            .current
            .and_then(|current| self.animations.get(current.name()))
        {
            Some(clip) if clip.total_duration() > 0.0 => self.clip_time / clip.total_duration(),
            _ => 0.0,
        }
    }

    fn set_flip_x(&mut self, flipped: bool) {
        self.flip_horizontal = flipped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clip_names_round_trip() {
        for clip in Clip::ALL {
            assert_eq!(clip.name().parse::<Clip>(), Ok(clip));
        }
    }

    #[test]
    fn test_unknown_clip_name() {
        assert_eq!(
            "Backflip".parse::<Clip>(),
            Err(AnimationError::UnknownClip("Backflip".to_string()))
        );
    }

    #[test]
    fn test_attack_clips() {
        let attacks: Vec<_> = Clip::ALL.into_iter().filter(Clip::is_attack).collect();
        assert_eq!(
            attacks,
            vec![
                Clip::NormalAttack,
                Clip::UpAttack,
                Clip::DownAttack,
                Clip::HorseAttack,
                Clip::JumpAttack,
                Clip::Kick,
            ]
        );
    }

    #[test]
    fn test_animation_clip_duration() {
        let clip = AnimationClip::one_shot("Kick", 6, 10.0);
        assert_relative_eq!(clip.total_duration(), 0.6);
        assert!(!clip.looping);
    }

    #[test]
    fn test_player_has_every_clip() {
        let mut player = AnimationPlayer::with_player_clips();
        for clip in Clip::ALL {
            assert!(player.play(clip).is_ok(), "missing clip {}", clip);
        }
    }

    #[test]
    fn test_play_unknown_clip_keeps_current() {
        let mut player = AnimationPlayer::new();
        player.add_animation(AnimationClip::looping("Idle", 8, 10.0));
        player.play(Clip::Idle).unwrap();

        let err = player.play(Clip::Roll).unwrap_err();
        assert_eq!(err, AnimationError::UnknownClip("Roll".to_string()));
        assert_eq!(player.current_clip(), Some(Clip::Idle));
    }

    #[test]
    fn test_normalized_time_reaches_one() {
        let mut player = AnimationPlayer::new();
        player.add_animation(AnimationClip::one_shot("Kick", 4, 10.0)); // 0.4s
        player.play(Clip::Kick).unwrap();

        player.update(0.2);
        assert_relative_eq!(player.normalized_time(), 0.5);
        assert!(!player.is_finished(Clip::Kick));

        player.update(0.25);
        assert!(player.is_finished(Clip::Kick));
        assert_eq!(player.current_frame(), 3); // Last frame
    }

    #[test]
    fn test_play_same_clip_does_not_rewind() {
        let mut player = AnimationPlayer::new();
        player.add_animation(AnimationClip::looping("Walk", 4, 10.0));
        player.play(Clip::Walk).unwrap();
        player.update(0.25);

        player.play(Clip::Walk).unwrap();
        assert_eq!(player.current_frame(), 2);
    }

    #[test]
    fn test_restart_rewinds() {
        let mut player = AnimationPlayer::new();
        player.add_animation(AnimationClip::one_shot("Lay", 4, 10.0));
        player.play(Clip::Lay).unwrap();
        player.update(1.0);
        assert!(player.is_finished(Clip::Lay));

        player.restart(Clip::Lay).unwrap();
        assert_eq!(player.current_frame(), 0);
        assert!(!player.is_finished(Clip::Lay));
    }

    #[test]
    fn test_looping_wraps_frames() {
        let mut player = AnimationPlayer::new();
        player.add_animation(AnimationClip::looping("Idle", 3, 10.0));
        player.play(Clip::Idle).unwrap();

        player.update(0.35); // 3.5 frames
        assert_eq!(player.current_frame(), 0);
        assert!(player.normalized_time() > 1.0);
    }

    #[test]
    fn test_finished_only_for_current_clip() {
        let mut player = AnimationPlayer::with_player_clips();
        player.play(Clip::Land).unwrap();
        player.update(5.0);
        assert!(player.is_finished(Clip::Land));
        assert!(!player.is_finished(Clip::Kick));
    }

    #[test]
    fn test_flip_horizontal() {
        let mut player = AnimationPlayer::with_player_clips();
        assert!(!player.is_flipped_horizontal());
        player.set_flip_x(true);
        assert!(player.is_flipped_horizontal());
    }
}
