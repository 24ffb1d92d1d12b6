/// Fixed-timestep frame pacing
///
/// Rendering frames arrive at whatever rate the window delivers them; the
/// player controller and physics advance in fixed 1/60 s ticks so behavior
/// does not depend on the display refresh rate.
use std::time::{Duration, Instant};

/// Target physics/update rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of fixed updates per frame to prevent spiral of death
const MAX_UPDATES_PER_FRAME: u32 = 5;

/// Game loop timing state
pub struct GameLoop {
    /// Accumulated time not yet consumed by fixed updates
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Time when game loop started
    start_time: Instant,

    /// Current frame number
    frame_count: u64,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: now,
            start_time: now,
            frame_count: 0,
        }
    }

    /// Begin a new frame, returns the number of fixed updates to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        self.accumulate(frame_time)
    }

    /// Add `frame_time` to the accumulator and consume it in fixed steps
    fn accumulate(&mut self, frame_time: Duration) -> u32 {
        self.accumulator += frame_time;

        let mut updates = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && updates < MAX_UPDATES_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            updates += 1;
        }

        // Drop time we could not catch up on instead of replaying it later
        if updates == MAX_UPDATES_PER_FRAME {
            self.accumulator = self.accumulator.min(FIXED_TIMESTEP_DURATION);
        }
        updates
    }

    /// Wall-clock time since the loop started; this is the controller's clock
    pub fn elapsed(&self) -> Duration {
        Instant::now().duration_since(self.start_time)
    }

    /// Get total number of frames begun
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_game_loop_creation() {
        let game_loop = GameLoop::new();
        assert_eq!(game_loop.frame_count(), 0);
    }

    #[test]
    fn test_frame_counting() {
        let mut game_loop = GameLoop::new();
        game_loop.begin_frame();
        game_loop.begin_frame();
        assert_eq!(game_loop.frame_count(), 2);
    }

    #[test]
    fn test_accumulates_whole_steps() {
        let mut game_loop = GameLoop::new();
        assert_eq!(game_loop.accumulate(Duration::from_millis(10)), 0);
        assert_eq!(game_loop.accumulate(Duration::from_millis(10)), 1);
        assert_eq!(game_loop.accumulate(Duration::from_millis(34)), 2);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut game_loop = GameLoop::new();
        assert_eq!(
            game_loop.accumulate(Duration::from_millis(300)),
            MAX_UPDATES_PER_FRAME
        );
        // The backlog is dropped rather than replayed
        assert!(game_loop.accumulate(Duration::ZERO) <= 1);
    }

    #[test]
    fn test_elapsed_time() {
        let game_loop = GameLoop::new();
        thread::sleep(Duration::from_millis(10));
        assert!(game_loop.elapsed() >= Duration::from_millis(10));
    }
}
