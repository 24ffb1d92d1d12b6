// Dash cooldown - one-shot delayed reset evaluated against the frame clock

use std::time::Duration;

/// Keeps `has_dashed` raised until the cooldown has elapsed
#[derive(Debug, Clone)]
pub struct DashCooldown {
    duration: Duration,
    started_at: Option<Duration>,
}

impl DashCooldown {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            started_at: None,
        }
    }

    /// Build from a cooldown expressed in seconds
    pub fn from_secs(seconds: f32) -> Self {
        Self::new(saturating_secs(seconds))
    }

    /// Start the cooldown at `now`
    pub fn start(&mut self, now: Duration) {
        self.started_at = Some(now);
    }

    /// Clear the flag once the cooldown has run out
    ///
    /// Returns true on the call that performs the reset.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.started_at {
            Some(started) if now.saturating_sub(started) >= self.duration => {
                self.started_at = None;
                true
            }
            _ => false,
        }
    }

    /// Whether a dash happened and its cooldown is still running
    pub fn has_dashed(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// Seconds to `Duration`, clamped to `[0, Duration::MAX]`; NaN maps to zero
pub(crate) fn saturating_secs(seconds: f32) -> Duration {
    Duration::try_from_secs_f32(seconds.max(0.0)).unwrap_or(Duration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_idle_cooldown() {
        let mut cooldown = DashCooldown::from_secs(2.0);
        assert!(!cooldown.has_dashed());
        assert!(!cooldown.poll(ms(10_000)));
    }

    #[test]
    fn test_resets_exactly_at_duration() {
        let mut cooldown = DashCooldown::from_secs(2.0);
        cooldown.start(ms(500));

        assert!(!cooldown.poll(ms(2_499)));
        assert!(cooldown.has_dashed());

        assert!(cooldown.poll(ms(2_500)));
        assert!(!cooldown.has_dashed());
    }

    #[test]
    fn test_reset_fires_once() {
        let mut cooldown = DashCooldown::new(ms(100));
        cooldown.start(ms(0));
        assert!(cooldown.poll(ms(200)));
        assert!(!cooldown.poll(ms(300)));
    }

    #[test]
    fn test_clock_going_backwards_does_not_reset() {
        let mut cooldown = DashCooldown::new(ms(100));
        cooldown.start(ms(1_000));
        assert!(!cooldown.poll(ms(900)));
        assert!(cooldown.has_dashed());
    }

    #[test]
    fn test_huge_cooldown_saturates() {
        let cooldown = DashCooldown::from_secs(1.0e30);
        assert_eq!(cooldown.duration(), Duration::MAX);
        assert_eq!(DashCooldown::from_secs(f32::NAN).duration(), Duration::ZERO);
        assert_eq!(DashCooldown::from_secs(-3.0).duration(), Duration::ZERO);
    }
}
