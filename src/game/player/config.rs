// Controller tunables - set once when the player is spawned

use std::time::Duration;

use thiserror::Error;

/// Errors raised when a configuration holds unusable values
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a finite number greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must be a finite number (got {value})")]
    NotFinite { field: &'static str, value: f32 },

    #[error("{field} of {value} seconds is longer than any representable duration")]
    DurationOutOfRange { field: &'static str, value: f32 },
}

/// Movement and timing parameters for the player controller
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    /// Impulse magnitude for jumps, also used for dashes
    pub jump_force: f32,
    /// Horizontal speed while walking and while airborne (units/second)
    pub walk_speed: f32,
    /// Horizontal speed while running on the ground (units/second)
    pub run_speed: f32,
    /// Seconds before another dash is allowed
    pub dash_cooldown: f32,
    /// Gravity multiplier restored after clips that suspend gravity
    pub gravity_scale: f32,
    /// Seconds after which a clip the animator does not know counts as finished
    pub missing_clip_timeout: f32,
}

/// Default tuning used by the player character
pub const BASE_CONFIG: ControllerConfig = ControllerConfig {
    jump_force: 20.0,
    walk_speed: 10.0,
    run_speed: 20.0,
    dash_cooldown: 2.0,
    gravity_scale: 1.0,
    missing_clip_timeout: 1.0,
};

impl Default for ControllerConfig {
    fn default() -> Self {
        BASE_CONFIG
    }
}

impl ControllerConfig {
    pub fn with_jump_force(mut self, jump_force: f32) -> Self {
        self.jump_force = jump_force;
        self
    }

    pub fn with_walk_speed(mut self, walk_speed: f32) -> Self {
        self.walk_speed = walk_speed;
        self
    }

    pub fn with_run_speed(mut self, run_speed: f32) -> Self {
        self.run_speed = run_speed;
        self
    }

    pub fn with_dash_cooldown(mut self, seconds: f32) -> Self {
        self.dash_cooldown = seconds;
        self
    }

    pub fn with_gravity_scale(mut self, gravity_scale: f32) -> Self {
        self.gravity_scale = gravity_scale;
        self
    }

    pub fn with_missing_clip_timeout(mut self, seconds: f32) -> Self {
        self.missing_clip_timeout = seconds;
        self
    }

    /// Check every field and hand the configuration back if it is usable
    pub fn validate(self) -> Result<Self, ConfigError> {
        let positive = [
            ("jump_force", self.jump_force),
            ("walk_speed", self.walk_speed),
            ("run_speed", self.run_speed),
            ("dash_cooldown", self.dash_cooldown),
            ("missing_clip_timeout", self.missing_clip_timeout),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let durations = [
            ("dash_cooldown", self.dash_cooldown),
            ("missing_clip_timeout", self.missing_clip_timeout),
        ];
        for (field, value) in durations {
            if Duration::try_from_secs_f32(value).is_err() {
                return Err(ConfigError::DurationOutOfRange { field, value });
            }
        }

        // Zero or negative gravity is a legitimate tuning choice
        if !self.gravity_scale.is_finite() {
            return Err(ConfigError::NotFinite {
                field: "gravity_scale",
                value: self.gravity_scale,
            });
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ControllerConfig::default();
        assert_eq!(config.jump_force, 20.0);
        assert_eq!(config.walk_speed, 10.0);
        assert_eq!(config.run_speed, 20.0);
        assert_eq!(config.dash_cooldown, 2.0);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ControllerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ControllerConfig::default()
            .with_walk_speed(4.0)
            .with_dash_cooldown(0.5);
        assert_eq!(config.walk_speed, 4.0);
        assert_eq!(config.dash_cooldown, 0.5);
        assert_eq!(config.run_speed, BASE_CONFIG.run_speed);
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let err = ControllerConfig::default()
            .with_run_speed(0.0)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::NotPositive {
                field: "run_speed",
                value: 0.0
            }
        );
    }

    #[test]
    fn test_rejects_nan_gravity() {
        let err = ControllerConfig::default()
            .with_gravity_scale(f32::NAN)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotFinite {
                field: "gravity_scale",
                ..
            }
        ));
    }

    #[test]
    fn test_error_message() {
        let err = ConfigError::NotPositive {
            field: "jump_force",
            value: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "jump_force must be a finite number greater than zero (got -1)"
        );
    }

    #[test]
    fn test_rejects_cooldown_beyond_duration_range() {
        let err = ControllerConfig::default()
            .with_dash_cooldown(1.0e30)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::DurationOutOfRange {
                field: "dash_cooldown",
                value: 1.0e30
            }
        );

        let err = ControllerConfig::default()
            .with_missing_clip_timeout(f32::MAX)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DurationOutOfRange {
                field: "missing_clip_timeout",
                ..
            }
        ));
    }
}
