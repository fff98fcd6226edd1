//! Session settings

use gallery_layout::{presets, TargetConfig};
use gallery_math::{consts, Rect, Vec3};
use serde::{Deserialize, Serialize};

use crate::assets::{DEFAULT_TARGET_ASSET, DEFAULT_WEAPON_ASSET};
use crate::error::{Result, SessionError};

/// Player, camera and rule settings for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Target preset name; unknown names fall back to the default preset
    pub preset: String,
    /// Seed for scattered placement
    pub seed: u64,
    /// Radians per second at full rotation input
    pub rotation_speed: f32,
    /// Units per second at full movement input
    pub move_speed: f32,
    /// Pitch is clamped to `[-max_pitch, max_pitch]` radians
    pub max_pitch: f32,
    /// Ground rectangle the player cannot leave
    pub movement_bounds: Rect,
    /// Player foot position at spawn
    pub spawn_position: Vec3,
    /// Camera height above the player position
    pub eye_height: f32,
    pub initial_yaw: f32,
    pub initial_pitch: f32,
    /// Kills that end the session; `None` means every target
    pub kill_count_to_win: Option<u32>,
    /// Seconds between game over and the game-over overlay
    pub game_over_delay: f32,
    /// Frame delta clamp, seconds
    pub max_delta: f32,
    pub weapon_asset: String,
    pub target_asset: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            preset: presets::DEFAULT_PRESET.to_string(),
            seed: 42,
            rotation_speed: 2.0,
            move_speed: 4.0,
            max_pitch: consts::FRAC_PI_2 * (2.0 / 3.0),
            movement_bounds: Rect::new(-8.0, 8.0, -6.0, 6.0),
            spawn_position: Vec3::ZERO,
            eye_height: 1.0,
            initial_yaw: 0.0,
            initial_pitch: 0.0,
            kill_count_to_win: None,
            game_over_delay: 1.5,
            max_delta: 0.1,
            weapon_asset: DEFAULT_WEAPON_ASSET.to_string(),
            target_asset: DEFAULT_TARGET_ASSET.to_string(),
        }
    }
}

impl SessionConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_preset(mut self, preset: impl Into<String>) -> Self {
        self.preset = preset.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_kill_count_to_win(mut self, kills: u32) -> Self {
        self.kill_count_to_win = Some(kills);
        self
    }

    pub fn with_game_over_delay(mut self, seconds: f32) -> Self {
        self.game_over_delay = seconds;
        self
    }

    /// Target config for the configured preset name
    pub fn target_config(&self) -> TargetConfig {
        presets::preset(&self.preset)
    }

    /// Check the constraints the orchestrator relies on
    pub fn validate(&self) -> Result<()> {
        if !(self.rotation_speed.is_finite() && self.rotation_speed > 0.0) {
            return invalid("rotation_speed must be positive");
        }
        if !(self.move_speed.is_finite() && self.move_speed >= 0.0) {
            return invalid("move_speed must not be negative");
        }
        if !(self.max_pitch > 0.0 && self.max_pitch <= consts::FRAC_PI_2) {
            return invalid("max_pitch must be in (0, pi/2]");
        }
        if !(self.initial_pitch.is_finite() && self.initial_pitch.abs() <= self.max_pitch)
            || !self.initial_yaw.is_finite()
        {
            return invalid("initial orientation is outside the allowed range");
        }
        if !self.movement_bounds.is_valid() {
            return invalid("movement_bounds are inverted");
        }
        if !self.spawn_position.is_finite() || !self.eye_height.is_finite() {
            return invalid("spawn position must be finite");
        }
        if self.kill_count_to_win == Some(0) {
            return invalid("kill_count_to_win must be at least 1");
        }
        if !(self.game_over_delay.is_finite() && self.game_over_delay >= 0.0) {
            return invalid("game_over_delay must not be negative");
        }
        if !(self.max_delta.is_finite() && self.max_delta > 0.0) {
            return invalid("max_delta must be positive");
        }
        Ok(())
    }
}

fn invalid(message: &str) -> Result<()> {
    Err(SessionError::Config(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.target_config().name, "linear");
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = SessionConfig::from_json(r#"{ "preset": "grid", "kill_count_to_win": 10 }"#);
        let config = config.ok();
        assert_eq!(config.as_ref().map(|c| c.preset.as_str()), Some("grid"));
        assert_eq!(config.as_ref().and_then(|c| c.kill_count_to_win), Some(10));
        assert_eq!(config.map(|c| c.max_delta), Some(0.1));
    }

    #[test]
    fn test_validation_failures() {
        let mut config = SessionConfig::default();
        config.rotation_speed = 0.0;
        assert!(matches!(config.validate(), Err(SessionError::Config(_))));

        let mut config = SessionConfig::default();
        config.movement_bounds = Rect::new(5.0, -5.0, 0.0, 1.0);
        assert!(config.validate().is_err());

        let config = SessionConfig::default().with_kill_count_to_win(0);
        assert!(config.validate().is_err());

        let mut config = SessionConfig::default();
        config.initial_pitch = f32::NAN;
        assert!(matches!(config.validate(), Err(SessionError::Config(_))));

        let mut config = SessionConfig::default();
        config.initial_pitch = config.max_pitch + 0.1;
        assert!(config.validate().is_err());

        assert!(matches!(
            SessionConfig::from_json("{ not json"),
            Err(SessionError::Parse(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = SessionConfig::default().with_preset("pyramid").with_seed(9);
        let json = config.to_json().unwrap();
        assert_eq!(SessionConfig::from_json(&json).unwrap(), config);
    }
}
