//! Game balance tuning
//!
//! Defaults come from [`crate::consts`]; a JSON file may override any subset
//! of the fields.

use std::path::{Path, PathBuf};

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{Player, SpeedBand};

#[derive(Error, Debug)]
pub enum TuningError {
    #[error("cannot read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Tunable game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Pixels per tick at full speed
    pub player_speed: f64,
    pub player_radius: f64,

    // === Movers ===
    /// Speed lost or gained by a mover on each bounce
    pub collision_speed_change: f64,
    pub ball_speed: SpeedBand,
    pub pusher_speed: f64,

    // === Arena ===
    pub corner_size: f64,

    /// Step scale while slow motion is active (0.0 - 1.0)
    pub slow_motion_factor: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            player_radius: PLAYER_RADIUS,

            collision_speed_change: COLLISION_SPEED_CHANGE,
            ball_speed: SpeedBand::new(GAMEBALL_MIN_SPEED, GAMEBALL_MAX_SPEED),
            pusher_speed: PUSHER_SPEED,

            corner_size: CORNER_SIZE,

            slow_motion_factor: SLOW_MOTION_FACTOR,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.player_speed > 0.0) {
            return Err(TuningError::Invalid(format!(
                "player_speed must be positive, got {}",
                self.player_speed
            )));
        }
        if !(self.player_radius > 0.0) {
            return Err(TuningError::Invalid(format!(
                "player_radius must be positive, got {}",
                self.player_radius
            )));
        }
        if !(self.collision_speed_change >= 0.0) {
            return Err(TuningError::Invalid(format!(
                "collision_speed_change must not be negative, got {}",
                self.collision_speed_change
            )));
        }
        let band = self.ball_speed;
        if !(band.min > 0.0 && band.min <= band.max) {
            return Err(TuningError::Invalid(format!(
                "ball_speed band {}..{} must be positive and ordered",
                band.min, band.max
            )));
        }
        if !(self.pusher_speed > 0.0) {
            return Err(TuningError::Invalid(format!(
                "pusher_speed must be positive, got {}",
                self.pusher_speed
            )));
        }
        if !(self.corner_size >= 0.0) {
            return Err(TuningError::Invalid(format!(
                "corner_size must not be negative, got {}",
                self.corner_size
            )));
        }
        if !(2.0 * self.spawn_margin() < ARENA_WIDTH.min(ARENA_HEIGHT)) {
            return Err(TuningError::Invalid(format!(
                "corner_size {} leaves no room to spawn in a {}x{} arena",
                self.corner_size, ARENA_WIDTH, ARENA_HEIGHT
            )));
        }
        if !(self.slow_motion_factor > 0.0 && self.slow_motion_factor <= 1.0) {
            return Err(TuningError::Invalid(format!(
                "slow_motion_factor must be in (0, 1], got {}",
                self.slow_motion_factor
            )));
        }
        Ok(())
    }

    /// A player at `pos` with the tuned speed and size
    pub fn player(&self, pos: DVec2) -> Player {
        Player {
            pos,
            radius: self.player_radius,
            speed: self.player_speed,
        }
    }

    /// Distance from the arena edges kept clear when spawning movers
    pub fn spawn_margin(&self) -> f64 {
        self.corner_size + GAMEBALL_MAX_RADIUS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.player_speed, 4.2);
        assert_eq!(tuning.ball_speed, SpeedBand::new(2.4, 3.8));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "player_speed": 6.0 }"#).expect("valid json");
        assert_eq!(tuning.player_speed, 6.0);
        assert_eq!(tuning.corner_size, CORNER_SIZE);
    }

    #[test]
    fn test_json_round_trip() {
        let mut tuning = Tuning::default();
        tuning.ball_speed = SpeedBand::new(1.0, 5.0);
        let json = tuning.to_json().expect("serializes");
        assert_eq!(Tuning::from_json(&json).expect("parses"), tuning);
    }

    #[test]
    fn test_malformed_json() {
        let err = Tuning::from_json("{ player_speed: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Tuning::from_json(r#"{ "player_speed": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let err = Tuning::from_json(r#"{ "ball_speed": { "min": 4.0, "max": 3.0 } }"#).unwrap_err();
        assert!(err.to_string().contains("ball_speed"));

        let err = Tuning::from_json(r#"{ "slow_motion_factor": 1.5 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_corner_size_must_leave_spawn_room() {
        let err = Tuning::from_json(r#"{ "corner_size": 300.0 }"#).unwrap_err();
        assert!(err.to_string().contains("corner_size"));

        // Margins of 269 + 30 on both sides still leave a sliver of the 600 high arena
        let tuning = Tuning::from_json(r#"{ "corner_size": 269.0 }"#).expect("fits");
        assert!(2.0 * tuning.spawn_margin() < ARENA_HEIGHT);
        assert!(Tuning::from_json(r#"{ "corner_size": 270.0 }"#).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Tuning::load("/nonexistent/dodge-arena-tuning.json").unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
    }

    #[test]
    fn test_player_from_tuning() {
        let tuning = Tuning {
            player_speed: 3.0,
            ..Tuning::default()
        };
        let player = tuning.player(DVec2::new(1.0, 2.0));
        assert_eq!(player.speed, 3.0);
        assert_eq!(player.radius, PLAYER_RADIUS);
    }
}
