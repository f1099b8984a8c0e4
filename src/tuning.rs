//! Data-driven game balance
//!
//! Every physics constant the simulation reads lives here so a level designer
//! can tweak feel without recompiling. Missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::BALL_RADIUS;

/// Physics and reaction constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Ball radius (pixels)
    pub ball_radius: f32,
    /// Max horizontal speed reachable by steering (pixels/s)
    pub max_speed_x: f32,
    /// Terminal falling speed (pixels/s)
    pub max_speed_y: f32,
    /// Steering acceleration (pixels/s²)
    pub accel_x: f32,
    /// Gravity (pixels/s²)
    pub accel_y: f32,
    /// Upward speed after landing on a normal, breakable or left-right block
    pub bounce_speed: f32,
    /// Upward speed after landing on a bounce block; also its side kick
    pub bounce_block_speed: f32,
    /// Vertical amplification when hitting a bounce block from below
    pub bounce_amplify: f32,
    /// Minimum outward speed after a side hit
    pub side_bounce_floor: f32,
    /// Horizontal speed while locked by a director block
    pub directed_speed: f32,
    /// Mover speed as a fraction of `max_speed_x`
    pub mover_speed_factor: f32,
    /// Extra distance a mover is pushed past the contact point
    pub mover_push_margin: f32,
    /// Gap left between a director and the ball it snaps beside it
    pub director_gap: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_radius: BALL_RADIUS,
            max_speed_x: 200.0,
            max_speed_y: 400.0,
            accel_x: 2400.0,
            accel_y: 1000.0,
            bounce_speed: 330.0,
            bounce_block_speed: 533.0,
            bounce_amplify: 1.618,
            side_bounce_floor: 100.0,
            directed_speed: 400.0,
            mover_speed_factor: 0.75,
            mover_push_margin: 0.05,
            director_gap: 0.01,
        }
    }
}

impl Tuning {
    /// Mover translation speed (pixels/s)
    #[inline]
    pub fn mover_speed(&self) -> f32 {
        self.max_speed_x * self.mover_speed_factor
    }

    /// Parse tuning from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from a JSON file, using defaults if it is missing or invalid
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning in {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read tuning {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "accel_y": 1200.0 }"#).unwrap();
        assert_eq!(tuning.accel_y, 1200.0);
        assert_eq!(tuning.max_speed_y, 400.0);
        assert_eq!(tuning.ball_radius, BALL_RADIUS);
    }

    #[test]
    fn test_mover_speed() {
        let tuning = Tuning::default();
        assert!((tuning.mover_speed() - 150.0).abs() < 0.001);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let tuning = Tuning::load("does/not/exist.json");
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Tuning::from_json("{ accel_y: }").is_err());
    }
}
