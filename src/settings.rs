//! World configuration
//!
//! JSON via serde. Missing fields fall back to the defaults, which reproduce
//! the stock 1080 x 720 arena.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// World and economy tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    /// Width in pixels
    pub world_width: u32,
    /// Height in pixels
    pub world_height: u32,
    /// Edge length of a grid tile (pixels)
    pub tile_size: f32,
    /// Seed for ball launch directions
    pub seed: u64,

    // === Balls ===
    pub starting_balls: u32,
    /// Where new balls appear
    pub spawn: (f32, f32),
    pub ball_speed: u32,
    pub ball_damage: u64,
    pub ball_radius: f32,

    // === Input ===
    /// Damage of a direct click on a brick
    pub click_power: u64,

    // === Shop ===
    pub ball_cost: u64,
    pub ball_cost_mult: f64,
    pub ball_level_cost: u64,
    pub ball_level_cost_mult: f64,
    /// Paid in broken bricks
    pub speed_upgrade_cost: u64,
    pub speed_upgrade_level_req: u32,
    pub speed_upgrade_amount: u32,
    /// Repeatable damage special, paid in broken bricks
    pub special_damage_cost: u64,
    /// Ball tier that unlocks the special
    pub special_damage_tier_req: u32,
    pub special_damage_amount: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            tile_size: TILE_SIZE,
            seed: 0x5eed,

            starting_balls: STARTING_BALLS,
            spawn: BALL_SPAWN,
            ball_speed: BALL_SPEED,
            ball_damage: BALL_DAMAGE,
            ball_radius: BALL_RADIUS,

            click_power: CLICK_POWER,

            ball_cost: 25,
            ball_cost_mult: 1.3,
            ball_level_cost: 100,
            ball_level_cost_mult: 1.5,
            speed_upgrade_cost: 100,
            speed_upgrade_level_req: 5,
            speed_upgrade_amount: 2,
            special_damage_cost: 50,
            special_damage_tier_req: 3,
            special_damage_amount: 1,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {e}; using defaults", path.display());
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
        let settings = Settings::from_json(r#"{ "seed": 7, "starting_balls": 2 }"#)
            .expect("valid settings");
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.starting_balls, 2);
        assert_eq!(settings.world_width, WORLD_WIDTH);
        assert_eq!(settings.tile_size, TILE_SIZE);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            ball_speed: 9,
            ..Settings::default()
        };
        let json = settings.to_json().expect("serializable");
        assert_eq!(Settings::from_json(&json).expect("parses"), settings);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Settings::from_json(r#"{ "seed": "nope" }"#).is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load(Some(Path::new("/definitely/not/here.json")));
        assert_eq!(settings, Settings::default());
        assert_eq!(Settings::load(None), Settings::default());
    }
}
