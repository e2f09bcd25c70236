//! Tuning constants for the gate level
//!
//! Every field has a default, so a RON override only needs the values it changes.

use serde::{Deserialize, Serialize};
use crate::rasterizer::Vec3;
use super::input::MoveTuning;

/// Per-tick tuning (units are world units per tick unless noted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Subtracted from vertical velocity every tick
    pub gravity: f32,
    /// Horizontal speed while a direction key is held
    pub move_speed: f32,
    /// Vertical velocity set by a grounded jump
    pub jump_speed: f32,
    /// Horizontal velocity multiplier when no direction is held
    pub damping: f32,
    /// Distance below which a visible collectible is picked up
    pub pickup_radius: f32,
    /// Distance to the finish platform center that completes the level
    pub finish_radius: f32,
    /// Seconds between reaching the finish and the completion notification
    pub completion_delay: f64,
    /// Seconds between the completion notification and the switch to the dashboard
    pub page_switch_delay: f64,
    /// Collectible spin per tick (radians)
    pub collectible_spin: f32,
    /// Height of the cosmetic collectible bob
    pub bob_amplitude: f32,
    /// Camera position relative to the character
    pub camera_offset: Vec3,
    /// 0.0 snaps the camera every frame; values toward 1.0 ease it in
    pub camera_smoothing: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            gravity: 0.015,
            move_speed: 0.1,
            jump_speed: 0.3,
            damping: 0.9,
            pickup_radius: 0.8,
            finish_radius: 2.0,
            completion_delay: 2.0,
            page_switch_delay: 2.0,
            collectible_spin: 0.05,
            bob_amplitude: 0.01,
            camera_offset: Vec3::new(0.0, 5.0, 10.0),
            camera_smoothing: 0.0,
        }
    }
}

impl GameSettings {
    /// Parse settings from RON, filling missing fields with defaults
    pub fn from_ron(s: &str) -> Result<Self, ron::error::SpannedError> {
        let mut settings: GameSettings = ron::from_str(s)?;
        settings.camera_smoothing = settings.camera_smoothing.clamp(0.0, 0.99);
        Ok(settings)
    }

    pub fn move_tuning(&self) -> MoveTuning {
        MoveTuning {
            move_speed: self.move_speed,
            jump_speed: self.jump_speed,
            damping: self.damping,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let settings = GameSettings::from_ron("(gravity: 0.02, camera_smoothing: 4.0)").unwrap();
        assert_eq!(settings.gravity, 0.02);
        assert_eq!(settings.camera_smoothing, 0.99);
        assert_eq!(settings.jump_speed, 0.3);
        assert_eq!(settings.camera_offset, Vec3::new(0.0, 5.0, 10.0));
    }

    #[test]
    fn test_bad_ron_is_an_error() {
        assert!(GameSettings::from_ron("(gravity: \"heavy\")").is_err());
    }
}
