//! Tuning values for the stage, the player rotator and player movement
//!
//! Every coordinator receives its own copy at construction, so two stages (or a
//! test harness) can run with different timings side by side.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while reading or checking settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Timing of one discrete turn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationSettings {
    /// Size of one turn in degrees
    pub increment_degrees: f32,
    /// Seconds a turn takes from start to target
    pub duration: f32,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            increment_degrees: ROTATION_DEGREES,
            duration: ROTATION_DURATION,
        }
    }
}

impl RotationSettings {
    fn validate(&self) -> Result<(), SettingsError> {
        if !self.increment_degrees.is_finite() {
            return Err(SettingsError::Invalid {
                field: "increment_degrees",
                reason: "must be finite",
            });
        }
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(SettingsError::Invalid {
                field: "duration",
                reason: "must be a positive number of seconds",
            });
        }
        Ok(())
    }
}

/// Player rotator behaviour on top of the plain turn timing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerRotatorSettings {
    pub rotation: RotationSettings,
    /// Zero gravity and freeze the body while turning
    pub clamp_during_rotation: bool,
    /// Seconds the clamp is held after the turn lands
    pub grace_delay: f32,
}

impl Default for PlayerRotatorSettings {
    fn default() -> Self {
        Self {
            rotation: RotationSettings::default(),
            clamp_during_rotation: true,
            grace_delay: GRACE_DELAY,
        }
    }
}

/// Player body and lateral movement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    pub ground_acceleration: f32,
    pub air_acceleration: f32,
    pub max_speed: f32,
    pub mass: f32,
    /// Gravity scale captured as the restore point for unclamping
    pub gravity_scale: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            ground_acceleration: GROUND_ACCELERATION,
            air_acceleration: AIR_ACCELERATION,
            max_speed: MAX_SPEED,
            mass: PLAYER_MASS,
            gravity_scale: PLAYER_GRAVITY_SCALE,
        }
    }
}

/// Complete level settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub stage_rotation: RotationSettings,
    pub player_rotation: PlayerRotatorSettings,
    pub movement: MovementSettings,
    /// World gravity along Y
    pub gravity: f32,
    /// Player only turns (and clamps) while the clamp button is held
    pub clamp_button: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stage_rotation: RotationSettings::default(),
            player_rotation: PlayerRotatorSettings::default(),
            movement: MovementSettings::default(),
            gravity: GRAVITY,
            clamp_button: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_path(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every value is usable by the simulation
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.stage_rotation.validate()?;
        self.player_rotation.rotation.validate()?;

        if !(self.player_rotation.grace_delay.is_finite() && self.player_rotation.grace_delay >= 0.0) {
            return Err(SettingsError::Invalid {
                field: "grace_delay",
                reason: "must be zero or more seconds",
            });
        }

        let m = &self.movement;
        let non_negative = [
            ("ground_acceleration", m.ground_acceleration),
            ("air_acceleration", m.air_acceleration),
            ("max_speed", m.max_speed),
            ("gravity_scale", m.gravity_scale),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must be zero or positive",
                });
            }
        }
        if !(m.mass.is_finite() && m.mass > 0.0) {
            return Err(SettingsError::Invalid {
                field: "mass",
                reason: "must be positive",
            });
        }
        if !self.gravity.is_finite() {
            return Err(SettingsError::Invalid {
                field: "gravity",
                reason: "must be finite",
            });
        }
        Ok(())
    }
}
