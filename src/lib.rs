//! Pivot Platformer - a stage that turns in fixed steps around a pivot
//!
//! Core modules:
//! - `sim`: Deterministic simulation (rotation transitions, player body, contacts, level tick)
//! - `settings`: Injectable tuning for every coordinator

pub mod settings;
pub mod sim;

pub use settings::{MovementSettings, PlayerRotatorSettings, RotationSettings, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per physics frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Size of one discrete turn (degrees)
    pub const ROTATION_DEGREES: f32 = 60.0;
    /// Time a single turn takes to play out (seconds)
    pub const ROTATION_DURATION: f32 = 0.5;
    /// Clamp hold after the player's turn finishes (seconds)
    pub const GRACE_DELAY: f32 = 0.5;

    /// World gravity (units/s², pointing down)
    pub const GRAVITY: f32 = -9.81;

    /// Player movement defaults
    pub const GROUND_ACCELERATION: f32 = 40.0;
    pub const AIR_ACCELERATION: f32 = 15.0;
    pub const MAX_SPEED: f32 = 5.0;
    pub const PLAYER_MASS: f32 = 1.0;
    pub const PLAYER_GRAVITY_SCALE: f32 = 1.0;
}

/// Normalized angle to [0, 360) degrees
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit vector for an orientation given in degrees (0° = +X, clockwise positive)
#[inline]
pub fn heading(degrees: f32) -> Vec2 {
    Vec2::from_angle(-degrees.to_radians())
}

/// Rotate a point around a pivot by the given angle in degrees
#[inline]
pub fn rotate_about(point: Vec2, pivot: Vec2, degrees: f32) -> Vec2 {
    pivot + heading(degrees).rotate(point - pivot)
}
