//! The rotating stage
//!
//! Pure geometry: the stage turns about its pivot with no gravity coupling
//! and accepts a turn regardless of what the player is doing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::transition::{Direction, RotationStep, Rotator};
use crate::rotate_about;
use crate::settings::RotationSettings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    rotator: Rotator,
    /// World-space point the stage turns around
    pivot: Vec2,
    initial_orientation: f32,
}

impl Stage {
    pub fn new(pivot: Vec2, orientation: f32, settings: RotationSettings) -> Self {
        Self {
            rotator: Rotator::new(orientation, settings),
            pivot,
            initial_orientation: orientation,
        }
    }

    #[inline]
    pub fn orientation(&self) -> f32 {
        self.rotator.orientation()
    }

    #[inline]
    pub fn is_rotating(&self) -> bool {
        self.rotator.is_rotating()
    }

    pub fn pivot(&self) -> Vec2 {
        self.pivot
    }

    pub fn rotator(&self) -> &Rotator {
        &self.rotator
    }

    pub fn rotate(&mut self, direction: Direction) -> bool {
        self.rotator.rotate(direction)
    }

    pub fn rotate_left(&mut self, left: bool) -> bool {
        self.rotate(Direction::from_left(left))
    }

    pub fn tick(&mut self, dt: f32) -> RotationStep {
        self.rotator.advance(dt)
    }

    /// Cancel a turn in flight, keeping the current angle
    pub fn stop(&mut self) -> bool {
        self.rotator.stop()
    }

    /// Stage-local point to world space at the current orientation
    pub fn to_world(&self, local: Vec2) -> Vec2 {
        rotate_about(self.pivot + local, self.pivot, self.orientation())
    }

    pub fn reset(&mut self) {
        self.rotator.reset(self.initial_orientation);
    }
}
