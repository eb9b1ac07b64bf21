//! Minimal 2D rigid body for the player
//!
//! Forces accumulate until the next `step`, like a physics engine's
//! add-force call. There is no collision response here; contacts come in
//! as events from outside.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Multiplier on world gravity (0 = weightless)
    pub gravity_scale: f32,
    pub mass: f32,
    /// Force accumulated since the last step
    #[serde(skip)]
    force: Vec2,
}

impl Body {
    pub fn new(position: Vec2, mass: f32, gravity_scale: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            gravity_scale,
            mass,
            force: Vec2::ZERO,
        }
    }

    /// Queue a force for the next step
    #[inline]
    pub fn add_force(&mut self, force: Vec2) {
        self.force += force;
    }

    #[inline]
    pub fn pending_force(&self) -> Vec2 {
        self.force
    }

    pub fn clear_forces(&mut self) {
        self.force = Vec2::ZERO;
    }

    /// Semi-implicit Euler step under gravity along Y
    pub fn step(&mut self, dt: f32, gravity: f32) {
        let accel = self.force / self.mass + Vec2::new(0.0, gravity * self.gravity_scale);
        self.velocity += accel * dt;
        self.position += self.velocity * dt;
        self.force = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_scale_zero_floats() {
        let mut body = Body::new(Vec2::ZERO, 1.0, 0.0);
        body.step(0.5, -10.0);
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(body.position, Vec2::ZERO);
    }

    #[test]
    fn test_force_applies_once() {
        let mut body = Body::new(Vec2::ZERO, 2.0, 0.0);
        body.add_force(Vec2::new(4.0, 0.0));
        body.step(0.5, 0.0);
        assert_eq!(body.velocity, Vec2::new(1.0, 0.0));
        assert_eq!(body.pending_force(), Vec2::ZERO);

        body.step(0.5, 0.0);
        assert_eq!(body.velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_gravity_scale_applies() {
        let mut body = Body::new(Vec2::ZERO, 1.0, 2.0);
        body.step(0.5, -10.0);
        assert_eq!(body.velocity, Vec2::new(0.0, -10.0));
    }
}
