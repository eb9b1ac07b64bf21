//! The player: physics body, platform contacts, gravity clamp and lateral movement

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::contact::{ContactCounter, ContactEvent, Surface};
use super::player_rotator::GravityClamp;
use crate::settings::MovementSettings;

/// Gravity restore point plus whether it is currently suppressed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GravityState {
    /// Captured once at construction and never rewritten
    original_scale: f32,
    clamped: bool,
}

impl GravityState {
    pub fn new(original_scale: f32) -> Self {
        Self {
            original_scale,
            clamped: false,
        }
    }

    #[inline]
    pub fn original_scale(&self) -> f32 {
        self.original_scale
    }

    #[inline]
    pub fn is_clamped(&self) -> bool {
        self.clamped
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    body: Body,
    gravity: GravityState,
    /// Velocity pinned to zero and movement input ignored
    frozen: bool,
    contacts: ContactCounter,
    settings: MovementSettings,
    initial_position: Vec2,
}

impl Player {
    pub fn new(position: Vec2, settings: MovementSettings) -> Self {
        Self {
            body: Body::new(position, settings.mass, settings.gravity_scale),
            gravity: GravityState::new(settings.gravity_scale),
            frozen: false,
            contacts: ContactCounter::new(),
            settings,
            initial_position: position,
        }
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Direct body access for the physics backend (collision response, teleports)
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    #[inline]
    pub fn gravity_scale(&self) -> f32 {
        self.body.gravity_scale
    }

    pub fn gravity(&self) -> &GravityState {
        &self.gravity
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    #[inline]
    pub fn is_clamped(&self) -> bool {
        self.gravity.clamped
    }

    pub fn contacts(&self) -> &ContactCounter {
        &self.contacts
    }

    pub fn settings(&self) -> &MovementSettings {
        &self.settings
    }

    /// True while at least one platform collider touches the player
    #[inline]
    pub fn on_platform(&self) -> bool {
        self.contacts.grounded()
    }

    pub fn on_contact_begin(&mut self, other: &impl Surface) {
        self.contacts.on_contact_begin(other);
    }

    pub fn on_contact_end(&mut self, other: &impl Surface) {
        self.contacts.on_contact_end(other);
    }

    pub fn apply_contact<S: Surface>(&mut self, event: &ContactEvent<S>) {
        self.contacts.apply(event);
    }

    /// Push sideways with `direction` in [-1, 1], then cap lateral speed.
    ///
    /// Ground or air acceleration is picked from the contact count. The
    /// vertical velocity is left alone. Ignored while frozen.
    pub fn move_lateral(&mut self, direction: f32) {
        if self.frozen {
            return;
        }

        let direction = direction.clamp(-1.0, 1.0);
        let accel = if self.on_platform() {
            self.settings.ground_acceleration
        } else {
            self.settings.air_acceleration
        };
        self.body.add_force(Vec2::new(accel * direction, 0.0));

        let max = self.settings.max_speed;
        self.body.velocity.x = self.body.velocity.x.clamp(-max, max);
    }

    /// Integrate the body for one tick
    pub fn step(&mut self, dt: f32, gravity: f32) {
        if self.frozen {
            self.body.clear_forces();
            self.body.velocity.x = 0.0;
        }
        self.body.step(dt, gravity);
    }

    /// Teleport back to the spawn point with gravity and freeze released.
    ///
    /// Contacts are left to the physics backend, which reports the exits and
    /// enters caused by the teleport.
    pub fn reset(&mut self) {
        self.body.position = self.initial_position;
        self.body.velocity = Vec2::ZERO;
        self.body.clear_forces();
        self.unclamp();
        self.unfreeze();
    }
}

impl GravityClamp for Player {
    fn clamp(&mut self) {
        if self.gravity.clamped {
            return;
        }
        self.gravity.clamped = true;
        self.body.gravity_scale = 0.0;
    }

    fn unclamp(&mut self) {
        self.gravity.clamped = false;
        self.body.gravity_scale = self.gravity.original_scale;
    }

    fn freeze(&mut self) {
        self.frozen = true;
        self.body.velocity = Vec2::ZERO;
        self.body.clear_forces();
    }

    fn unfreeze(&mut self) {
        self.frozen = false;
    }
}
