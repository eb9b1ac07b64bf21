//! Timed rotation transitions
//!
//! A [`Rotator`] owns an orientation (degrees, unbounded) and drives at most one
//! [`RotationTransition`] at a time. Progress is pushed by the caller with the
//! frame delta; nothing runs in the background.
//!
//! Orientation only ever turns about one axis, so spherical interpolation
//! between the start and target rotations reduces to a linear sweep of the
//! angle. That keeps the sweep monotonic and lets completion land on the
//! target value bit for bit.

use serde::{Deserialize, Serialize};

use crate::settings::RotationSettings;

/// Which way a turn goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Counter-clockwise, negative increment
    Left,
    /// Clockwise, positive increment
    Right,
}

impl Direction {
    /// Map the `left` flag used by input code
    pub fn from_left(left: bool) -> Self {
        if left { Direction::Left } else { Direction::Right }
    }

    /// Signed multiplier for the rotation increment
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// One in-flight turn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationTransition {
    pub start: f32,
    pub target: f32,
    pub elapsed: f32,
    pub duration: f32,
}

impl RotationTransition {
    pub fn new(start: f32, direction: Direction, settings: &RotationSettings) -> Self {
        Self {
            start,
            target: start + direction.sign() * settings.increment_degrees,
            elapsed: 0.0,
            duration: settings.duration,
        }
    }

    /// Interpolation fraction in [0, 1]
    #[inline]
    pub fn fraction(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Orientation at the current fraction
    pub fn angle(&self) -> f32 {
        let t = self.fraction();
        if t >= 1.0 {
            self.target
        } else {
            self.start + (self.target - self.start) * t
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Push time forward and return the new orientation
    fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed += dt.max(0.0);
        self.angle()
    }
}

/// Rotator state machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RotationPhase {
    Idle,
    Rotating(RotationTransition),
}

/// Outcome of advancing a rotator by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationStep {
    /// No transition was active
    Idle,
    /// Transition moved but has time left
    Progressed,
    /// Transition reached its target during this tick
    Completed,
}

/// Orientation plus its (optional) active transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rotator {
    orientation: f32,
    phase: RotationPhase,
    settings: RotationSettings,
}

impl Rotator {
    pub fn new(orientation: f32, settings: RotationSettings) -> Self {
        Self {
            orientation,
            phase: RotationPhase::Idle,
            settings,
        }
    }

    /// Current orientation in degrees
    #[inline]
    pub fn orientation(&self) -> f32 {
        self.orientation
    }

    #[inline]
    pub fn is_rotating(&self) -> bool {
        matches!(self.phase, RotationPhase::Rotating(_))
    }

    pub fn phase(&self) -> RotationPhase {
        self.phase
    }

    pub fn transition(&self) -> Option<&RotationTransition> {
        match &self.phase {
            RotationPhase::Rotating(transition) => Some(transition),
            RotationPhase::Idle => None,
        }
    }

    pub fn settings(&self) -> &RotationSettings {
        &self.settings
    }

    /// Start a turn. Requests made while a turn is in flight are dropped.
    ///
    /// Returns whether the request was accepted.
    pub fn rotate(&mut self, direction: Direction) -> bool {
        if self.is_rotating() {
            log::trace!("Rotation {:?} dropped, already rotating", direction);
            return false;
        }

        let transition = RotationTransition::new(self.orientation, direction, &self.settings);
        log::debug!(
            "Rotation {:?} started: {} -> {} over {}s",
            direction,
            transition.start,
            transition.target,
            transition.duration
        );
        self.phase = RotationPhase::Rotating(transition);
        true
    }

    /// Advance the active transition by `dt` seconds
    pub fn advance(&mut self, dt: f32) -> RotationStep {
        let RotationPhase::Rotating(transition) = &mut self.phase else {
            return RotationStep::Idle;
        };

        self.orientation = transition.advance(dt);
        if transition.is_finished() {
            log::debug!("Rotation completed at {}", self.orientation);
            self.phase = RotationPhase::Idle;
            RotationStep::Completed
        } else {
            RotationStep::Progressed
        }
    }

    /// Cancel the active transition, leaving orientation where it is.
    ///
    /// Returns whether a transition was cancelled.
    pub fn stop(&mut self) -> bool {
        if !self.is_rotating() {
            return false;
        }
        log::debug!("Rotation cancelled at {}", self.orientation);
        self.phase = RotationPhase::Idle;
        true
    }

    /// Drop any transition and overwrite the orientation
    pub fn reset(&mut self, orientation: f32) {
        self.phase = RotationPhase::Idle;
        self.orientation = orientation;
    }
}
