//! Player turns, coupled to the body's gravity
//!
//! While the player turns in place its body is clamped (no gravity) and
//! frozen (no velocity, no movement input). After the turn lands the clamp is
//! held a little longer so gravity does not kick in on the exact frame the
//! player meets the rotated terrain.

use serde::{Deserialize, Serialize};

use super::transition::{Direction, RotationStep, Rotator};
use crate::settings::PlayerRotatorSettings;

/// Suppression of gravity and motion on a body
pub trait GravityClamp {
    /// Zero gravity. Repeated calls keep the original restore point.
    fn clamp(&mut self);
    /// Restore gravity to the value captured at construction
    fn unclamp(&mut self);
    /// Zero velocity and ignore movement input
    fn freeze(&mut self);
    fn unfreeze(&mut self);
}

/// Player rotator state machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayerRotationPhase {
    Idle,
    /// A turn is animating; `clamped` when this turn applied clamp + freeze
    Rotating { clamped: bool },
    /// Turn finished, clamp + freeze held for `remaining` seconds
    PostRotationHold { remaining: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRotator {
    rotator: Rotator,
    phase: PlayerRotationPhase,
    settings: PlayerRotatorSettings,
    initial_orientation: f32,
}

impl PlayerRotator {
    pub fn new(orientation: f32, settings: PlayerRotatorSettings) -> Self {
        Self {
            rotator: Rotator::new(orientation, settings.rotation),
            phase: PlayerRotationPhase::Idle,
            settings,
            initial_orientation: orientation,
        }
    }

    #[inline]
    pub fn orientation(&self) -> f32 {
        self.rotator.orientation()
    }

    /// True exactly while the turn animates (not during the hold)
    #[inline]
    pub fn is_rotating(&self) -> bool {
        self.rotator.is_rotating()
    }

    pub fn phase(&self) -> PlayerRotationPhase {
        self.phase
    }

    pub fn rotator(&self) -> &Rotator {
        &self.rotator
    }

    pub fn settings(&self) -> &PlayerRotatorSettings {
        &self.settings
    }

    /// Start a turn. Dropped while a turn is animating.
    ///
    /// A request during the post-rotation hold is accepted: the hold is
    /// abandoned and the new turn takes over the clamp.
    pub fn rotate(&mut self, direction: Direction, body: &mut impl GravityClamp) -> bool {
        if !self.rotator.rotate(direction) {
            return false;
        }

        let clamped = self.settings.clamp_during_rotation;
        if clamped {
            body.clamp();
            body.freeze();
        } else if matches!(self.phase, PlayerRotationPhase::PostRotationHold { .. }) {
            Self::release(body);
        }
        self.phase = PlayerRotationPhase::Rotating { clamped };
        true
    }

    pub fn rotate_left(&mut self, left: bool, body: &mut impl GravityClamp) -> bool {
        self.rotate(Direction::from_left(left), body)
    }

    /// Advance the turn or the hold by `dt` seconds
    pub fn tick(&mut self, dt: f32, body: &mut impl GravityClamp) {
        match self.phase {
            PlayerRotationPhase::Idle => {}
            PlayerRotationPhase::Rotating { clamped } => {
                if self.rotator.advance(dt) != RotationStep::Completed {
                    return;
                }
                if !clamped {
                    self.phase = PlayerRotationPhase::Idle;
                } else if self.settings.grace_delay > 0.0 {
                    self.phase = PlayerRotationPhase::PostRotationHold {
                        remaining: self.settings.grace_delay,
                    };
                } else {
                    Self::release(body);
                    self.phase = PlayerRotationPhase::Idle;
                }
            }
            PlayerRotationPhase::PostRotationHold { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    log::debug!("Post-rotation hold over, releasing clamp");
                    Self::release(body);
                    self.phase = PlayerRotationPhase::Idle;
                } else {
                    self.phase = PlayerRotationPhase::PostRotationHold { remaining };
                }
            }
        }
    }

    /// Abandon the turn (or its hold) where it stands and restore gravity now.
    ///
    /// Orientation keeps its interpolated value. No-op when idle.
    pub fn stop_rotation(&mut self, body: &mut impl GravityClamp) {
        if self.phase == PlayerRotationPhase::Idle {
            return;
        }
        self.rotator.stop();
        self.phase = PlayerRotationPhase::Idle;
        Self::release(body);
    }

    /// Release clamp + freeze without touching an animating turn
    pub fn stop_clamp(&mut self, body: &mut impl GravityClamp) {
        self.phase = match self.phase {
            PlayerRotationPhase::Rotating { .. } => PlayerRotationPhase::Rotating { clamped: false },
            PlayerRotationPhase::Idle | PlayerRotationPhase::PostRotationHold { .. } => {
                PlayerRotationPhase::Idle
            }
        };
        Self::release(body);
    }

    /// Back to the spawn orientation with nothing in flight.
    ///
    /// The body is reset separately; this does not touch its clamp.
    pub fn reset(&mut self) {
        self.rotator.reset(self.initial_orientation);
        self.phase = PlayerRotationPhase::Idle;
    }

    fn release(body: &mut impl GravityClamp) {
        body.unclamp();
        body.unfreeze();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records clamp state the way a body would
    #[derive(Debug, Default)]
    struct Probe {
        clamped: bool,
        frozen: bool,
        clamp_calls: u32,
        unclamp_calls: u32,
    }

    impl GravityClamp for Probe {
        fn clamp(&mut self) {
            self.clamped = true;
            self.clamp_calls += 1;
        }
        fn unclamp(&mut self) {
            self.clamped = false;
            self.unclamp_calls += 1;
        }
        fn freeze(&mut self) {
            self.frozen = true;
        }
        fn unfreeze(&mut self) {
            self.frozen = false;
        }
    }

    fn rotator() -> PlayerRotator {
        PlayerRotator::new(0.0, PlayerRotatorSettings::default())
    }

    #[test]
    fn test_clamp_held_through_grace_delay() {
        let mut r = rotator();
        let mut body = Probe::default();

        assert!(r.rotate(Direction::Left, &mut body));
        assert!(body.clamped && body.frozen);

        r.tick(0.25, &mut body);
        assert!(r.is_rotating());
        assert!((r.orientation() + 30.0).abs() < 1e-4);

        r.tick(0.25, &mut body);
        assert!(!r.is_rotating());
        assert_eq!(r.orientation(), -60.0);
        assert!(body.clamped && body.frozen, "clamp released before grace delay");
        assert!(matches!(r.phase(), PlayerRotationPhase::PostRotationHold { .. }));

        r.tick(0.25, &mut body);
        assert!(body.clamped);

        r.tick(0.25, &mut body);
        assert!(!body.clamped && !body.frozen);
        assert_eq!(r.phase(), PlayerRotationPhase::Idle);
    }

    #[test]
    fn test_rotate_while_rotating_dropped() {
        let mut r = rotator();
        let mut body = Probe::default();
        r.rotate(Direction::Right, &mut body);
        r.tick(0.125, &mut body);
        assert!(!r.rotate(Direction::Left, &mut body));
        assert_eq!(body.clamp_calls, 1);

        for _ in 0..3 {
            r.tick(0.125, &mut body);
        }
        assert_eq!(r.orientation(), 60.0);
    }

    #[test]
    fn test_rotate_during_hold_restarts() {
        let mut r = rotator();
        let mut body = Probe::default();
        r.rotate(Direction::Right, &mut body);
        r.tick(0.5, &mut body);
        assert!(matches!(r.phase(), PlayerRotationPhase::PostRotationHold { .. }));

        assert!(r.rotate(Direction::Right, &mut body));
        assert!(r.is_rotating());
        assert!(body.clamped);
        assert_eq!(body.unclamp_calls, 0);

        r.tick(0.5, &mut body);
        assert_eq!(r.orientation(), 120.0);
    }

    #[test]
    fn test_stop_rotation_restores_without_snapping() {
        let mut r = rotator();
        let mut body = Probe::default();
        r.rotate(Direction::Right, &mut body);
        r.tick(0.2, &mut body);
        let angle = r.orientation();

        r.stop_rotation(&mut body);
        assert!(!r.is_rotating());
        assert_eq!(r.orientation(), angle);
        assert!(!body.clamped && !body.frozen);

        r.tick(1.0, &mut body);
        assert_eq!(r.orientation(), angle);
    }

    #[test]
    fn test_stop_rotation_during_hold_skips_delay() {
        let mut r = rotator();
        let mut body = Probe::default();
        r.rotate(Direction::Left, &mut body);
        r.tick(0.5, &mut body);
        assert!(body.clamped);

        r.stop_rotation(&mut body);
        assert!(!body.clamped);
        assert_eq!(r.phase(), PlayerRotationPhase::Idle);
        assert_eq!(r.orientation(), -60.0);
    }

    #[test]
    fn test_stop_rotation_when_idle_is_noop() {
        let mut r = rotator();
        let mut body = Probe::default();
        r.stop_rotation(&mut body);
        assert_eq!(body.unclamp_calls, 0);
    }

    #[test]
    fn test_stop_clamp_keeps_turn_animating() {
        let mut r = rotator();
        let mut body = Probe::default();
        r.rotate(Direction::Right, &mut body);
        r.tick(0.125, &mut body);

        r.stop_clamp(&mut body);
        assert!(r.is_rotating());
        assert!(!body.clamped && !body.frozen);

        // Finishing the turn no longer enters a hold
        r.tick(0.375, &mut body);
        assert_eq!(r.orientation(), 60.0);
        assert_eq!(r.phase(), PlayerRotationPhase::Idle);
        assert!(!body.clamped);
    }

    #[test]
    fn test_no_clamp_variant() {
        let settings = PlayerRotatorSettings {
            clamp_during_rotation: false,
            ..Default::default()
        };
        let mut r = PlayerRotator::new(0.0, settings);
        let mut body = Probe::default();
        r.rotate(Direction::Right, &mut body);
        assert!(!body.clamped && !body.frozen);
        r.tick(0.5, &mut body);
        assert_eq!(r.phase(), PlayerRotationPhase::Idle);
        assert_eq!(body.clamp_calls, 0);
    }

    #[test]
    fn test_zero_grace_delay_releases_on_completion() {
        let settings = PlayerRotatorSettings {
            grace_delay: 0.0,
            ..Default::default()
        };
        let mut r = PlayerRotator::new(0.0, settings);
        let mut body = Probe::default();
        r.rotate(Direction::Left, &mut body);
        r.tick(0.5, &mut body);
        assert!(!body.clamped);
        assert_eq!(r.phase(), PlayerRotationPhase::Idle);
    }

    #[test]
    fn test_reset_returns_to_spawn_orientation() {
        let mut r = PlayerRotator::new(60.0, PlayerRotatorSettings::default());
        let mut body = Probe::default();
        r.rotate(Direction::Right, &mut body);
        r.tick(0.3, &mut body);
        r.reset();
        assert_eq!(r.orientation(), 60.0);
        assert!(!r.is_rotating());
        assert_eq!(r.phase(), PlayerRotationPhase::Idle);
    }
}
