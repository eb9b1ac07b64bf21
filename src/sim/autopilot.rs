//! Idle/demo mode input
//!
//! A seeded generator of [`TickInput`] that walks around and turns the stage
//! now and then. Same seed, same inputs.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::level::{LevelState, TickInput};

/// What the autopilot is currently trying to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    Wait,
    Walk { left: bool },
    Turn { left: bool },
}

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    intent: Intent,
    /// Ticks left on the current intent
    hold_ticks: u32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            intent: Intent::Wait,
            hold_ticks: 0,
        }
    }

    /// Input for the next tick
    pub fn next_input(&mut self, state: &LevelState) -> TickInput {
        if self.hold_ticks == 0 {
            self.pick_intent(state);
        }
        self.hold_ticks = self.hold_ticks.saturating_sub(1);

        let clamp_held = state.settings.clamp_button;
        match self.intent {
            Intent::Wait => TickInput::default(),
            Intent::Walk { left } => TickInput {
                move_left: left,
                move_right: !left,
                ..Default::default()
            },
            Intent::Turn { left } => TickInput {
                rotate_left: left,
                rotate_right: !left,
                clamp_held,
                ..Default::default()
            },
        }
    }

    fn pick_intent(&mut self, state: &LevelState) {
        let left = self.rng.random_bool(0.5);
        let roll = self.rng.random_range(0..100);

        // Only ask for a turn when it would be accepted, and tap it for one tick
        let can_turn = !state.stage.is_rotating() && !state.player_rotator.is_rotating();
        (self.intent, self.hold_ticks) = if can_turn && roll < 25 {
            (Intent::Turn { left }, 1)
        } else if roll < 70 {
            (Intent::Walk { left }, self.rng.random_range(10..60))
        } else {
            (Intent::Wait, self.rng.random_range(5..30))
        };
        log::trace!("Autopilot intent {:?} for {} ticks", self.intent, self.hold_ticks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;

    #[test]
    fn test_same_seed_same_inputs() {
        let state = LevelState::new(Settings::default());
        let mut a = Autopilot::new(42);
        let mut b = Autopilot::new(42);
        for _ in 0..500 {
            assert_eq!(a.next_input(&state), b.next_input(&state));
        }
    }

    #[test]
    fn test_eventually_turns() {
        let state = LevelState::new(Settings::default());
        let mut pilot = Autopilot::new(7);
        let turned = (0..5_000).any(|_| {
            let input = pilot.next_input(&state);
            input.rotate_left || input.rotate_right
        });
        assert!(turned);
    }

    #[test]
    fn test_never_turns_while_stage_turning() {
        let mut state = LevelState::new(Settings::default());
        state.stage.rotate_left(true);
        let mut pilot = Autopilot::new(3);
        for _ in 0..2_000 {
            let input = pilot.next_input(&state);
            assert!(!input.rotate_left && !input.rotate_right);
        }
    }
}
