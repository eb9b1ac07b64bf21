//! Level state and the fixed-timestep tick
//!
//! Everything advances from one tick in a fixed order:
//! 1. reset request
//! 2. turn requests (stage always, player only when grounded)
//! 3. clamp button
//! 4. lateral movement
//! 5. cancel the player's turn when airborne
//! 6. advance stage and player transitions
//! 7. integrate the player body

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::contact::{ContactEvent, ContactSource, Surface};
use super::player::Player;
use super::player_rotator::{GravityClamp, PlayerRotator};
use super::stage::Stage;
use super::transition::Direction;
use super::victory::VictoryZone;
use crate::settings::Settings;

/// Where the player spawns relative to the stage pivot
pub const DEFAULT_SPAWN: Vec2 = Vec2::new(0.0, 1.0);

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Turn counter-clockwise (wins over `rotate_right`)
    pub rotate_left: bool,
    pub rotate_right: bool,
    /// Walk left (wins over `move_right`)
    pub move_left: bool,
    pub move_right: bool,
    /// Clamp button (only meaningful in clamp-button mode)
    pub clamp_held: bool,
    /// Restart the level
    pub reset: bool,
}

impl TickInput {
    fn rotation(&self) -> Option<Direction> {
        if self.rotate_left {
            Some(Direction::Left)
        } else if self.rotate_right {
            Some(Direction::Right)
        } else {
            None
        }
    }

    fn lateral(&self) -> f32 {
        if self.move_left {
            -1.0
        } else if self.move_right {
            1.0
        } else {
            0.0
        }
    }
}

/// Complete level state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelState {
    pub settings: Settings,
    pub stage: Stage,
    pub player: Player,
    pub player_rotator: PlayerRotator,
    pub goal: VictoryZone,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl LevelState {
    /// Stage pivot at the origin, player at [`DEFAULT_SPAWN`]
    pub fn new(settings: Settings) -> Self {
        Self::with_layout(settings, Vec2::ZERO, DEFAULT_SPAWN)
    }

    pub fn with_layout(settings: Settings, pivot: Vec2, spawn: Vec2) -> Self {
        Self {
            stage: Stage::new(pivot, 0.0, settings.stage_rotation),
            player: Player::new(spawn, settings.movement),
            player_rotator: PlayerRotator::new(0.0, settings.player_rotation),
            goal: VictoryZone::new(),
            time_ticks: 0,
            settings,
        }
    }

    pub fn apply_contact<S: Surface>(&mut self, event: &ContactEvent<S>) {
        self.player.apply_contact(event);
    }

    /// Feed every pending contact event from the physics backend
    pub fn pump_contacts(&mut self, source: &mut impl ContactSource) {
        for event in source.drain_contacts() {
            self.player.apply_contact(&event);
        }
    }

    /// Something overlapped the goal volume
    pub fn enter_trigger(&mut self, other: &impl Surface) {
        self.goal.on_trigger_enter(other);
    }

    /// Polled by the presentation layer once per frame
    pub fn victory(&self) -> bool {
        self.goal.victory()
    }

    /// Player back to spawn, stage back to its starting angle, goal cleared
    pub fn reset(&mut self) {
        log::info!("Level reset after {} ticks", self.time_ticks);
        self.player.reset();
        self.stage.reset();
        self.player_rotator.reset();
        self.goal.reset();
    }
}

/// Advance the level by one fixed timestep
pub fn tick(state: &mut LevelState, input: &TickInput, dt: f32) {
    if input.reset {
        state.reset();
        return;
    }

    let grounded = state.player.on_platform();
    let clamp_mode = state.settings.clamp_button;

    if let Some(direction) = input.rotation() {
        state.stage.rotate(direction);
        if grounded && (!clamp_mode || input.clamp_held) {
            state.player_rotator.rotate(direction, &mut state.player);
        }
    }

    if clamp_mode && input.clamp_held && grounded {
        state.player.freeze();
        state.player.clamp();
    } else if (clamp_mode && !input.clamp_held) || !grounded {
        state.player.unclamp();
        state.player.unfreeze();
    }

    let can_move = !state.player_rotator.is_rotating() && !state.player.is_frozen();
    let lateral = if can_move { input.lateral() } else { 0.0 };
    state.player.move_lateral(lateral);

    if !grounded {
        state.player_rotator.stop_rotation(&mut state.player);
    }

    state.stage.tick(dt);
    state.player_rotator.tick(dt, &mut state.player);
    state.player.step(dt, state.settings.gravity);

    state.time_ticks += 1;
}
