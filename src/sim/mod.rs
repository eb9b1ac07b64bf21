//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through the `dt` handed to a tick
//! - Seeded RNG only
//! - No rendering, input polling or platform dependencies

pub mod autopilot;
pub mod body;
pub mod contact;
pub mod level;
pub mod player;
pub mod player_rotator;
pub mod stage;
pub mod transition;
pub mod victory;

pub use autopilot::Autopilot;
pub use body::Body;
pub use contact::{ColliderTag, ContactCounter, ContactEvent, ContactQueue, ContactSource, Surface};
pub use level::{DEFAULT_SPAWN, LevelState, TickInput, tick};
pub use player::{GravityState, Player};
pub use player_rotator::{GravityClamp, PlayerRotationPhase, PlayerRotator};
pub use stage::Stage;
pub use transition::{Direction, RotationPhase, RotationStep, RotationTransition, Rotator};
pub use victory::VictoryZone;
