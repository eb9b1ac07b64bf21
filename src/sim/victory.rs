//! Goal trigger volume

use serde::{Deserialize, Serialize};

use super::contact::Surface;

/// Latches once the player enters the goal; cleared only by reset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VictoryZone {
    victory: bool,
}

impl VictoryZone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_trigger_enter(&mut self, other: &impl Surface) {
        if other.is_player() && !self.victory {
            log::info!("Player reached the goal");
            self.victory = true;
        }
    }

    #[inline]
    pub fn victory(&self) -> bool {
        self.victory
    }

    pub fn reset(&mut self) {
        self.victory = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ColliderTag;

    #[test]
    fn test_only_player_triggers() {
        let mut zone = VictoryZone::new();
        zone.on_trigger_enter(&ColliderTag::Platform);
        zone.on_trigger_enter(&ColliderTag::Hazard);
        assert!(!zone.victory());

        zone.on_trigger_enter(&ColliderTag::Player);
        assert!(zone.victory());

        zone.reset();
        assert!(!zone.victory());
    }
}
