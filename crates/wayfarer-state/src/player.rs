//! Player identity projection and the derived level.

use std::collections::BTreeMap;

use wayfarer_protocol::GameEvent;
use wayfarer_protocol::types::PlayerInfo;

use crate::{ApplyCtx, Projection};

/// The logged-in player's identity and experience, replaced wholesale per
/// `player_info` frame.
#[derive(Debug, Default)]
pub struct PlayerProjection {
    player: Option<PlayerInfo>,
}

impl PlayerProjection {
    pub fn player(&self) -> Option<&PlayerInfo> {
        self.player.as_ref()
    }

    /// Derives the player's level from the experience curve: the highest
    /// level whose threshold is strictly below the current experience,
    /// scanning from the top. Level 1 when no player is loaded or no
    /// threshold qualifies.
    pub fn level(&self, curve: &BTreeMap<u8, u64>) -> u8 {
        let Some(player) = &self.player else {
            return 1;
        };
        for (&level, &threshold) in curve.iter().rev() {
            if threshold < player.exp {
                return level;
            }
        }
        1
    }
}

impl Projection for PlayerProjection {
    fn apply(&mut self, event: &GameEvent, _ctx: &ApplyCtx) {
        if let GameEvent::PlayerInfo(info) = event {
            self.player = Some(info.clone());
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
