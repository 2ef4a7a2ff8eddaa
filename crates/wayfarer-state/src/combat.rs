//! Combat and looting flags projection.

use wayfarer_protocol::GameEvent;
use wayfarer_protocol::types::PlayerState;

use crate::{ApplyCtx, Projection};

/// The server's combat/looting flags. `None` until the first frame.
///
/// The toggle commands that relate to this state are fire-and-forget and
/// do not touch it — the flags change only when the server echoes the new
/// state back.
#[derive(Debug, Default)]
pub struct CombatProjection {
    state: Option<PlayerState>,
}

impl CombatProjection {
    pub fn state(&self) -> Option<&PlayerState> {
        self.state.as_ref()
    }

    pub fn is_attacking(&self) -> bool {
        self.state.is_some_and(|s| s.is_attacking)
    }

    pub fn is_looting(&self) -> bool {
        self.state.is_some_and(|s| s.is_looting)
    }

    pub fn in_combat(&self) -> bool {
        self.state.is_some_and(|s| s.in_combat)
    }
}

impl Projection for CombatProjection {
    fn apply(&mut self, event: &GameEvent, _ctx: &ApplyCtx) {
        if let GameEvent::PlayerState(state) = event {
            self.state = Some(*state);
        }
    }
}
