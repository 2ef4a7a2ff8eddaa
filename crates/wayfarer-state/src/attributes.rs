//! Primary attributes projection.

use wayfarer_protocol::GameEvent;
use wayfarer_protocol::types::PlayerAttributes;

use crate::{ApplyCtx, Projection};

/// The six primary attributes, replaced wholesale per frame. Zeroed until
/// the first `player_attributes` frame lands.
#[derive(Debug, Default)]
pub struct AttributesProjection {
    attributes: PlayerAttributes,
}

impl AttributesProjection {
    pub fn attributes(&self) -> &PlayerAttributes {
        &self.attributes
    }
}

impl Projection for AttributesProjection {
    fn apply(&mut self, event: &GameEvent, _ctx: &ApplyCtx) {
        if let GameEvent::PlayerAttributes(attributes) = event {
            self.attributes = *attributes;
        }
    }
}
