//! Resource pools projection.

use wayfarer_protocol::GameEvent;
use wayfarer_protocol::types::PlayerResource;

use crate::{ApplyCtx, Projection};

/// Energy, hp, mp and the weight limit — the fastest-moving player state
/// (the server re-sends it every expedition tick and regeneration pulse).
/// Replaced wholesale per frame, last write wins.
#[derive(Debug, Default)]
pub struct ResourcesProjection {
    resource: PlayerResource,
}

impl ResourcesProjection {
    pub fn resource(&self) -> &PlayerResource {
        &self.resource
    }
}

impl Projection for ResourcesProjection {
    fn apply(&mut self, event: &GameEvent, _ctx: &ApplyCtx) {
        if let GameEvent::PlayerResource(resource) = event {
            self.resource = *resource;
        }
    }
}
