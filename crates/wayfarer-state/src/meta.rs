//! Reference tables projection.

use std::collections::BTreeMap;

use wayfarer_protocol::GameEvent;
use wayfarer_protocol::types::{BaseStats, Meta};

use crate::{ApplyCtx, Projection};

/// Level curve and base balance constants, replaced wholesale on each
/// `meta` frame (in practice the server sends one at session start).
/// Consumed by derived computations elsewhere — the level lookup scans
/// `level_to_exp`.
#[derive(Debug, Default)]
pub struct MetaProjection {
    meta: Meta,
}

impl MetaProjection {
    pub fn level_to_exp(&self) -> &BTreeMap<u8, u64> {
        &self.meta.level_to_exp
    }

    pub fn base_stats(&self) -> &BaseStats {
        &self.meta.base_stats
    }
}

impl Projection for MetaProjection {
    fn apply(&mut self, event: &GameEvent, _ctx: &ApplyCtx) {
        if let GameEvent::Meta(meta) = event {
            self.meta = meta.clone();
        }
    }
}
