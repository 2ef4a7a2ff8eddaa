//! The projection set: decode-once fan-out over every projection.

use std::time::Instant;

use tokio::sync::RwLock;
use wayfarer_protocol::Envelope;

use crate::{
    ApplyCtx, AttributesProjection, ChatProjection, CombatProjection,
    ExpeditionProjection, JournalProjection, MetaProjection, PlayerProjection,
    Projection, ResourcesProjection, SlotsProjection, StatsProjection,
};

/// Every projection of a session, behind read/write locks.
///
/// The session pump is the only writer: it calls [`apply`](Self::apply)
/// once per decoded envelope, on one task, so projections observe frames
/// in exactly the order the server emitted them. Readers (the presentation
/// layer) take short read locks on whichever slice they render.
#[derive(Debug, Default)]
pub struct ProjectionSet {
    pub chat: RwLock<ChatProjection>,
    pub player: RwLock<PlayerProjection>,
    pub attributes: RwLock<AttributesProjection>,
    pub resources: RwLock<ResourcesProjection>,
    pub stats: RwLock<StatsProjection>,
    pub combat: RwLock<CombatProjection>,
    pub slots: RwLock<SlotsProjection>,
    pub meta: RwLock<MetaProjection>,
    pub expedition: RwLock<ExpeditionProjection>,
    pub journal: RwLock<JournalProjection>,
}

impl ProjectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one envelope to every projection, in declaration order.
    ///
    /// The equipped-compass duration is sampled from the slots projection
    /// *before* fan-out — the expedition countdown's backfill reads it from
    /// the context rather than reaching into another projection's lock.
    pub async fn apply(&self, envelope: &Envelope, now: Instant) {
        let compass_duration = self.slots.read().await.compass_duration();
        let ctx = ApplyCtx {
            now,
            compass_duration,
        };
        let event = &envelope.event;
        tracing::trace!(tag = event.tag(), id = %envelope.id, "applying event");

        self.chat.write().await.apply(event, &ctx);
        self.player.write().await.apply(event, &ctx);
        self.attributes.write().await.apply(event, &ctx);
        self.resources.write().await.apply(event, &ctx);
        self.stats.write().await.apply(event, &ctx);
        self.combat.write().await.apply(event, &ctx);
        self.slots.write().await.apply(event, &ctx);
        self.meta.write().await.apply(event, &ctx);
        self.expedition.write().await.apply(event, &ctx);
        self.journal.write().await.apply(event, &ctx);
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wayfarer_protocol::GameEvent;
    use wayfarer_protocol::types::{
        Item, ItemKind, ItemStats, ItemTier, PlayerResource, Slot, SlotKind,
    };

    use super::*;

    fn envelope(event: GameEvent) -> Envelope {
        Envelope {
            id: "t".to_string(),
            event,
        }
    }

    fn compass_slot(duration_ms: u64) -> Slot {
        Slot {
            index: 0,
            kind: SlotKind::Compass,
            item: Some(Item {
                name: "hunter's compass".into(),
                kind: ItemKind::Compass,
                tier: ItemTier::Common,
                icon: "compass.png".into(),
                quantity: 1,
                level: 1,
                enchanted: 0,
                description: String::new(),
                weight: 0.1,
                stats: Some(ItemStats {
                    expedition_duration: Some(duration_ms),
                    ..ItemStats::default()
                }),
            }),
        }
    }

    #[tokio::test]
    async fn test_apply_routes_to_owning_projection() {
        let set = ProjectionSet::new();
        let now = Instant::now();

        set.apply(
            &envelope(GameEvent::PlayerResource(PlayerResource {
                energy: 480,
                max_energy: 500,
                ..PlayerResource::default()
            })),
            now,
        )
        .await;
        set.apply(&envelope(GameEvent::GainedCin(5)), now).await;

        assert_eq!(set.resources.read().await.resource().energy, 480);
        assert_eq!(set.expedition.read().await.gained_cin(), 5);
        assert!(set.chat.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_countdown_backfill_crosses_from_slots() {
        // The slots frame arrives first (as it does on a real session),
        // then the countdown tick reads the compass through the context.
        let set = ProjectionSet::new();
        let now = Instant::now();

        set.apply(
            &envelope(GameEvent::Slots(vec![compass_slot(60_000)])),
            now,
        )
        .await;
        set.apply(&envelope(GameEvent::ExpeditionCountdown(10)), now)
            .await;

        let expedition = set.expedition.read().await;
        assert_eq!(expedition.duration(), Some(Duration::from_millis(60_000)));
        assert_eq!(expedition.ends_at(), Some(now + Duration::from_millis(11_000)));
    }

    #[tokio::test]
    async fn test_countdown_without_slots_frame_has_no_duration() {
        let set = ProjectionSet::new();
        let now = Instant::now();

        set.apply(&envelope(GameEvent::ExpeditionCountdown(10)), now)
            .await;

        assert_eq!(set.expedition.read().await.duration(), None);
    }
}
