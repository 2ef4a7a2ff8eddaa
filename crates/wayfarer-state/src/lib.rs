//! Game-state projections for Wayfarer.
//!
//! A projection owns one narrow slice of derived client state (the chat
//! log, the equipment slots, the expedition timer, …), watches the typed
//! event stream, and applies its own update rule to the tags it recognizes.
//! Everything else it ignores. Exactly one projection writes any given
//! field; reading across projections is allowed (and mediated by the
//! dispatcher), writing across them is not.
//!
//! [`ProjectionSet`] is the fan-out point: the session pump hands it each
//! decoded envelope once, and it applies the envelope to every projection
//! in a fixed order. Because the pump is a single task fed by an ordered
//! bus, every projection observes the stream exactly as the server emitted
//! it — no frame skipped, none applied twice.
//!
//! All projections are plain structs with synchronous `apply` methods, so
//! every update rule is unit-testable without a socket or a runtime.

use std::time::{Duration, Instant};

use wayfarer_protocol::GameEvent;

mod attributes;
mod chat;
mod combat;
mod expedition;
mod journal;
mod meta;
mod player;
mod resources;
mod set;
mod slots;
mod stats;

pub use attributes::AttributesProjection;
pub use chat::ChatProjection;
pub use combat::CombatProjection;
pub use expedition::ExpeditionProjection;
pub use journal::JournalProjection;
pub use meta::MetaProjection;
pub use player::PlayerProjection;
pub use resources::ResourcesProjection;
pub use set::ProjectionSet;
pub use slots::SlotsProjection;
pub use stats::StatsProjection;

/// Per-frame context the dispatcher hands to every projection.
#[derive(Debug, Clone, Copy)]
pub struct ApplyCtx {
    /// When the frame was observed. Timer projections anchor deadlines to
    /// this instead of sampling the clock themselves, which keeps their
    /// update rules deterministic under test.
    pub now: Instant,

    /// Expedition length granted by the currently equipped compass, if
    /// any — sampled from the slots projection before fan-out. This is
    /// the one sanctioned cross-projection read (the countdown backfill).
    pub compass_duration: Option<Duration>,
}

impl ApplyCtx {
    /// Context with no compass equipped.
    pub fn at(now: Instant) -> Self {
        Self {
            now,
            compass_duration: None,
        }
    }
}

/// A single projection's update rule.
///
/// `apply` receives *every* event; the implementation filters by tag and
/// mutates its own state for matches. Updates are last-write-wins
/// replacements unless a rule says otherwise (chat appends, gains
/// accumulate, mobs upsert).
pub trait Projection: Send + Sync {
    fn apply(&mut self, event: &GameEvent, ctx: &ApplyCtx);
}
