//! The envelope and the tagged event/command vocabulary.
//!
//! Every frame on the wire is an envelope:
//!
//! ```text
//! server → client   {"id": "…", "event": "player_resource", "data": {…}}
//! client → server   {"event": "toggle_attack"}
//! client → server   {"event": "send_chat_message", "data": {…}}
//! ```
//!
//! `#[serde(tag = "event", content = "data")]` is serde's "adjacently
//! tagged" representation — exactly the `{event, data}` pair the server
//! speaks. Each variant names one wire tag and carries that tag's payload
//! type, so a frame whose `data` doesn't match its `event` fails to decode
//! instead of flowing through the projections malformed. A frame with a
//! tag outside this vocabulary fails the same way; the connection manager
//! drops and logs it.

use serde::{Deserialize, Serialize};

use crate::types::{
    ChatDraft, ChatMessage, LogEntry, Meta, Mob, PlayerAttributes, PlayerInfo,
    PlayerResource, PlayerState, PlayerStats, ServerError, Slot, SlotRef,
};

// ---------------------------------------------------------------------------
// Inbound events
// ---------------------------------------------------------------------------

/// Everything the server pushes, keyed by its wire tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum GameEvent {
    /// Protocol-level failure. Non-retryable: receiving one forces logout.
    Error(ServerError),
    PlayerInfo(PlayerInfo),
    PlayerResource(PlayerResource),
    PlayerAttributes(PlayerAttributes),
    PlayerState(PlayerState),
    PlayerStats(PlayerStats),
    /// The *entire* slot list, every time. Partial slot updates don't exist.
    Slots(Vec<Slot>),
    Meta(Meta),
    ChatMessage(ChatMessage),
    /// Seconds remaining. `<= 0` means the expedition is over.
    ExpeditionCountdown(i64),
    /// Absolute elapsed seconds. Negative means no expedition is running.
    ExpeditionCountup(i64),
    GainedExperience(u64),
    GainedCin(u64),
    Mob(Mob),
    Log(LogEntry),
}

impl GameEvent {
    /// The wire tag, for logging.
    pub fn tag(&self) -> &'static str {
        match self {
            GameEvent::Error(_) => "error",
            GameEvent::PlayerInfo(_) => "player_info",
            GameEvent::PlayerResource(_) => "player_resource",
            GameEvent::PlayerAttributes(_) => "player_attributes",
            GameEvent::PlayerState(_) => "player_state",
            GameEvent::PlayerStats(_) => "player_stats",
            GameEvent::Slots(_) => "slots",
            GameEvent::Meta(_) => "meta",
            GameEvent::ChatMessage(_) => "chat_message",
            GameEvent::ExpeditionCountdown(_) => "expedition_countdown",
            GameEvent::ExpeditionCountup(_) => "expedition_countup",
            GameEvent::GainedExperience(_) => "gained_experience",
            GameEvent::GainedCin(_) => "gained_cin",
            GameEvent::Mob(_) => "mob",
            GameEvent::Log(_) => "log",
        }
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// An inbound frame: server-assigned id plus the tagged event.
///
/// `id` is opaque and used only for tracing. Nothing in the protocol pairs
/// requests to responses through it — confirmation always arrives as a
/// fresh authoritative state frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub id: String,
    #[serde(flatten)]
    pub event: GameEvent,
}

// ---------------------------------------------------------------------------
// Outbound commands
// ---------------------------------------------------------------------------

/// Everything the client may send. Fire-and-forget, at most once: there is
/// no acknowledgment, and state changes only when the server echoes a new
/// snapshot.
///
/// Unit variants serialize without a `data` key; outbound frames never
/// carry an `id` (the server assigns those).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Command {
    SendChatMessage(ChatDraft),
    TakeItem(SlotRef),
    DropItem(SlotRef),
    StartExpedition,
    EndExpedition,
    ToggleAttack,
    ToggleLoot,
    Resurrect,
}

// =========================================================================
// Tests
// =========================================================================
