//! Payload types for Wayfarer's wire format.
//!
//! Every type here travels inside an envelope's `data` field. The server is
//! authoritative for all of them — the client never fabricates a
//! `ChatMessage` or a `Mob`, it only decodes what the server pushed and
//! re-serializes the small command payloads it sends back.
//!
//! Enum variants serialize as their PascalCase names (`"Whisper"`,
//! `"Legendary"`) and struct fields as snake_case keys, matching the
//! server's serde output byte for byte. The JSON-shape tests at the bottom
//! pin this down, because a silent rename here desynchronizes the client
//! from every frame the server emits.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// Which chat channel a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatKind {
    General,
    Trade,
    /// Direct message; the payload carries a recipient name.
    Whisper,
}

/// A chat message as broadcast by the server.
///
/// There is no local echo: a message the player sends appears in the log
/// only when the server's own broadcast of it arrives back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: String,
    pub recipient: Option<String>,
    pub kind: ChatKind,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Outbound chat payload. The server fills in sender, id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    pub kind: ChatKind,
    pub content: String,
}

// ---------------------------------------------------------------------------
// Player snapshots
// ---------------------------------------------------------------------------

/// Identity and progression of the logged-in player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub name: String,
    pub email: String,
    pub exp: u64,
    pub timestamp: DateTime<Utc>,
}

/// The six primary attributes. Replaced wholesale per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAttributes {
    pub strength: u32,
    pub dexterity: u32,
    pub vitality: u32,
    pub intelligence: u32,
    pub spirit: u32,
    pub luck: u32,
}

/// Spendable pools and the carry limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerResource {
    pub energy: u64,
    pub max_energy: u64,
    pub hp: u64,
    pub max_hp: u64,
    pub mp: u64,
    pub max_mp: u64,
    pub weight_limit: u64,
}

/// Combat-relevant derived stats, recomputed server-side on every
/// attribute or equipment change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    pub attack: u64,
    pub attack_speed: u64,
    pub defense: u64,
    pub energy_regeneration: u64,
    pub energy_regeneration_interval: u64,
}

/// Combat and looting flags. The server is the only writer — the toggle
/// commands do not mutate these locally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub in_combat: bool,
    pub is_attacking: bool,
    pub is_looting: bool,
}

// ---------------------------------------------------------------------------
// Items and slots
// ---------------------------------------------------------------------------

/// Rarity tier of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemTier {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// What an item fundamentally is (and therefore where it can be equipped).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Rune,
    Consumable,
    Compass,
    Weapon,
    Shoulders,
    Helmet,
    Mask,
    Cloak,
    Armor,
    Belt,
    Gloves,
    Pants,
    Boots,
    Ring,
    Earring,
    Necklace,
    Pendant,
}

/// The kind of expedition a compass opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpeditionKind {
    Hunt,
}

/// Stat bonuses granted by an equipped item. All optional — most items
/// grant only one or two of these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemStats {
    pub attack: Option<u64>,
    pub attack_speed: Option<u64>,
    pub defense: Option<u64>,
    pub energy_regeneration: Option<u64>,
    pub energy_regeneration_interval: Option<u64>,
    pub expedition_kind: Option<ExpeditionKind>,
    /// Total expedition length in milliseconds granted by a compass.
    pub expedition_duration: Option<u64>,
}

/// An item instance as the server describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
    pub tier: ItemTier,
    pub icon: String,
    pub quantity: u64,
    pub level: u32,
    pub enchanted: u32,
    pub description: String,
    pub weight: f32,
    #[serde(default)]
    pub stats: Option<ItemStats>,
}

/// Every place an item can sit. Single-occupancy kinds (`Weapon`, `Helmet`,
/// …) appear once per player; list kinds (`Inventory`, `Ring`, …) appear
/// with ascending indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotKind {
    Inventory,
    Rune,
    Consumable,
    Compass,
    Hand,
    Weapon,
    Shoulders,
    Helmet,
    Mask,
    Cloak,
    Armor,
    Belt,
    Gloves,
    Pants,
    Boots,
    Ring,
    Earring,
    Necklace,
    Pendant,
    Ground,
}

/// One slot in the full-snapshot slot list the server pushes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub index: u64,
    pub kind: SlotKind,
    #[serde(default)]
    pub item: Option<Item>,
}

/// Addresses a slot in the `take_item` / `drop_item` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRef {
    pub index: u64,
    pub kind: SlotKind,
}

// ---------------------------------------------------------------------------
// Expedition mobs
// ---------------------------------------------------------------------------

/// Rarity tier of a mob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MobTier {
    Common,
    Magic,
    Rare,
    Epic,
}

/// A mob sighted during an expedition.
///
/// `hp == 0` on the wire means "gone" — the server uses it for both death
/// and despawn, and there is no separate removal tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mob {
    pub id: Uuid,
    pub expedition_id: Uuid,
    pub name: String,
    pub tier: MobTier,
    pub hp: u64,
    pub max_hp: u64,
    pub level: u64,
    pub damage: u64,
}

// ---------------------------------------------------------------------------
// Reference tables
// ---------------------------------------------------------------------------

/// Global balance constants, pushed once at session start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseStats {
    pub base_attack_speed: u64,
    pub base_hp_regeneration: u64,
    pub base_hp_regen_interval: u64,
}

/// Reference tables the client derives values from (e.g. the player's
/// level is a scan over `level_to_exp`).
///
/// `BTreeMap` keeps the curve ordered by level, which the reverse scan in
/// the level lookup relies on. JSON object keys are strings; serde maps
/// them back to `u8`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub level_to_exp: BTreeMap<u8, u64>,
    pub base_stats: BaseStats,
}

// ---------------------------------------------------------------------------
// Server log lines
// ---------------------------------------------------------------------------

/// A human-readable log line pushed by the server ("Welcome!", "Your
/// expedition ended due to lack of energy.").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: Uuid,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// The payload of a server `error` frame. Receiving one invalidates the
/// session (see the connection manager's fatal-frame handling).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerError {
    pub code: Option<u16>,
    pub message: String,
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! JSON-shape tests. The server's serde output is the contract; these
    //! assert exact keys and enum spellings so a refactor here can't
    //! silently diverge from it.

    use super::*;

    fn uuid(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    // =====================================================================
    // Enum spellings
    // =====================================================================

    #[test]
    fn test_chat_kind_serializes_as_pascal_case() {
        assert_eq!(serde_json::to_string(&ChatKind::General).unwrap(), "\"General\"");
        assert_eq!(serde_json::to_string(&ChatKind::Whisper).unwrap(), "\"Whisper\"");
    }

    #[test]
    fn test_item_tier_round_trip() {
        for tier in [
            ItemTier::Common,
            ItemTier::Uncommon,
            ItemTier::Rare,
            ItemTier::Epic,
            ItemTier::Legendary,
        ] {
            let json = serde_json::to_string(&tier).unwrap();
            let back: ItemTier = serde_json::from_str(&json).unwrap();
            assert_eq!(tier, back);
        }
    }

    #[test]
    fn test_slot_kind_deserializes_from_server_spelling() {
        let kind: SlotKind = serde_json::from_str("\"Inventory\"").unwrap();
        assert_eq!(kind, SlotKind::Inventory);
        let kind: SlotKind = serde_json::from_str("\"Ground\"").unwrap();
        assert_eq!(kind, SlotKind::Ground);
    }

    #[test]
    fn test_unknown_slot_kind_is_rejected() {
        let result: Result<SlotKind, _> = serde_json::from_str("\"Backpack\"");
        assert!(result.is_err(), "unrecognized kinds must fail decode");
    }

    // =====================================================================
    // Struct shapes
    // =====================================================================

    #[test]
    fn test_chat_draft_omits_missing_recipient() {
        let draft = ChatDraft {
            recipient: None,
            kind: ChatKind::General,
            content: "hello".into(),
        };
        let json: serde_json::Value = serde_json::to_value(&draft).unwrap();
        assert!(json.get("recipient").is_none());
        assert_eq!(json["kind"], "General");
        assert_eq!(json["content"], "hello");
    }

    #[test]
    fn test_chat_draft_keeps_whisper_recipient() {
        let draft = ChatDraft {
            recipient: Some("astrid".into()),
            kind: ChatKind::Whisper,
            content: "psst".into(),
        };
        let json: serde_json::Value = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["recipient"], "astrid");
    }

    #[test]
    fn test_player_resource_defaults_missing_fields_to_zero() {
        // Older server builds omit the mp pool; `#[serde(default)]` keeps
        // those frames decodable.
        let resource: PlayerResource =
            serde_json::from_str(r#"{"energy": 500, "max_energy": 500, "weight_limit": 100}"#)
                .unwrap();
        assert_eq!(resource.energy, 500);
        assert_eq!(resource.mp, 0);
        assert_eq!(resource.max_hp, 0);
    }

    #[test]
    fn test_item_stats_all_optional() {
        let stats: ItemStats = serde_json::from_str("{}").unwrap();
        assert_eq!(stats, ItemStats::default());

        let stats: ItemStats = serde_json::from_str(
            r#"{"expedition_kind": "Hunt", "expedition_duration": 60000}"#,
        )
        .unwrap();
        assert_eq!(stats.expedition_kind, Some(ExpeditionKind::Hunt));
        assert_eq!(stats.expedition_duration, Some(60_000));
    }

    #[test]
    fn test_slot_without_item_decodes() {
        let slot: Slot = serde_json::from_str(r#"{"index": 3, "kind": "Inventory"}"#).unwrap();
        assert_eq!(slot.index, 3);
        assert_eq!(slot.kind, SlotKind::Inventory);
        assert!(slot.item.is_none());
    }

    #[test]
    fn test_mob_round_trip() {
        let mob = Mob {
            id: uuid(1),
            expedition_id: uuid(2),
            name: "Dire Wolf".into(),
            tier: MobTier::Magic,
            hp: 40,
            max_hp: 60,
            level: 4,
            damage: 7,
        };
        let json = serde_json::to_string(&mob).unwrap();
        let back: Mob = serde_json::from_str(&json).unwrap();
        assert_eq!(mob, back);
    }

    #[test]
    fn test_meta_level_curve_decodes_string_keys() {
        // JSON object keys are always strings; the curve still lands in an
        // integer-keyed ordered map.
        let meta: Meta = serde_json::from_str(
            r#"{
                "level_to_exp": {"1": 0, "5": 100, "10": 500},
                "base_stats": {"base_attack_speed": 3000}
            }"#,
        )
        .unwrap();
        assert_eq!(meta.level_to_exp.get(&5), Some(&100));
        let levels: Vec<u8> = meta.level_to_exp.keys().copied().collect();
        assert_eq!(levels, vec![1, 5, 10], "curve must iterate in level order");
        assert_eq!(meta.base_stats.base_attack_speed, 3000);
        assert_eq!(meta.base_stats.base_hp_regeneration, 0);
    }

    #[test]
    fn test_server_error_tolerates_bare_message() {
        let err: ServerError = serde_json::from_str(r#"{"message": "session expired"}"#).unwrap();
        assert_eq!(err.message, "session expired");
        assert_eq!(err.code, None);
    }
}
