//! Equipment and inventory slots projection.

use std::time::Duration;

use wayfarer_protocol::GameEvent;
use wayfarer_protocol::types::{Item, Slot, SlotKind};

use crate::{ApplyCtx, Projection};

/// Every slot the player has, partitioned by kind.
///
/// One `slots` frame carries the entire list; applying it rebuilds every
/// partition from scratch in a single pass over the input. Single-occupancy
/// kinds keep the last slot of that kind (the server sends exactly one),
/// list kinds keep all of them in server order.
#[derive(Debug, Default)]
pub struct SlotsProjection {
    // Single-occupancy slots.
    hand: Option<Slot>,
    compass: Option<Slot>,
    weapon: Option<Slot>,
    shoulders: Option<Slot>,
    helmet: Option<Slot>,
    mask: Option<Slot>,
    cloak: Option<Slot>,
    armor: Option<Slot>,
    belt: Option<Slot>,
    gloves: Option<Slot>,
    pants: Option<Slot>,
    boots: Option<Slot>,
    necklace: Option<Slot>,
    pendant: Option<Slot>,
    // Slot lists.
    inventory: Vec<Slot>,
    ring: Vec<Slot>,
    earring: Vec<Slot>,
    rune: Vec<Slot>,
    consumable: Vec<Slot>,
    ground: Vec<Slot>,
}

impl SlotsProjection {
    fn replace(&mut self, slots: &[Slot]) {
        let mut next = SlotsProjection::default();
        for slot in slots {
            match slot.kind {
                SlotKind::Hand => next.hand = Some(slot.clone()),
                SlotKind::Compass => next.compass = Some(slot.clone()),
                SlotKind::Weapon => next.weapon = Some(slot.clone()),
                SlotKind::Shoulders => next.shoulders = Some(slot.clone()),
                SlotKind::Helmet => next.helmet = Some(slot.clone()),
                SlotKind::Mask => next.mask = Some(slot.clone()),
                SlotKind::Cloak => next.cloak = Some(slot.clone()),
                SlotKind::Armor => next.armor = Some(slot.clone()),
                SlotKind::Belt => next.belt = Some(slot.clone()),
                SlotKind::Gloves => next.gloves = Some(slot.clone()),
                SlotKind::Pants => next.pants = Some(slot.clone()),
                SlotKind::Boots => next.boots = Some(slot.clone()),
                SlotKind::Necklace => next.necklace = Some(slot.clone()),
                SlotKind::Pendant => next.pendant = Some(slot.clone()),
                SlotKind::Inventory => next.inventory.push(slot.clone()),
                SlotKind::Ring => next.ring.push(slot.clone()),
                SlotKind::Earring => next.earring.push(slot.clone()),
                SlotKind::Rune => next.rune.push(slot.clone()),
                SlotKind::Consumable => next.consumable.push(slot.clone()),
                SlotKind::Ground => next.ground.push(slot.clone()),
            }
        }
        *self = next;
    }

    // -- Single-occupancy accessors ---------------------------------------

    pub fn hand(&self) -> Option<&Slot> {
        self.hand.as_ref()
    }

    pub fn compass(&self) -> Option<&Slot> {
        self.compass.as_ref()
    }

    pub fn weapon(&self) -> Option<&Slot> {
        self.weapon.as_ref()
    }

    pub fn shoulders(&self) -> Option<&Slot> {
        self.shoulders.as_ref()
    }

    pub fn helmet(&self) -> Option<&Slot> {
        self.helmet.as_ref()
    }

    pub fn mask(&self) -> Option<&Slot> {
        self.mask.as_ref()
    }

    pub fn cloak(&self) -> Option<&Slot> {
        self.cloak.as_ref()
    }

    pub fn armor(&self) -> Option<&Slot> {
        self.armor.as_ref()
    }

    pub fn belt(&self) -> Option<&Slot> {
        self.belt.as_ref()
    }

    pub fn gloves(&self) -> Option<&Slot> {
        self.gloves.as_ref()
    }

    pub fn pants(&self) -> Option<&Slot> {
        self.pants.as_ref()
    }

    pub fn boots(&self) -> Option<&Slot> {
        self.boots.as_ref()
    }

    pub fn necklace(&self) -> Option<&Slot> {
        self.necklace.as_ref()
    }

    pub fn pendant(&self) -> Option<&Slot> {
        self.pendant.as_ref()
    }

    // -- List accessors ----------------------------------------------------

    pub fn inventory(&self) -> &[Slot] {
        &self.inventory
    }

    pub fn ring(&self) -> &[Slot] {
        &self.ring
    }

    pub fn earring(&self) -> &[Slot] {
        &self.earring
    }

    pub fn rune(&self) -> &[Slot] {
        &self.rune
    }

    pub fn consumable(&self) -> &[Slot] {
        &self.consumable
    }

    pub fn ground(&self) -> &[Slot] {
        &self.ground
    }

    // -- Derived values ----------------------------------------------------

    /// Inventory slots that hold an item.
    pub fn filled(&self) -> usize {
        self.inventory.iter().filter(|s| s.item.is_some()).count()
    }

    /// Total weight of everything in the inventory.
    pub fn carried_weight(&self) -> f32 {
        self.inventory
            .iter()
            .filter_map(|s| s.item.as_ref())
            .map(|item| item.weight)
            .sum()
    }

    /// The item in the compass slot, if one is equipped.
    pub fn equipped_compass(&self) -> Option<&Item> {
        self.compass.as_ref().and_then(|s| s.item.as_ref())
    }

    /// Expedition length granted by the equipped compass. Read by the
    /// dispatcher into [`ApplyCtx`] for the countdown backfill.
    pub fn compass_duration(&self) -> Option<Duration> {
        self.equipped_compass()
            .and_then(|item| item.stats.as_ref())
            .and_then(|stats| stats.expedition_duration)
            .map(Duration::from_millis)
    }
}

impl Projection for SlotsProjection {
    fn apply(&mut self, event: &GameEvent, _ctx: &ApplyCtx) {
        if let GameEvent::Slots(slots) = event {
            self.replace(slots);
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
