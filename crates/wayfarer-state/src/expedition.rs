//! Expedition projection: timers, gains, and the mob roster.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use uuid::Uuid;
use wayfarer_protocol::GameEvent;
use wayfarer_protocol::types::Mob;

use crate::{ApplyCtx, Projection};

/// State of the running expedition, if any.
///
/// The server drives one of two mutually exclusive timer styles:
///
/// - **Countdown** (`expedition_countdown`): each tick carries the seconds
///   remaining. A tick `<= 0` means the expedition is over and clears the
///   timer. Otherwise the deadline is re-anchored to
///   `now + (ticks + 1) seconds` — one grace second so the displayed timer
///   doesn't hit zero ahead of the server's final tick — and, on the first
///   tick, the total duration is backfilled from the equipped compass.
/// - **Count-up** (`expedition_countup`): each tick carries the absolute
///   elapsed seconds; a negative value means no expedition is running and
///   also resets the gain counters.
///
/// Gains accumulate as the server rolls them; mobs are a keyed roster (see
/// [`Self::apply`] — `hp == 0` is the only removal signal, covering both
/// death and despawn).
#[derive(Debug, Default)]
pub struct ExpeditionProjection {
    duration: Option<Duration>,
    ends_at: Option<Instant>,
    elapsed: Option<Duration>,
    gained_experience: u64,
    gained_cin: u64,
    mobs: HashMap<Uuid, Mob>,
}

impl ExpeditionProjection {
    /// Total expedition length, known after the first countdown tick.
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Countdown deadline, if a countdown expedition is running.
    pub fn ends_at(&self) -> Option<Instant> {
        self.ends_at
    }

    /// Time left on the countdown as of `now`.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.ends_at.map(|at| at.saturating_duration_since(now))
    }

    /// Elapsed time, if a count-up expedition is running.
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.ends_at.is_some() || self.elapsed.is_some()
    }

    pub fn gained_experience(&self) -> u64 {
        self.gained_experience
    }

    pub fn gained_cin(&self) -> u64 {
        self.gained_cin
    }

    pub fn mob(&self, id: &Uuid) -> Option<&Mob> {
        self.mobs.get(id)
    }

    pub fn mobs(&self) -> impl Iterator<Item = &Mob> {
        self.mobs.values()
    }

    pub fn mob_count(&self) -> usize {
        self.mobs.len()
    }

    /// Local half of leaving an expedition: zero the timers and gains
    /// immediately, ahead of the server's confirming frame. The mob roster
    /// is left alone — only `hp == 0` updates remove mobs.
    pub fn reset(&mut self) {
        self.duration = None;
        self.ends_at = None;
        self.elapsed = None;
        self.gained_experience = 0;
        self.gained_cin = 0;
    }
}

impl Projection for ExpeditionProjection {
    fn apply(&mut self, event: &GameEvent, ctx: &ApplyCtx) {
        match event {
            GameEvent::ExpeditionCountdown(secs) => {
                if *secs <= 0 {
                    self.duration = None;
                    self.ends_at = None;
                } else {
                    self.ends_at =
                        Some(ctx.now + Duration::from_secs(*secs as u64 + 1));
                    if self.duration.is_none() {
                        self.duration = ctx.compass_duration;
                    }
                }
            }
            GameEvent::ExpeditionCountup(secs) => {
                if *secs < 0 {
                    self.elapsed = None;
                    self.gained_experience = 0;
                    self.gained_cin = 0;
                } else {
                    self.elapsed = Some(Duration::from_secs(*secs as u64));
                }
            }
            GameEvent::GainedExperience(amount) => {
                self.gained_experience += amount;
            }
            GameEvent::GainedCin(amount) => {
                self.gained_cin += amount;
            }
            GameEvent::Mob(mob) => {
                if mob.hp == 0 {
                    self.mobs.remove(&mob.id);
                } else {
                    self.mobs.insert(mob.id, mob.clone());
                }
            }
            _ => {}
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use wayfarer_protocol::types::MobTier;

    use super::*;

    fn ctx_at(now: Instant) -> ApplyCtx {
        ApplyCtx::at(now)
    }

    fn ctx_with_compass(now: Instant, millis: u64) -> ApplyCtx {
        ApplyCtx {
            now,
            compass_duration: Some(Duration::from_millis(millis)),
        }
    }

    fn mob(id: u128, hp: u64) -> Mob {
        Mob {
            id: Uuid::from_u128(id),
            expedition_id: Uuid::from_u128(999),
            name: "Dire Wolf".into(),
            tier: MobTier::Common,
            hp,
            max_hp: 60,
            level: 3,
            damage: 5,
        }
    }

    // =====================================================================
    // Countdown
    // =====================================================================

    #[test]
    fn test_countdown_tick_anchors_deadline_one_second_past() {
        let now = Instant::now();
        let mut exp = ExpeditionProjection::default();

        exp.apply(&GameEvent::ExpeditionCountdown(10), &ctx_at(now));

        assert_eq!(exp.ends_at(), Some(now + Duration::from_millis(11_000)));
        assert_eq!(exp.remaining(now), Some(Duration::from_millis(11_000)));
    }

    #[test]
    fn test_countdown_backfills_duration_from_compass() {
        let now = Instant::now();
        let mut exp = ExpeditionProjection::default();

        exp.apply(
            &GameEvent::ExpeditionCountdown(10),
            &ctx_with_compass(now, 60_000),
        );

        assert_eq!(exp.duration(), Some(Duration::from_millis(60_000)));
        assert_eq!(exp.ends_at(), Some(now + Duration::from_millis(11_000)));
    }

    #[test]
    fn test_countdown_keeps_known_duration_on_later_ticks() {
        let now = Instant::now();
        let mut exp = ExpeditionProjection::default();

        exp.apply(
            &GameEvent::ExpeditionCountdown(10),
            &ctx_with_compass(now, 60_000),
        );
        // The player swapped compasses mid-run; the original duration stays.
        exp.apply(
            &GameEvent::ExpeditionCountdown(9),
            &ctx_with_compass(now, 120_000),
        );

        assert_eq!(exp.duration(), Some(Duration::from_millis(60_000)));
    }

    #[test]
    fn test_countdown_zero_clears_duration_and_deadline() {
        let now = Instant::now();
        let mut exp = ExpeditionProjection::default();

        exp.apply(
            &GameEvent::ExpeditionCountdown(10),
            &ctx_with_compass(now, 60_000),
        );
        exp.apply(&GameEvent::ExpeditionCountdown(0), &ctx_at(now));

        assert_eq!(exp.duration(), None);
        assert_eq!(exp.ends_at(), None);
        assert!(!exp.is_running());
    }

    #[test]
    fn test_countdown_without_compass_leaves_duration_unknown() {
        let now = Instant::now();
        let mut exp = ExpeditionProjection::default();
        exp.apply(&GameEvent::ExpeditionCountdown(10), &ctx_at(now));
        assert_eq!(exp.duration(), None);
        assert!(exp.is_running());
    }

    // =====================================================================
    // Count-up
    // =====================================================================

    #[test]
    fn test_countup_replaces_elapsed_wholesale() {
        let now = Instant::now();
        let mut exp = ExpeditionProjection::default();

        exp.apply(&GameEvent::ExpeditionCountup(5), &ctx_at(now));
        exp.apply(&GameEvent::ExpeditionCountup(6), &ctx_at(now));

        assert_eq!(exp.elapsed(), Some(Duration::from_secs(6)));
    }

    #[test]
    fn test_countup_negative_clears_timer_and_gains() {
        let now = Instant::now();
        let mut exp = ExpeditionProjection::default();
        exp.apply(&GameEvent::ExpeditionCountup(30), &ctx_at(now));
        exp.apply(&GameEvent::GainedExperience(10), &ctx_at(now));
        exp.apply(&GameEvent::GainedCin(3), &ctx_at(now));

        exp.apply(&GameEvent::ExpeditionCountup(-1), &ctx_at(now));

        assert_eq!(exp.elapsed(), None);
        assert_eq!(exp.gained_experience(), 0);
        assert_eq!(exp.gained_cin(), 0);
    }

    // =====================================================================
    // Gains
    // =====================================================================

    #[test]
    fn test_gains_accumulate() {
        let now = Instant::now();
        let mut exp = ExpeditionProjection::default();
        exp.apply(&GameEvent::GainedExperience(10), &ctx_at(now));
        exp.apply(&GameEvent::GainedExperience(15), &ctx_at(now));
        exp.apply(&GameEvent::GainedCin(2), &ctx_at(now));

        assert_eq!(exp.gained_experience(), 25);
        assert_eq!(exp.gained_cin(), 2);
    }

    // =====================================================================
    // Mob roster
    // =====================================================================

    #[test]
    fn test_mob_unseen_with_hp_is_inserted() {
        let now = Instant::now();
        let mut exp = ExpeditionProjection::default();
        exp.apply(&GameEvent::Mob(mob(1, 40)), &ctx_at(now));

        assert_eq!(exp.mob_count(), 1);
        assert_eq!(exp.mob(&Uuid::from_u128(1)).map(|m| m.hp), Some(40));
    }

    #[test]
    fn test_mob_known_is_replaced_in_place_others_untouched() {
        let now = Instant::now();
        let mut exp = ExpeditionProjection::default();
        exp.apply(&GameEvent::Mob(mob(1, 40)), &ctx_at(now));
        exp.apply(&GameEvent::Mob(mob(2, 60)), &ctx_at(now));

        exp.apply(&GameEvent::Mob(mob(1, 25)), &ctx_at(now));

        assert_eq!(exp.mob_count(), 2);
        assert_eq!(exp.mob(&Uuid::from_u128(1)).map(|m| m.hp), Some(25));
        assert_eq!(exp.mob(&Uuid::from_u128(2)).map(|m| m.hp), Some(60));
    }

    #[test]
    fn test_mob_zero_hp_removes_entry() {
        let now = Instant::now();
        let mut exp = ExpeditionProjection::default();
        exp.apply(&GameEvent::Mob(mob(1, 40)), &ctx_at(now));
        exp.apply(&GameEvent::Mob(mob(1, 0)), &ctx_at(now));

        assert_eq!(exp.mob_count(), 0);
    }

    #[test]
    fn test_mob_zero_hp_for_unknown_id_is_a_noop() {
        let now = Instant::now();
        let mut exp = ExpeditionProjection::default();
        exp.apply(&GameEvent::Mob(mob(7, 0)), &ctx_at(now));
        assert_eq!(exp.mob_count(), 0);
    }

    // =====================================================================
    // Leaving
    // =====================================================================

    #[test]
    fn test_reset_zeroes_timers_and_gains_but_keeps_mobs() {
        let now = Instant::now();
        let mut exp = ExpeditionProjection::default();
        exp.apply(
            &GameEvent::ExpeditionCountdown(10),
            &ctx_with_compass(now, 60_000),
        );
        exp.apply(&GameEvent::GainedExperience(10), &ctx_at(now));
        exp.apply(&GameEvent::Mob(mob(1, 40)), &ctx_at(now));

        exp.reset();

        assert!(!exp.is_running());
        assert_eq!(exp.duration(), None);
        assert_eq!(exp.gained_experience(), 0);
        assert_eq!(exp.mob_count(), 1, "roster only shrinks on hp == 0");
    }
}
