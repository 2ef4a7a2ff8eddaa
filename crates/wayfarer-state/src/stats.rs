//! Derived combat stats projection.

use wayfarer_protocol::GameEvent;
use wayfarer_protocol::types::PlayerStats;

use crate::{ApplyCtx, Projection};

/// Server-computed combat stats, replaced wholesale per frame.
#[derive(Debug, Default)]
pub struct StatsProjection {
    stats: PlayerStats,
}

impl StatsProjection {
    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    /// Regeneration normalized to energy per second, for display.
    /// Zero while the interval is unknown (avoids the divide).
    pub fn energy_per_second(&self) -> f64 {
        if self.stats.energy_regeneration_interval == 0 {
            return 0.0;
        }
        self.stats.energy_regeneration as f64
            / self.stats.energy_regeneration_interval as f64
            * 1000.0
    }
}

impl Projection for StatsProjection {
    fn apply(&mut self, event: &GameEvent, _ctx: &ApplyCtx) {
        if let GameEvent::PlayerStats(stats) = event {
            self.stats = *stats;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    fn with_regen(regen: u64, interval: u64) -> StatsProjection {
        let mut projection = StatsProjection::default();
        projection.apply(
            &GameEvent::PlayerStats(PlayerStats {
                energy_regeneration: regen,
                energy_regeneration_interval: interval,
                ..PlayerStats::default()
            }),
            &ApplyCtx::at(Instant::now()),
        );
        projection
    }

    #[test]
    fn test_energy_per_second_scales_interval_to_seconds() {
        // 1 energy every 2000 ms → 0.5/s.
        let projection = with_regen(1, 2000);
        assert!((projection.energy_per_second() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_energy_per_second_zero_interval_is_zero() {
        let projection = with_regen(5, 0);
        assert_eq!(projection.energy_per_second(), 0.0);
    }
}
