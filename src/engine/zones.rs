//! Worse-of-two zone reduction.
//!
//! System-level figures are dominated by the worst zone and never averaged, so
//! a crisis in one zone cannot be diluted by a healthy neighbour. Shock counts
//! are the exception: they are summed because every shock is independently
//! alarming.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

use crate::engine::metrics::{ZoneId, ZoneMetrics};

/// Aggregate figures for one evaluation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneReduction {
    /// Highest zone risk, 0–100.
    pub r_max: f64,
    /// Zone that produced `r_max`; zone A on an exact tie.
    pub culprit: ZoneId,
    pub shock_24h_total: u32,
    /// Worst 7-day exposure, as a percentage.
    pub exposure_pct: f64,
    /// Worst utilization, as a percentage.
    pub util_pct: f64,
}

/// Index of the highest risk; the lowest index wins ties. `None` when empty.
#[must_use]
pub fn worst_zone_index(risks: &[f64]) -> Option<usize> {
    let mut worst: Option<(usize, f64)> = None;
    for (index, &risk) in risks.iter().enumerate() {
        match worst {
            Some((_, best)) if risk <= best => {}
            _ => worst = Some((index, risk)),
        }
    }
    worst.map(|(index, _)| index)
}

/// Reduce zone A and zone B to system-level figures.
#[must_use]
pub fn reduce(zone_a: &ZoneMetrics, zone_b: &ZoneMetrics) -> ZoneReduction {
    let zones = [zone_a, zone_b];
    let culprit_index = worst_zone_index(&[zone_a.risk, zone_b.risk]).unwrap_or(0);

    ZoneReduction {
        r_max: zones[culprit_index].risk,
        culprit: ZoneId::ALL[culprit_index],
        shock_24h_total: zone_a.shock_24h.saturating_add(zone_b.shock_24h),
        exposure_pct: 100.0 * zone_a.exposure_7d.max(zone_b.exposure_7d),
        util_pct: 100.0 * zone_a.util.max(zone_b.util),
    }
}
