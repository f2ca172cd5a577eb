//! Built-in demo fixtures used before a site is wired to real sensors.

#![allow(missing_docs)]

use crate::core::errors::Result;
use crate::engine::catalog;
use crate::engine::metrics::ZoneMetrics;
use crate::source::{MetricSnapshot, MetricSource};

/// Multipliers applied to the current risk for the synthetic week, oldest first.
const TREND_SHAPE: [f64; 7] = [0.60, 0.70, 0.80, 0.90, 0.85, 0.75, 1.00];

/// Fixture source keyed by catalog scenario.
///
/// Unknown scenarios get the normal-operation fixture; the label itself is
/// passed through untouched so the engine still reports the fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoSource;

impl DemoSource {
    #[must_use]
    pub fn fixture(scenario: &str) -> (ZoneMetrics, ZoneMetrics) {
        match catalog::lookup(scenario).map(|entry| entry.key) {
            Some("oxygen drop") => (
                ZoneMetrics::new(82.0, 9, 0.48, 0.92).with_readings(5.3, 16.8, 7.68, 31.2),
                ZoneMetrics::new(34.0, 0, 0.05, 0.38).with_readings(7.7, 16.6, 7.92, 31.0),
            ),
            Some("flow degradation") => (
                ZoneMetrics::new(63.0, 2, 0.28, 0.88).with_readings(6.6, 16.7, 7.74, 31.1),
                ZoneMetrics::new(41.0, 1, 0.12, 0.62).with_readings(7.2, 16.6, 7.88, 31.0),
            ),
            Some("filtration load") => (
                ZoneMetrics::new(58.0, 1, 0.22, 0.84).with_readings(6.9, 16.8, 7.55, 31.2),
                ZoneMetrics::new(46.0, 0, 0.15, 0.66).with_readings(7.4, 16.6, 7.83, 31.0),
            ),
            _ => (
                ZoneMetrics::new(52.0, 1, 0.18, 0.74).with_readings(7.1, 16.7, 7.82, 31.1),
                ZoneMetrics::new(44.0, 0, 0.12, 0.61).with_readings(7.4, 16.6, 7.88, 31.0),
            ),
        }
    }
}

impl MetricSource for DemoSource {
    fn latest(&self, scenario: &str) -> Result<MetricSnapshot> {
        let (zone_a, zone_b) = Self::fixture(scenario);
        Ok(MetricSnapshot {
            zone_a,
            zone_b,
            context_label: Some(scenario.to_string()),
        })
    }
}

/// Seven-day demo series for trend charts, ending at `r_max`.
#[must_use]
pub fn demo_trend(r_max: f64) -> [f64; 7] {
    TREND_SHAPE.map(|factor| (r_max * factor).clamp(0.0, 100.0))
}

#[cfg(test)]
mod tests {
    use super::{DemoSource, demo_trend};
    use crate::engine::payload::{DocMeta, assemble};
    use crate::engine::status::Status;
    use crate::source::MetricSource;

    fn evaluate(scenario: &str) -> crate::engine::payload::ReportPayload {
        let snap = DemoSource.latest(scenario).expect("demo never fails");
        assemble(
            &snap.zone_a,
            &snap.zone_b,
            snap.effective_label(scenario),
            &DocMeta::default(),
        )
        .expect("fixtures are valid")
    }

    #[test]
    fn every_fixture_validates() {
        for scenario in ["oxygen drop", "flow degradation", "filtration load", "x"] {
            let p = evaluate(scenario);
            assert!(p.r_max <= 100.0);
        }
    }

    #[test]
    fn fixtures_span_the_bands() {
        assert_eq!(evaluate("normal variation").status, Status::Caution);
        assert_eq!(evaluate("oxygen drop").status, Status::Critical);
        assert_eq!(evaluate("flow degradation").status, Status::Watch);
        assert_eq!(evaluate("filtration load").status, Status::Caution);
    }

    #[test]
    fn korean_scenario_names_select_fixtures() {
        let p = evaluate("산소량 급락");
        assert_eq!(p.scenario, "oxygen drop");
        assert!((p.r_max - 82.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_scenario_keeps_label_for_fallback_reporting() {
        let p = evaluate("storm surge");
        assert!(p.context_fallback);
        assert!((p.r_max - 52.0).abs() < f64::EPSILON);
    }

    #[test]
    fn trend_ends_at_current_risk_and_is_clamped() {
        let week = demo_trend(82.0);
        assert!((week[6] - 82.0).abs() < f64::EPSILON);
        assert!((week[0] - 49.2).abs() < 1e-9);
        assert!(demo_trend(250.0).iter().all(|v| *v <= 100.0));
        assert!(demo_trend(0.0).iter().all(|v| *v == 0.0));
    }
}
