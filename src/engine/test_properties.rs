//! Property-based tests for the aggregation invariants.
//!
//! Uses `proptest` to check the worse-of-two rule, the tie-break, band
//! partitioning and monotonicity of both threshold ladders, the evidence cap,
//! and determinism of payload assembly.

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use super::evidence::{EVIDENCE_LINE_LIMIT, Reading, ReferenceBand, format_evidence};
use super::expansion::{ExpansionStage, stage};
use super::metrics::{ZoneId, ZoneMetrics};
use super::payload::{DocMeta, RiskEngine};
use super::status::{Status, classify};
use super::zones::reduce;

// ──────────────────── strategies ────────────────────

fn arb_zone() -> impl Strategy<Value = ZoneMetrics> {
    (
        0.0f64..=100.0,
        0u32..50,
        0.0f64..=1.0,
        0.0f64..=1.0,
        proptest::option::of(0.0f64..15.0),
        proptest::option::of(0.0f64..30.0),
        proptest::option::of(6.0f64..9.0),
        proptest::option::of(20.0f64..40.0),
    )
        .prop_map(|(risk, shock, exposure, util, dox, temp, ph, sal)| ZoneMetrics {
            risk,
            shock_24h: shock,
            exposure_7d: exposure,
            util,
            dissolved_oxygen: dox,
            temperature: temp,
            ph,
            salinity: sal,
        })
}

fn arb_label() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("oxygen drop".to_string()),
        Just("flow degradation".to_string()),
        Just("filtration load".to_string()),
        Just("normal variation".to_string()),
        "[a-z ]{0,16}",
    ]
}

fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 2, 16)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid timestamp")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn r_max_is_max_of_zone_risks(a in arb_zone(), b in arb_zone()) {
        let r = reduce(&a, &b);
        prop_assert_eq!(r.r_max, a.risk.max(b.risk));
        let expected = if a.risk >= b.risk { ZoneId::A } else { ZoneId::B };
        prop_assert_eq!(r.culprit, expected);
    }

    #[test]
    fn tie_always_favors_zone_a(a in arb_zone(), b in arb_zone()) {
        let b = ZoneMetrics { risk: a.risk, ..b };
        prop_assert_eq!(reduce(&a, &b).culprit, ZoneId::A);
    }

    #[test]
    fn aggregates_never_average(a in arb_zone(), b in arb_zone()) {
        let r = reduce(&a, &b);
        prop_assert_eq!(r.shock_24h_total, a.shock_24h + b.shock_24h);
        prop_assert!(r.exposure_pct >= 100.0 * a.exposure_7d);
        prop_assert!(r.exposure_pct >= 100.0 * b.exposure_7d);
        prop_assert!(r.util_pct >= 100.0 * a.util);
        prop_assert!(r.util_pct >= 100.0 * b.util);
    }

    #[test]
    fn classify_is_monotonic(x in 0.0f64..=100.0, y in 0.0f64..=100.0) {
        let (lo, hi) = if x <= y { (x, y) } else { (y, x) };
        prop_assert!(classify(lo) <= classify(hi));
        prop_assert!(stage(lo) <= stage(hi));
    }

    #[test]
    fn bands_partition_the_domain(score in 0.0f64..=100.0) {
        let expected = if score < 40.0 {
            Status::Normal
        } else if score < 60.0 {
            Status::Caution
        } else if score < 75.0 {
            Status::Watch
        } else {
            Status::Critical
        };
        prop_assert_eq!(classify(score), expected);
    }

    #[test]
    fn stage_tracks_status_at_current_cut_points(score in 0.0f64..=100.0) {
        let expected = match classify(score) {
            Status::Normal => ExpansionStage::SpareCapacity,
            Status::Caution => ExpansionStage::OperationalAdjustment,
            Status::Watch => ExpansionStage::PrepareExpansion,
            Status::Critical => ExpansionStage::ImmediateReview,
        };
        prop_assert_eq!(stage(score), expected);
    }

    #[test]
    fn evidence_never_exceeds_limit(count in 0usize..40, value in -100.0f64..100.0) {
        let readings = (0..count).map(|i| Reading {
            name: format!("sensor-{i}"),
            value,
            band: ReferenceBand::new(0.0, 1.0),
            decimals: i % 3,
        });
        let lines = format_evidence(readings);
        prop_assert_eq!(lines.len(), count.min(EVIDENCE_LINE_LIMIT));
    }

    #[test]
    fn assemble_is_deterministic(a in arb_zone(), b in arb_zone(), label in arb_label()) {
        let engine = RiskEngine::default();
        let meta = DocMeta::default();
        let first = engine.assemble_at(&a, &b, &label, &meta, fixed_time());
        let second = engine.assemble_at(&a, &b, &label, &meta, fixed_time());
        let first = first.expect("valid zone");
        let second = second.expect("valid zone");
        prop_assert_eq!(
            serde_json::to_string(&first).expect("serialize"),
            serde_json::to_string(&second).expect("serialize")
        );
        prop_assert!(first.causes.len() <= 3);
        prop_assert!(first.evidence.len() <= EVIDENCE_LINE_LIMIT);
        prop_assert!(first.actions.windows(2).all(|w| w[0].priority <= w[1].priority));
    }

    #[test]
    fn out_of_range_risk_is_rejected(a in arb_zone(), b in arb_zone(), excess in 0.001f64..1000.0) {
        let bad = ZoneMetrics { risk: 100.0 + excess, ..a };
        let result = RiskEngine::default().assemble_at(&bad, &b, "", &DocMeta::default(), fixed_time());
        prop_assert!(result.is_err());
    }
}

// ──────────────────── non-proptest invariant tests ────────────────────

#[test]
fn all_four_statuses_are_reachable() {
    let seen: Vec<Status> = [0.0, 45.0, 65.0, 90.0].into_iter().map(classify).collect();
    assert_eq!(seen, Status::ALL);
}
