//! Report payload assembly: the engine's single output.
//!
//! A [`ReportPayload`] is built once per evaluation cycle from a zone pair,
//! a context label and caller-owned document metadata. Renderers (dashboards,
//! PDF exports, JSON APIs) format its fields verbatim and never re-derive a
//! judgment, so field names and units are fixed:
//!
//! - `r_max` is on the 0–100 risk scale;
//! - `exposure_7d_pct` and `util_pct` are percentages (0–100), not fractions;
//! - `shock_24h` is the integer sum across zones.
//!
//! The only time-dependent field is `generated_at`. [`RiskEngine::assemble_at`]
//! pins it so two evaluations of identical inputs serialize byte-identically.

#![allow(missing_docs)]

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::core::errors::Result;
use crate::engine::catalog::{self, Action, CauseWeight};
use crate::engine::evidence::{self, ReferenceBands};
use crate::engine::expansion::{self, ExpansionStage};
use crate::engine::locale::Locale;
use crate::engine::metrics::{ZoneId, ZoneMetrics};
use crate::engine::status::{self, Status};
use crate::engine::zones;

/// Format of the `generated_at` stamp.
pub const GENERATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Passthrough document metadata. Opaque to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocMeta {
    pub facility_name: String,
    pub report_period: String,
    pub report_owner: String,
    pub system_version: String,
    pub doc_id: String,
    pub rev: String,
    pub issuer: String,
    pub logo_text: String,
    pub security_level: String,
    pub rev_date: String,
    pub rev_desc: String,
}

impl Default for DocMeta {
    fn default() -> Self {
        Self {
            facility_name: "BioModule 150".to_string(),
            report_period: "(e.g. 2026-02-10 ~ 2026-02-16)".to_string(),
            report_owner: "(e.g. operations team)".to_string(),
            system_version: "Bio-OS v1.0".to_string(),
            doc_id: "BIO-OS-DOC-001".to_string(),
            rev: "v1.0".to_string(),
            issuer: "(e.g. BioModule Lab)".to_string(),
            logo_text: "Bio-OS".to_string(),
            security_level: "Public".to_string(),
            rev_date: Local::now().format("%Y-%m-%d").to_string(),
            rev_desc: "initial issue".to_string(),
        }
    }
}

/// Immutable snapshot handed to renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPayload {
    pub meta: DocMeta,
    pub generated_at: String,
    pub status: Status,
    pub r_max: f64,
    pub culprit: ZoneId,
    /// Label as supplied by the caller.
    pub context_label: String,
    /// Catalog entry actually used.
    pub scenario: String,
    /// True when `context_label` was unknown and the default entry was used.
    pub context_fallback: bool,
    pub causes: Vec<CauseWeight>,
    pub causes_top_names: Vec<String>,
    pub actions: Vec<Action>,
    pub front_action: Action,
    pub shock_24h: u32,
    pub exposure_7d_pct: f64,
    pub util_pct: f64,
    pub expansion_stage: ExpansionStage,
    pub evidence: Vec<String>,
    pub zone_a: ZoneMetrics,
    pub zone_b: ZoneMetrics,
}

impl ReportPayload {
    /// The culprit zone's raw metrics.
    #[must_use]
    pub const fn culprit_metrics(&self) -> &ZoneMetrics {
        match self.culprit {
            ZoneId::A => &self.zone_a,
            ZoneId::B => &self.zone_b,
        }
    }

    /// One-line operator summary.
    #[must_use]
    pub fn headline(&self, locale: Locale) -> String {
        let action = &self.front_action;
        match locale {
            Locale::En => format!(
                "{status} | risk {r_max:.0}/100 ({zone}) | {priority} {desc} ({when})",
                status = self.status.label(locale),
                r_max = self.r_max,
                zone = self.culprit.label(locale),
                priority = action.priority,
                desc = action.description,
                when = action.timeframe,
            ),
            Locale::Ko => format!(
                "현재 상태: {status} | 전체 위험 점수 {r_max:.0}/100 (기준: {zone}) | {meaning}: {desc}",
                status = self.status.label(locale),
                r_max = self.r_max,
                zone = self.culprit.label(locale),
                meaning = action.priority.meaning(locale),
                desc = catalog::localize(&action.description, locale),
            ),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Stateless assembler parameterized by evidence reference bands.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RiskEngine {
    bands: ReferenceBands,
}

impl RiskEngine {
    #[must_use]
    pub const fn new(bands: ReferenceBands) -> Self {
        Self { bands }
    }

    #[must_use]
    pub const fn bands(&self) -> &ReferenceBands {
        &self.bands
    }

    /// Assemble a payload stamped with the local wall clock.
    pub fn assemble(
        &self,
        zone_a: &ZoneMetrics,
        zone_b: &ZoneMetrics,
        context_label: &str,
        meta: &DocMeta,
    ) -> Result<ReportPayload> {
        self.assemble_at(
            zone_a,
            zone_b,
            context_label,
            meta,
            Local::now().naive_local(),
        )
    }

    /// Assemble a payload with an explicit generation time.
    ///
    /// Fails only when a zone violates its metric domain.
    pub fn assemble_at(
        &self,
        zone_a: &ZoneMetrics,
        zone_b: &ZoneMetrics,
        context_label: &str,
        meta: &DocMeta,
        generated_at: NaiveDateTime,
    ) -> Result<ReportPayload> {
        zone_a.validate(ZoneId::A)?;
        zone_b.validate(ZoneId::B)?;

        let reduction = zones::reduce(zone_a, zone_b);
        let derivation = catalog::derive_causes_and_actions(context_label);
        let front_action = derivation
            .actions
            .first()
            .cloned()
            .unwrap_or_else(catalog::fallback_front_action);

        let culprit_metrics = match reduction.culprit {
            ZoneId::A => zone_a,
            ZoneId::B => zone_b,
        };
        let evidence =
            evidence::format_evidence(evidence::zone_readings(culprit_metrics, &self.bands));

        Ok(ReportPayload {
            meta: meta.clone(),
            generated_at: generated_at.format(GENERATED_AT_FORMAT).to_string(),
            status: status::classify(reduction.r_max),
            r_max: reduction.r_max,
            culprit: reduction.culprit,
            context_label: context_label.to_string(),
            scenario: derivation.scenario.to_string(),
            context_fallback: derivation.fallback,
            causes_top_names: derivation.causes.iter().map(|c| c.label.clone()).collect(),
            causes: derivation.causes,
            actions: derivation.actions,
            front_action,
            shock_24h: reduction.shock_24h_total,
            exposure_7d_pct: reduction.exposure_pct,
            util_pct: reduction.util_pct,
            expansion_stage: expansion::stage(reduction.r_max),
            evidence,
            zone_a: *zone_a,
            zone_b: *zone_b,
        })
    }
}

/// Assemble with the default reference bands.
pub fn assemble(
    zone_a: &ZoneMetrics,
    zone_b: &ZoneMetrics,
    context_label: &str,
    meta: &DocMeta,
) -> Result<ReportPayload> {
    RiskEngine::default().assemble(zone_a, zone_b, context_label, meta)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::{DocMeta, RiskEngine, assemble};
    use crate::core::errors::BioError;
    use crate::engine::catalog::Priority;
    use crate::engine::expansion::ExpansionStage;
    use crate::engine::locale::Locale;
    use crate::engine::metrics::{ZoneId, ZoneMetrics};
    use crate::engine::status::Status;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 16)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .expect("valid timestamp")
    }

    fn oxygen_drop_pair() -> (ZoneMetrics, ZoneMetrics) {
        (
            ZoneMetrics::new(82.0, 9, 0.48, 0.92).with_readings(5.3, 16.8, 7.68, 31.2),
            ZoneMetrics::new(34.0, 0, 0.05, 0.38),
        )
    }

    #[test]
    fn oxygen_drop_scenario() {
        let (a, b) = oxygen_drop_pair();
        let p = RiskEngine::default()
            .assemble_at(&a, &b, "oxygen drop", &DocMeta::default(), fixed_time())
            .expect("valid inputs");

        assert!((p.r_max - 82.0).abs() < f64::EPSILON);
        assert_eq!(p.culprit, ZoneId::A);
        assert_eq!(p.status, Status::Critical);
        assert_eq!(p.expansion_stage, ExpansionStage::ImmediateReview);
        assert_eq!(p.causes[0].label, "oxygen drop");
        assert!((p.causes[0].weight - 0.52).abs() < f64::EPSILON);
        assert_eq!(p.shock_24h, 9);
        assert!((p.exposure_7d_pct - 48.0).abs() < 1e-9);
        assert!((p.util_pct - 92.0).abs() < 1e-9);
        assert_eq!(p.front_action.priority, Priority::P1);
        assert_eq!(p.evidence[0], "dissolved oxygen 5.3 (reference 6.0~10.0)");
        assert_eq!(p.evidence[2], "pH 7.68 (reference 7.6~8.3)");
        assert!(!p.context_fallback);
        assert_eq!(p.generated_at, "2026-02-16 09:30");
    }

    #[test]
    fn zone_b_culprit_at_caution() {
        let a = ZoneMetrics::new(44.0, 0, 0.1, 0.5);
        let b = ZoneMetrics::new(52.0, 1, 0.2, 0.6);
        let p = assemble(&a, &b, "normal variation", &DocMeta::default()).expect("valid");
        assert_eq!(p.culprit, ZoneId::B);
        assert!((p.r_max - 52.0).abs() < f64::EPSILON);
        assert_eq!(p.status, Status::Caution);
    }

    #[test]
    fn watch_boundary() {
        let a = ZoneMetrics::new(60.0, 0, 0.0, 0.0);
        let b = ZoneMetrics::new(10.0, 0, 0.0, 0.0);
        let p = assemble(&a, &b, "flow degradation", &DocMeta::default()).expect("valid");
        assert_eq!(p.status, Status::Watch);
        assert_eq!(p.expansion_stage.to_string(), "prepare equipment expansion");
    }

    #[test]
    fn evidence_comes_from_culprit_zone() {
        let a = ZoneMetrics::new(20.0, 0, 0.0, 0.0).with_readings(9.0, 15.0, 8.0, 30.0);
        let b = ZoneMetrics::new(70.0, 0, 0.0, 0.0).with_readings(6.4, 19.0, 7.61, 33.0);
        let p = assemble(&a, &b, "", &DocMeta::default()).expect("valid");
        assert_eq!(p.culprit, ZoneId::B);
        assert_eq!(p.evidence[0], "dissolved oxygen 6.4 (reference 6.0~10.0)");
        assert_eq!(p.culprit_metrics().risk, 70.0);
    }

    #[test]
    fn unknown_context_uses_default_entry() {
        let (a, b) = oxygen_drop_pair();
        let p = assemble(&a, &b, "solar flare", &DocMeta::default()).expect("valid");
        assert!(p.context_fallback);
        assert_eq!(p.context_label, "solar flare");
        assert_eq!(p.scenario, "normal variation");
        assert_eq!(p.front_action.priority, Priority::P2);
    }

    #[test]
    fn invalid_zone_fails_fast() {
        let (a, mut b) = oxygen_drop_pair();
        b.util = 1.5;
        let err = assemble(&a, &b, "oxygen drop", &DocMeta::default()).expect_err("invalid");
        match err {
            BioError::InvalidMetric { zone, field, .. } => {
                assert_eq!(zone, "B");
                assert_eq!(field, "util");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn identical_inputs_serialize_identically() {
        let (a, b) = oxygen_drop_pair();
        let engine = RiskEngine::default();
        let meta = DocMeta::default();
        let first = engine
            .assemble_at(&a, &b, "oxygen drop", &meta, fixed_time())
            .and_then(|p| p.to_json_pretty())
            .expect("first");
        let second = engine
            .assemble_at(&a, &b, "oxygen drop", &meta, fixed_time())
            .and_then(|p| p.to_json_pretty())
            .expect("second");
        assert_eq!(first, second);
    }

    #[test]
    fn generated_at_is_the_only_clock_dependent_field() {
        let (a, b) = oxygen_drop_pair();
        let meta = DocMeta::default();
        let mut first = assemble(&a, &b, "oxygen drop", &meta).expect("first");
        let mut second = assemble(&a, &b, "oxygen drop", &meta).expect("second");
        assert_eq!(first.generated_at.len(), "2026-02-16 09:30".len());
        first.generated_at.clear();
        second.generated_at.clear();
        assert_eq!(first, second);
    }

    #[test]
    fn meta_passes_through_untouched() {
        let (a, b) = oxygen_drop_pair();
        let meta = DocMeta {
            facility_name: "Seed-M1".to_string(),
            security_level: "Internal".to_string(),
            ..DocMeta::default()
        };
        let p = assemble(&a, &b, "oxygen drop", &meta).expect("valid");
        assert_eq!(p.meta, meta);
    }

    #[test]
    fn default_revision_date_is_issue_day() {
        let meta = DocMeta::default();
        let parsed = chrono::NaiveDate::parse_from_str(&meta.rev_date, "%Y-%m-%d")
            .expect("rev_date is a calendar date");
        let today = chrono::Local::now().date_naive();
        assert!(
            (today - parsed).num_days().abs() <= 1,
            "rev_date {} is not today ({today})",
            meta.rev_date
        );
    }

    #[test]
    fn json_field_names_and_units() {
        let (a, b) = oxygen_drop_pair();
        let p = RiskEngine::default()
            .assemble_at(&a, &b, "oxygen drop", &DocMeta::default(), fixed_time())
            .expect("valid");
        let json = serde_json::to_value(&p).expect("serialize");
        assert_eq!(json["status"], "Critical");
        assert_eq!(json["culprit"], "A");
        assert_eq!(json["expansion_stage"], "immediate expansion review");
        assert_eq!(json["shock_24h"], 9);
        assert_eq!(json["front_action"]["priority"], "P1");
        assert_eq!(json["causes_top_names"][1], "fluctuation increase");
        assert!(json["exposure_7d_pct"].as_f64().is_some_and(|v| v > 1.0));
    }

    #[test]
    fn headlines() {
        let (a, b) = oxygen_drop_pair();
        let p = assemble(&a, &b, "oxygen drop", &DocMeta::default()).expect("valid");
        assert_eq!(
            p.headline(Locale::En),
            "Critical | risk 82/100 (Zone A) | P1 raise oxygen supply stage (now)"
        );
        let ko = p.headline(Locale::Ko);
        assert!(ko.contains("위험"), "{ko}");
        assert!(ko.contains("A구역"), "{ko}");
        assert!(ko.contains("산소 공급 단계 상향"), "{ko}");
    }

    #[test]
    fn payload_round_trips_through_json() {
        let (a, b) = oxygen_drop_pair();
        let p = assemble(&a, &b, "filtration load", &DocMeta::default()).expect("valid");
        let raw = p.to_json_pretty().expect("serialize");
        let back: super::ReportPayload = serde_json::from_str(&raw).expect("parse");
        assert_eq!(back, p);
    }
}
