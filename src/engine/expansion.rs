//! Capacity-planning stage over the system-level risk score.
//!
//! Shares its cut points with [`crate::engine::status`] today, but the two
//! ladders answer different questions and are kept independent.

#![allow(missing_docs)]

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::locale::Locale;

pub const ADJUSTMENT_FLOOR: f64 = 40.0;
pub const PREPARE_FLOOR: f64 = 60.0;
pub const REVIEW_FLOOR: f64 = 75.0;

/// Expansion decision stage. Serialized as the operator-facing phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExpansionStage {
    #[serde(rename = "sufficient spare capacity")]
    SpareCapacity,
    #[serde(rename = "operational adjustment required")]
    OperationalAdjustment,
    #[serde(rename = "prepare equipment expansion")]
    PrepareExpansion,
    #[serde(rename = "immediate expansion review")]
    ImmediateReview,
}

impl ExpansionStage {
    pub const ALL: [Self; 4] = [
        Self::SpareCapacity,
        Self::OperationalAdjustment,
        Self::PrepareExpansion,
        Self::ImmediateReview,
    ];

    #[must_use]
    pub const fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::SpareCapacity, Locale::En) => "sufficient spare capacity",
            (Self::OperationalAdjustment, Locale::En) => "operational adjustment required",
            (Self::PrepareExpansion, Locale::En) => "prepare equipment expansion",
            (Self::ImmediateReview, Locale::En) => "immediate expansion review",
            (Self::SpareCapacity, Locale::Ko) => "설비 여유 있음",
            (Self::OperationalAdjustment, Locale::Ko) => "운영 조정 필요",
            (Self::PrepareExpansion, Locale::Ko) => "설비 증설 준비",
            (Self::ImmediateReview, Locale::Ko) => "즉시 증설 검토",
        }
    }
}

impl fmt::Display for ExpansionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(Locale::En))
    }
}

/// Map the dominant zone's risk to an expansion stage.
#[must_use]
pub fn stage(r_max: f64) -> ExpansionStage {
    if r_max >= REVIEW_FLOOR {
        ExpansionStage::ImmediateReview
    } else if r_max >= PREPARE_FLOOR {
        ExpansionStage::PrepareExpansion
    } else if r_max >= ADJUSTMENT_FLOOR {
        ExpansionStage::OperationalAdjustment
    } else {
        ExpansionStage::SpareCapacity
    }
}

#[cfg(test)]
mod tests {
    use super::{ExpansionStage, stage};

    #[test]
    fn cut_points_produce_documented_labels() {
        let cases = [
            (39.99, "sufficient spare capacity"),
            (40.0, "operational adjustment required"),
            (59.99, "operational adjustment required"),
            (60.0, "prepare equipment expansion"),
            (74.99, "prepare equipment expansion"),
            (75.0, "immediate expansion review"),
        ];
        for (score, expected) in cases {
            assert_eq!(stage(score).to_string(), expected, "score {score}");
        }
    }

    #[test]
    fn serialized_form_matches_display() {
        for s in ExpansionStage::ALL {
            let json = serde_json::to_string(&s).expect("serialize");
            assert_eq!(json, format!("\"{s}\""));
        }
    }

    #[test]
    fn deserializes_from_phrase() {
        let parsed: ExpansionStage =
            serde_json::from_str("\"prepare equipment expansion\"").expect("parse");
        assert_eq!(parsed, ExpansionStage::PrepareExpansion);
    }
}
