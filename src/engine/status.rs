//! Four-band operating status over the system-level risk score.
//!
//! The cut points are part of the operating standard and are not configurable.
//! Each band is closed on its lower edge: `[0, 40) [40, 60) [60, 75) [75, ..)`.

#![allow(missing_docs)]

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::locale::Locale;

pub const CAUTION_FLOOR: f64 = 40.0;
pub const WATCH_FLOOR: f64 = 60.0;
pub const CRITICAL_FLOOR: f64 = 75.0;

/// Operating status derived from a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    Normal,
    Caution,
    Watch,
    Critical,
}

impl Status {
    /// All bands in ascending severity.
    pub const ALL: [Self; 4] = [Self::Normal, Self::Caution, Self::Watch, Self::Critical];

    #[must_use]
    pub const fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Normal, Locale::En) => "Normal",
            (Self::Caution, Locale::En) => "Caution",
            (Self::Watch, Locale::En) => "Watch",
            (Self::Critical, Locale::En) => "Critical",
            (Self::Normal, Locale::Ko) => "정상",
            (Self::Caution, Locale::Ko) => "주의",
            (Self::Watch, Locale::Ko) => "경계",
            (Self::Critical, Locale::Ko) => "위험",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(Locale::En))
    }
}

/// Classify a 0–100 risk score.
///
/// Range checking happens when metrics are validated; this function accepts any
/// real number.
#[must_use]
pub fn classify(score: f64) -> Status {
    if score < CAUTION_FLOOR {
        Status::Normal
    } else if score < WATCH_FLOOR {
        Status::Caution
    } else if score < CRITICAL_FLOOR {
        Status::Watch
    } else {
        Status::Critical
    }
}

#[cfg(test)]
mod tests {
    use super::{Status, classify};
    use crate::engine::locale::Locale;

    #[test]
    fn cut_points_are_exact() {
        assert_eq!(classify(39.99), Status::Normal);
        assert_eq!(classify(40.0), Status::Caution);
        assert_eq!(classify(59.99), Status::Caution);
        assert_eq!(classify(60.0), Status::Watch);
        assert_eq!(classify(74.99), Status::Watch);
        assert_eq!(classify(75.0), Status::Critical);
    }

    #[test]
    fn domain_ends() {
        assert_eq!(classify(0.0), Status::Normal);
        assert_eq!(classify(100.0), Status::Critical);
    }

    #[test]
    fn korean_labels() {
        let labels: Vec<&str> = Status::ALL.iter().map(|s| s.label(Locale::Ko)).collect();
        assert_eq!(labels, ["정상", "주의", "경계", "위험"]);
    }

    #[test]
    fn serializes_as_variant_name() {
        let json = serde_json::to_string(&Status::Watch).expect("serialize");
        assert_eq!(json, "\"Watch\"");
    }
}
