//! Per-zone telemetry record and its domain validation.
//!
//! Readings arrive already aggregated by the metric source. The engine never
//! clamps or rescales them: a value outside its declared domain is rejected with
//! [`BioError::InvalidMetric`] naming the zone, field and offending value.

#![allow(missing_docs)]

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::errors::{BioError, Result};
use crate::engine::locale::Locale;

/// Independently monitored operating loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ZoneId {
    A,
    B,
}

impl ZoneId {
    /// Evaluation order; earlier zones win exact risk ties.
    pub const ALL: [Self; 2] = [Self::A, Self::B];

    #[must_use]
    pub const fn letter(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }

    #[must_use]
    pub const fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::A, Locale::En) => "Zone A",
            (Self::B, Locale::En) => "Zone B",
            (Self::A, Locale::Ko) => "A구역",
            (Self::B, Locale::Ko) => "B구역",
        }
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// One zone's readings for the current evaluation cycle.
///
/// `risk` is on a 0–100 scale; `exposure_7d` and `util` are fractions in
/// `[0, 1]`. The environmental readings feed evidence lines only and may be
/// absent when a sensor is not reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneMetrics {
    pub risk: f64,
    pub shock_24h: u32,
    pub exposure_7d: f64,
    pub util: f64,
    #[serde(rename = "do", default, skip_serializing_if = "Option::is_none")]
    pub dissolved_oxygen: Option<f64>,
    #[serde(rename = "temp", default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ph: Option<f64>,
    #[serde(rename = "sal", default, skip_serializing_if = "Option::is_none")]
    pub salinity: Option<f64>,
}

impl ZoneMetrics {
    /// Scored fields only; environmental readings left unset.
    #[must_use]
    pub const fn new(risk: f64, shock_24h: u32, exposure_7d: f64, util: f64) -> Self {
        Self {
            risk,
            shock_24h,
            exposure_7d,
            util,
            dissolved_oxygen: None,
            temperature: None,
            ph: None,
            salinity: None,
        }
    }

    /// Attach the four environmental readings.
    #[must_use]
    pub const fn with_readings(
        mut self,
        dissolved_oxygen: f64,
        temperature: f64,
        ph: f64,
        salinity: f64,
    ) -> Self {
        self.dissolved_oxygen = Some(dissolved_oxygen);
        self.temperature = Some(temperature);
        self.ph = Some(ph);
        self.salinity = Some(salinity);
        self
    }

    /// Reject any field outside its declared domain.
    pub fn validate(&self, zone: ZoneId) -> Result<()> {
        check_range(zone, "risk", self.risk, 0.0, 100.0, "[0, 100]")?;
        check_range(zone, "exposure_7d", self.exposure_7d, 0.0, 1.0, "[0, 1]")?;
        check_range(zone, "util", self.util, 0.0, 1.0, "[0, 1]")?;

        for kind in ReadingKind::ALL {
            if let Some(value) = kind.value_in(self)
                && !value.is_finite()
            {
                return Err(BioError::InvalidMetric {
                    zone: zone.to_string(),
                    field: kind.field(),
                    value,
                    expected: "a finite number",
                });
            }
        }
        Ok(())
    }
}

fn check_range(
    zone: ZoneId,
    field: &'static str,
    value: f64,
    lo: f64,
    hi: f64,
    expected: &'static str,
) -> Result<()> {
    if (lo..=hi).contains(&value) {
        Ok(())
    } else {
        Err(BioError::InvalidMetric {
            zone: zone.to_string(),
            field,
            value,
            expected,
        })
    }
}

/// Environmental reading carried for evidence display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingKind {
    DissolvedOxygen,
    Temperature,
    Ph,
    Salinity,
}

impl ReadingKind {
    /// Evidence display order.
    pub const ALL: [Self; 4] = [
        Self::DissolvedOxygen,
        Self::Temperature,
        Self::Ph,
        Self::Salinity,
    ];

    /// Wire field name in [`ZoneMetrics`].
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::DissolvedOxygen => "do",
            Self::Temperature => "temp",
            Self::Ph => "ph",
            Self::Salinity => "sal",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::DissolvedOxygen => "dissolved oxygen",
            Self::Temperature => "water temperature",
            Self::Ph => "pH",
            Self::Salinity => "salinity",
        }
    }

    /// Reading name in `locale`; the Korean names are the field console's.
    #[must_use]
    pub const fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (_, Locale::En) => self.display_name(),
            (Self::DissolvedOxygen, Locale::Ko) => "산소량(용존산소)",
            (Self::Temperature, Locale::Ko) => "물 온도",
            (Self::Ph, Locale::Ko) => "물 산도(pH)",
            (Self::Salinity, Locale::Ko) => "염도",
        }
    }

    /// Decimal places shown for the current value.
    #[must_use]
    pub const fn decimals(self) -> usize {
        match self {
            Self::Ph => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub const fn value_in(self, metrics: &ZoneMetrics) -> Option<f64> {
        match self {
            Self::DissolvedOxygen => metrics.dissolved_oxygen,
            Self::Temperature => metrics.temperature,
            Self::Ph => metrics.ph,
            Self::Salinity => metrics.salinity,
        }
    }
}
