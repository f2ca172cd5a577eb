//! Evidence lines: current reading against its reference band.
//!
//! Pure formatting, no judgment. Lines look like
//! `dissolved oxygen 5.3 (reference 6.0~10.0)`; pH keeps two decimals.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

use crate::core::errors::{BioError, Result};
use crate::engine::locale::Locale;
use crate::engine::metrics::{ReadingKind, ZoneMetrics};

/// No renderer is ever handed more lines than this.
pub const EVIDENCE_LINE_LIMIT: usize = 6;

/// Inclusive normal operating band for one reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceBand {
    pub lo: f64,
    pub hi: f64,
}

impl ReferenceBand {
    #[must_use]
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    pub fn validate(&self, name: &str) -> Result<()> {
        if !(self.lo.is_finite() && self.hi.is_finite()) || self.lo >= self.hi {
            return Err(BioError::InvalidConfig {
                details: format!(
                    "evidence.{name} band must be finite with lo < hi, got {}~{}",
                    self.lo, self.hi
                ),
            });
        }
        Ok(())
    }
}

/// Reference bands for the four environmental readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceBands {
    pub dissolved_oxygen: ReferenceBand,
    pub temperature: ReferenceBand,
    pub ph: ReferenceBand,
    pub salinity: ReferenceBand,
}

impl Default for ReferenceBands {
    fn default() -> Self {
        Self {
            dissolved_oxygen: ReferenceBand::new(6.0, 10.0),
            temperature: ReferenceBand::new(14.0, 20.0),
            ph: ReferenceBand::new(7.6, 8.3),
            salinity: ReferenceBand::new(28.0, 34.0),
        }
    }
}

impl ReferenceBands {
    #[must_use]
    pub const fn band(&self, kind: ReadingKind) -> ReferenceBand {
        match kind {
            ReadingKind::DissolvedOxygen => self.dissolved_oxygen,
            ReadingKind::Temperature => self.temperature,
            ReadingKind::Ph => self.ph,
            ReadingKind::Salinity => self.salinity,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.dissolved_oxygen.validate("dissolved_oxygen")?;
        self.temperature.validate("temperature")?;
        self.ph.validate("ph")?;
        self.salinity.validate("salinity")
    }
}

/// A reading ready to be formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub name: String,
    pub value: f64,
    pub band: ReferenceBand,
    pub decimals: usize,
}

/// Readings present on a zone, in display order. Missing sensors are skipped.
#[must_use]
pub fn zone_readings(metrics: &ZoneMetrics, bands: &ReferenceBands) -> Vec<Reading> {
    zone_readings_in(metrics, bands, Locale::En)
}

/// [`zone_readings`] with reading names in `locale`.
#[must_use]
pub fn zone_readings_in(
    metrics: &ZoneMetrics,
    bands: &ReferenceBands,
    locale: Locale,
) -> Vec<Reading> {
    ReadingKind::ALL
        .iter()
        .filter_map(|&kind| {
            kind.value_in(metrics).map(|value| Reading {
                name: kind.label(locale).to_string(),
                value,
                band: bands.band(kind),
                decimals: kind.decimals(),
            })
        })
        .collect()
}

#[must_use]
pub fn format_reading(reading: &Reading) -> String {
    format_reading_in(reading, Locale::En)
}

/// Band edges keep at least one decimal and at most the reading's own precision,
/// so `7.6` stays `7.6` and `7.55` is not shown as `7.5`.
#[must_use]
pub fn format_reading_in(reading: &Reading, locale: Locale) -> String {
    let reference = match locale {
        Locale::En => "reference",
        Locale::Ko => "기준",
    };
    format!(
        "{name} {value:.prec$} ({reference} {lo}~{hi})",
        name = reading.name,
        value = reading.value,
        prec = reading.decimals,
        lo = format_edge(reading.band.lo, reading.decimals),
        hi = format_edge(reading.band.hi, reading.decimals),
    )
}

fn format_edge(edge: f64, max_decimals: usize) -> String {
    let max_decimals = max_decimals.max(1);
    (1..max_decimals)
        .map(|prec| format!("{edge:.prec$}"))
        .find(|shown| {
            shown
                .parse::<f64>()
                .is_ok_and(|parsed| (parsed - edge).abs() < 1e-9)
        })
        .unwrap_or_else(|| format!("{edge:.max_decimals$}"))
}

/// Format at most [`EVIDENCE_LINE_LIMIT`] readings.
#[must_use]
pub fn format_evidence<I>(readings: I) -> Vec<String>
where
    I: IntoIterator<Item = Reading>,
{
    format_evidence_in(readings, Locale::En)
}

/// [`format_evidence`] with the reference marker in `locale`.
#[must_use]
pub fn format_evidence_in<I>(readings: I, locale: Locale) -> Vec<String>
where
    I: IntoIterator<Item = Reading>,
{
    readings
        .into_iter()
        .take(EVIDENCE_LINE_LIMIT)
        .map(|reading| format_reading_in(&reading, locale))
        .collect()
}
