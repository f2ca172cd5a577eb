//! Metric sources: where zone readings come from before the engine sees them.
//!
//! A source is an external collaborator. Whatever latency or failure it has
//! belongs to it; the engine only ever receives an already-resolved
//! [`MetricSnapshot`].

#![allow(missing_docs)]

pub mod demo;
pub mod file;

use serde::{Deserialize, Serialize};

use crate::core::errors::Result;
use crate::engine::metrics::ZoneMetrics;

/// One evaluation cycle's inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricSnapshot {
    pub zone_a: ZoneMetrics,
    pub zone_b: ZoneMetrics,
    /// Catalog selector. Sources without an opinion leave it unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_label: Option<String>,
}

impl MetricSnapshot {
    /// Label to evaluate with: the snapshot's own, else `requested`.
    #[must_use]
    pub fn effective_label<'a>(&'a self, requested: &'a str) -> &'a str {
        self.context_label.as_deref().unwrap_or(requested)
    }

    /// Label for an operator request: an explicit label wins over the
    /// snapshot's own, which wins over `default`.
    #[must_use]
    pub fn label_for<'a>(&'a self, explicit: Option<&'a str>, default: &'a str) -> &'a str {
        explicit.unwrap_or_else(|| self.effective_label(default))
    }

    /// The snapshot's own label when it differs from `explicit`.
    #[must_use]
    pub fn overridden_label(&self, explicit: Option<&str>) -> Option<&str> {
        match (self.context_label.as_deref(), explicit) {
            (Some(own), Some(explicit)) if own != explicit => Some(own),
            _ => None,
        }
    }
}

/// Supplier of the latest per-zone readings.
pub trait MetricSource {
    /// Fetch the latest snapshot. `scenario` is a hint some sources use to pick
    /// a fixture; live sources may ignore it.
    fn latest(&self, scenario: &str) -> Result<MetricSnapshot>;
}

pub use demo::DemoSource;
pub use file::FileSource;
