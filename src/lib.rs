#![forbid(unsafe_code)]

//! BioModule Risk: risk aggregation engine for two-zone aquaculture telemetry.
//!
//! Reduces the latest per-zone readings to a single operator report:
//! 1. **Worst-of-two**: the higher-risk zone drives status and evidence
//! 2. **Catalog derivation**: causes and prioritized actions keyed by context label
//! 3. **Expansion stage**: a capacity-planning signal on its own ladder
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use biomodule_risk::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use biomodule_risk::engine::metrics::ZoneMetrics;
//! use biomodule_risk::engine::payload::{DocMeta, assemble};
//!
//! let zone_a = ZoneMetrics::new(82.0, 9, 0.48, 0.92);
//! let zone_b = ZoneMetrics::new(34.0, 0, 0.05, 0.38);
//! let payload = assemble(&zone_a, &zone_b, "oxygen drop", &DocMeta::default())?;
//! assert_eq!(payload.front_action.description, "raise oxygen supply stage");
//! # Ok::<(), biomodule_risk::core::errors::BioError>(())
//! ```

pub mod prelude;

pub mod cache;
pub mod core;
pub mod engine;
pub mod logger;
pub mod source;
