//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use biomodule_risk::prelude::*;
//! ```

// Core
pub use crate::core::config::Config;
pub use crate::core::errors::{BioError, Result};

// Engine
pub use crate::engine::catalog::{Action, CauseWeight, Derivation, Priority};
pub use crate::engine::evidence::{ReferenceBand, ReferenceBands};
pub use crate::engine::expansion::ExpansionStage;
pub use crate::engine::locale::Locale;
pub use crate::engine::metrics::{ZoneId, ZoneMetrics};
pub use crate::engine::payload::{DocMeta, ReportPayload, RiskEngine, assemble};
pub use crate::engine::status::Status;

// Sources
pub use crate::source::{DemoSource, FileSource, MetricSnapshot, MetricSource};

// Cache
pub use crate::cache::PayloadCache;
