//! BIO-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, BioError>;

/// Top-level error type for the risk engine and its collaborators.
#[derive(Debug, Error)]
pub enum BioError {
    #[error("[BIO-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[BIO-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[BIO-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[BIO-2001] invalid metric zone {zone} field {field}: {value} (expected {expected})")]
    InvalidMetric {
        zone: String,
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("[BIO-2002] malformed metric snapshot from {origin}: {details}")]
    MalformedSnapshot { origin: String, details: String },

    #[error("[BIO-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[BIO-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BioError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "BIO-1001",
            Self::MissingConfig { .. } => "BIO-1002",
            Self::ConfigParse { .. } => "BIO-1003",
            Self::InvalidMetric { .. } => "BIO-2001",
            Self::MalformedSnapshot { .. } => "BIO-2002",
            Self::Serialization { .. } => "BIO-2101",
            Self::Io { .. } => "BIO-3002",
        }
    }

    /// Whether re-fetching the inputs might resolve the failure.
    ///
    /// The engine itself is idempotent; only source-side I/O is worth retrying.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for BioError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for BioError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}
