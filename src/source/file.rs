//! Snapshot file source: JSON or TOML, chosen by extension.

#![allow(missing_docs)]

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::errors::{BioError, Result};
use crate::source::{MetricSnapshot, MetricSource};

/// Reads a [`MetricSnapshot`] from disk on every call.
///
/// `.toml` files are parsed as TOML; anything else as JSON. Unknown or missing
/// fields are rejected as [`BioError::MalformedSnapshot`].
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_toml(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
    }
}

impl MetricSource for FileSource {
    fn latest(&self, _scenario: &str) -> Result<MetricSnapshot> {
        let raw =
            fs::read_to_string(&self.path).map_err(|source| BioError::io(&self.path, source))?;
        let malformed = |details: String| BioError::MalformedSnapshot {
            origin: self.path.display().to_string(),
            details,
        };
        if self.is_toml() {
            toml::from_str(&raw).map_err(|error| malformed(error.to_string()))
        } else {
            serde_json::from_str(&raw).map_err(|error| malformed(error.to_string()))
        }
    }
}
