//! Configuration system: TOML file + env var overrides + smart defaults.
//!
//! Status and expansion cut points are deliberately absent: they are part of
//! the operating standard, not deployment knobs.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{BioError, Result};
use crate::engine::catalog::DEFAULT_SCENARIO;
use crate::engine::evidence::ReferenceBands;
use crate::engine::payload::DocMeta;

/// Full configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    /// Document metadata defaults passed through to every payload.
    pub meta: DocMeta,
    /// Reference bands used for evidence lines.
    pub evidence: ReferenceBands,
    pub source: SourceConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
    pub paths: PathsConfig,
}

/// Metric source defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SourceConfig {
    /// Context label used when the caller names none.
    pub default_scenario: String,
}

/// Payload cache freshness.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    pub freshness_secs: u64,
}

/// JSONL activity log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub jsonl_path: PathBuf,
    pub fallback_path: Option<PathBuf>,
    pub max_size_bytes: u64,
    pub max_rotated_files: u32,
}

/// Filesystem paths.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    pub config_file: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            default_scenario: DEFAULT_SCENARIO.to_string(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { freshness_secs: 60 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            jsonl_path: data_dir().join("activity.jsonl"),
            fallback_path: Some(env::temp_dir().join("biomodule-activity.jsonl")),
            max_size_bytes: 16 * 1024 * 1024,
            max_rotated_files: 3,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            config_file: home_dir()
                .join(".config")
                .join("biomodule")
                .join("config.toml"),
        }
    }
}

fn home_dir() -> PathBuf {
    env::var_os("HOME").map_or_else(
        || {
            eprintln!("[BIO-CONFIG] WARNING: HOME not set, falling back to /tmp for data paths");
            PathBuf::from("/tmp")
        },
        PathBuf::from,
    )
}

fn data_dir() -> PathBuf {
    home_dir().join(".local").join("share").join("biomodule")
}

impl Config {
    /// Default configuration path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        PathsConfig::default().config_file
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// Missing config file is not an error when loading from default path; defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path_buf = path.map_or_else(Self::default_path, Path::to_path_buf);
        let is_explicit_path = path.is_some();

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf).map_err(|source| BioError::Io {
                path: path_buf.clone(),
                source,
            })?;
            let parsed: Self = toml::from_str(&raw)?;
            parsed
        } else if is_explicit_path {
            return Err(BioError::MissingConfig { path: path_buf });
        } else {
            Self::default()
        };

        cfg.paths.config_file = path_buf;
        cfg.apply_env_overrides()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Deterministic FNV-1a hash of the effective config for logging.
    pub fn stable_hash(&self) -> Result<String> {
        let canonical = serde_json::to_string(self)?;
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in canonical.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        Ok(format!("{hash:016x}"))
    }

    /// Render the effective config as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|error| BioError::Serialization {
            context: "toml",
            details: error.to_string(),
        })
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_env_overrides_from(env_var)
    }

    fn apply_env_overrides_from<F>(&mut self, mut lookup: F) -> Result<()>
    where
        F: FnMut(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("BIO_FACILITY_NAME") {
            self.meta.facility_name = raw;
        }
        if let Some(raw) = lookup("BIO_SECURITY_LEVEL") {
            self.meta.security_level = raw;
        }
        if let Some(raw) = lookup("BIO_DEFAULT_SCENARIO") {
            self.source.default_scenario = raw;
        }
        if let Some(raw) = lookup("BIO_CACHE_FRESHNESS_SECS") {
            self.cache.freshness_secs = parse_env("BIO_CACHE_FRESHNESS_SECS", &raw)?;
        }
        if let Some(raw) = lookup("BIO_LOG_ENABLED") {
            self.logging.enabled = parse_env("BIO_LOG_ENABLED", &raw)?;
        }
        if let Some(raw) = lookup("BIO_LOG_PATH") {
            self.logging.jsonl_path = PathBuf::from(raw);
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        self.evidence.validate()?;

        if self.source.default_scenario.trim().is_empty() {
            return Err(BioError::InvalidConfig {
                details: "source.default_scenario must not be empty".to_string(),
            });
        }

        if self.cache.freshness_secs == 0 {
            return Err(BioError::InvalidConfig {
                details: "cache.freshness_secs must be > 0".to_string(),
            });
        }

        if self.logging.max_size_bytes == 0 || self.logging.max_rotated_files == 0 {
            return Err(BioError::InvalidConfig {
                details: "logging.max_size_bytes and logging.max_rotated_files must be > 0"
                    .to_string(),
            });
        }

        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|raw| !raw.trim().is_empty())
}

fn parse_env<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|error| BioError::ConfigParse {
        context: "env",
        details: format!("{name}={raw:?}: {error}"),
    })
}
