//! Display locale for operator-facing labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Language used for operator-facing display.
///
/// Field screens use Korean; exported reports default to English. Only display
/// is localized: payload fields keep the English catalog text, and Korean
/// wording for causes, actions and evidence comes from
/// [`catalog::localize`](crate::engine::catalog::localize) and
/// [`evidence::format_evidence_in`](crate::engine::evidence::format_evidence_in).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Korean.
    Ko,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::En => f.write_str("en"),
            Self::Ko => f.write_str("ko"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::En),
            "ko" | "kr" | "korean" => Ok(Self::Ko),
            other => Err(format!("unknown locale {other:?}; expected en or ko")),
        }
    }
}
