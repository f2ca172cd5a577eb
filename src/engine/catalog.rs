//! Scenario catalog: fixed cause weights and response actions per context label.
//!
//! Causes and actions are looked up, not inferred from the metrics. The weights
//! are hand-tuned relative-contribution estimates; they are independent of each
//! other and do not form a partition, so they need not sum to 1. This table
//! stands in for a causal model that does not exist yet.
//!
//! A label missing from the catalog is not an error: the default
//! "normal variation" entry is used and the [`Derivation`] is flagged as a
//! fallback.

#![allow(missing_docs)]

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::locale::Locale;

/// At most this many causes are surfaced per evaluation.
pub const MAX_CAUSES: usize = 3;

/// Key of the entry used for unknown labels.
pub const DEFAULT_SCENARIO: &str = "normal variation";

/// Response urgency. Ordered so that `P1 < P2 < P3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    P1,
    P2,
    P3,
}

impl Priority {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
        }
    }

    /// What the priority obliges the operator to do.
    #[must_use]
    pub const fn meaning(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::P1, Locale::En) => "act immediately",
            (Self::P2, Locale::En) => "inspect within the operational day",
            (Self::P3, Locale::En) => "requires a plan",
            (Self::P1, Locale::Ko) => "지금 바로 조치",
            (Self::P2, Locale::Ko) => "오늘 안에 점검",
            (Self::P3, Locale::Ko) => "계획 수립 필요",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.code())
    }
}

/// Attributed cause with an independent relative weight in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CauseWeight {
    pub label: String,
    pub weight: f64,
}

/// Recommended response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub priority: Priority,
    pub description: String,
    pub timeframe: String,
}

/// Static catalog row.
#[derive(Debug)]
pub struct CatalogEntry {
    pub key: &'static str,
    /// Alternate labels accepted for this entry (field-console names).
    pub aliases: &'static [&'static str],
    pub causes: &'static [(&'static str, f64)],
    pub actions: &'static [(Priority, &'static str, &'static str)],
}

impl CatalogEntry {
    fn matches(&self, normalized: &str) -> bool {
        self.key == normalized || self.aliases.contains(&normalized)
    }
}

pub static CATALOG: [CatalogEntry; 4] = [
    CatalogEntry {
        key: "oxygen drop",
        aliases: &["산소량 급락"],
        causes: &[
            ("oxygen drop", 0.52),
            ("fluctuation increase", 0.31),
            ("equipment utilization rise", 0.17),
        ],
        actions: &[
            (Priority::P1, "raise oxygen supply stage", "now"),
            (Priority::P2, "inspect oxygen line", "today"),
            (Priority::P3, "review spare capacity", "plan"),
        ],
    },
    CatalogEntry {
        key: "flow degradation",
        aliases: &["물 흐름 저하"],
        causes: &[
            ("flow degradation", 0.46),
            ("equipment utilization rise", 0.29),
            ("oxygen variation", 0.25),
        ],
        actions: &[
            (Priority::P1, "inspect pumps and valves, restore flow", "now"),
            (Priority::P2, "inspect piping and filters", "today"),
            (Priority::P3, "plan standby pump and line", "plan"),
        ],
    },
    CatalogEntry {
        key: "filtration load",
        aliases: &["여과 부담 증가"],
        causes: &[
            ("filtration load increase", 0.44),
            ("pH decline", 0.33),
            ("equipment utilization rise", 0.23),
        ],
        actions: &[
            (Priority::P1, "strengthen filtration stage, check backwash", "now"),
            (Priority::P2, "check pH stabilization", "today"),
            (Priority::P3, "review filtration capacity expansion", "plan"),
        ],
    },
    CatalogEntry {
        key: DEFAULT_SCENARIO,
        aliases: &["일반", "normal"],
        causes: &[
            ("normal variation", 0.41),
            ("operating conditions", 0.33),
            ("equipment utilization", 0.26),
        ],
        actions: &[
            (Priority::P2, "perform daily inspection", "today"),
            (Priority::P3, "organize operating records", "plan"),
        ],
    },
];

/// Field-console wording for catalog text, keyed by the English text.
static KO_TEXT: [(&str, &str); 26] = [
    ("oxygen drop", "산소량 급락"),
    ("fluctuation increase", "출렁임 증가"),
    ("equipment utilization rise", "설비 사용률 상승"),
    ("flow degradation", "물 흐름 저하"),
    ("oxygen variation", "산소량 변동"),
    ("filtration load", "여과 부담 증가"),
    ("filtration load increase", "여과 부담 증가"),
    ("pH decline", "pH 하락"),
    ("normal variation", "정상 변동"),
    ("operating conditions", "운영 조건"),
    ("equipment utilization", "설비 사용률"),
    ("raise oxygen supply stage", "산소 공급 단계 상향"),
    ("inspect oxygen line", "산소 라인 점검"),
    ("review spare capacity", "여유 용량 검토"),
    ("inspect pumps and valves, restore flow", "펌프/밸브 점검 및 유량 복구"),
    ("inspect piping and filters", "배관/필터 점검"),
    ("plan standby pump and line", "예비 펌프/라인 계획"),
    ("strengthen filtration stage, check backwash", "여과 단계 강화/역세척 점검"),
    ("check pH stabilization", "pH 안정화 점검"),
    ("review filtration capacity expansion", "여과 용량 증설 검토"),
    ("perform daily inspection", "일일 점검 수행"),
    ("organize operating records", "운영 기록 정리"),
    ("check operating conditions", "운영 조건 점검"),
    ("now", "즉시"),
    ("today", "오늘"),
    ("plan", "계획"),
];

/// Catalog text (scenario, cause, action or timeframe) in `locale`.
///
/// Payload fields always carry the English text; this is for display only.
/// Text the catalog does not know is returned unchanged.
#[must_use]
pub fn localize(text: &str, locale: Locale) -> &str {
    match locale {
        Locale::En => text,
        Locale::Ko => KO_TEXT
            .iter()
            .find(|(en, _)| *en == text)
            .map_or(text, |&(_, ko)| ko),
    }
}

/// Front action used if an entry carries no actions at all.
#[must_use]
pub fn fallback_front_action() -> Action {
    Action {
        priority: Priority::P2,
        description: "check operating conditions".to_string(),
        timeframe: "today".to_string(),
    }
}

/// Find the entry for a context label (trimmed, case-insensitive).
#[must_use]
pub fn lookup(context_label: &str) -> Option<&'static CatalogEntry> {
    let normalized = context_label.trim().to_lowercase();
    CATALOG.iter().find(|entry| entry.matches(&normalized))
}

/// The "normal variation" entry.
#[must_use]
pub fn default_entry() -> &'static CatalogEntry {
    CATALOG
        .iter()
        .find(|entry| entry.key == DEFAULT_SCENARIO)
        .unwrap_or(&CATALOG[CATALOG.len() - 1])
}

/// Causes and actions selected for one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Derivation {
    /// Catalog key actually used.
    pub scenario: &'static str,
    /// True when the label was not in the catalog.
    pub fallback: bool,
    /// Up to [`MAX_CAUSES`] causes in catalog order.
    pub causes: Vec<CauseWeight>,
    /// Actions sorted by priority, P1 first.
    pub actions: Vec<Action>,
}

/// Select the catalog entry for `context_label`, falling back to the default.
#[must_use]
pub fn derive_causes_and_actions(context_label: &str) -> Derivation {
    let (entry, fallback) = match lookup(context_label) {
        Some(entry) => (entry, false),
        None => (default_entry(), true),
    };

    let causes = entry
        .causes
        .iter()
        .take(MAX_CAUSES)
        .map(|&(label, weight)| CauseWeight {
            label: label.to_string(),
            weight,
        })
        .collect();

    let mut actions: Vec<Action> = entry
        .actions
        .iter()
        .map(|&(priority, description, timeframe)| Action {
            priority,
            description: description.to_string(),
            timeframe: timeframe.to_string(),
        })
        .collect();
    actions.sort_by_key(|action| action.priority);

    Derivation {
        scenario: entry.key,
        fallback,
        causes,
        actions,
    }
}
