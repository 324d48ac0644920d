//! Provides core data structures for reporting redaction events and helpers
//! for logging matched content without leaking it.

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// A static boolean that is initialized once to determine if PII is allowed in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("MDSCRUB_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// What happened to the text a rule matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedactionKind {
    /// A frontmatter key was dropped.
    FieldRemoved,
    /// A `remove_patterns` match was deleted.
    Removed,
    /// A `replace_patterns` match was swapped for its literal replacement.
    Replaced,
    /// An email match was swapped for the contact address.
    Substituted,
    /// A PII match was swapped for `[REDACTED]`.
    Redacted,
}

impl RedactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedactionKind::FieldRemoved => "field removed",
            RedactionKind::Removed => "removed",
            RedactionKind::Replaced => "replaced",
            RedactionKind::Substituted => "substituted",
            RedactionKind::Redacted => "redacted",
        }
    }
}

/// Match count for one rule (or one removed frontmatter field) in one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionSummaryItem {
    pub rule_name: String,
    pub kind: RedactionKind,
    pub occurrences: usize,
}

impl RedactionSummaryItem {
    pub fn new(rule_name: impl Into<String>, kind: RedactionKind, occurrences: usize) -> Self {
        Self { rule_name: rule_name.into(), kind, occurrences }
    }
}

/// Sums occurrences across summary items.
pub fn total_occurrences(items: &[RedactionSummaryItem]) -> usize {
    items.iter().map(|i| i.occurrences).sum()
}

/// Keeps only the items that actually matched something.
pub fn non_zero(items: &[RedactionSummaryItem]) -> impl Iterator<Item = &RedactionSummaryItem> {
    items.iter().filter(|i| i.occurrences > 0)
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_redaction_action_debug(
    source_id: &str,
    rule_name: &str,
    original_sensitive_content: &str,
    replacement: &str,
) {
    debug!(
        "[{}] Rule '{}': Original='{}', Replacement='{}'",
        source_id,
        rule_name,
        get_loggable_content(original_sensitive_content),
        replacement
    );
}
