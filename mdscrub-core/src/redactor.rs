//! Pattern redaction over document bodies.
//!
//! Passes run in a fixed order, each over the output of the previous one:
//!
//! 1. `remove_patterns`: matches are deleted.
//! 2. `replace_patterns`: matches become the entry's literal replacement.
//! 3. `pii_patterns`: `email` matches become the contact address, every other
//!    pattern's matches become [`REDACTED_TOKEN`].
//!
//! Within a group patterns run in declaration order, and each pattern is one
//! left-to-right pass over non-overlapping matches. Replacement strings are
//! literal; `$1`-style references are not expanded.

use regex::{Captures, Regex};
use std::borrow::Cow;

use crate::redaction_match::{log_redaction_action_debug, RedactionKind, RedactionSummaryItem};
use crate::sanitizers::compiler::RuleSet;

/// Placeholder written over non-email PII matches.
pub const REDACTED_TOKEN: &str = "[REDACTED]";

/// Name of the PII pattern whose matches are substituted rather than redacted.
pub const EMAIL_PATTERN: &str = "email";

/// Result of redacting one body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionOutcome {
    pub text: String,
    /// One entry per pattern pass, in application order, zero counts included.
    pub summary: Vec<RedactionSummaryItem>,
}

/// Applies every body pattern of `rules` to `body`.
///
/// `contact` is the address that replaces `email` matches. This function
/// never fails; a pattern that does not match contributes a zero count.
pub fn redact(body: &str, rules: &RuleSet, contact: &str, source_id: &str) -> RedactionOutcome {
    let mut text: Cow<'_, str> = Cow::Borrowed(body);
    let mut summary = Vec::with_capacity(rules.pattern_count());

    for pattern in rules.remove_patterns() {
        let count = apply_pass(&mut text, &pattern.regex, "", &pattern.name, source_id);
        summary.push(RedactionSummaryItem::new(&pattern.name, RedactionKind::Removed, count));
    }

    for pattern in rules.replace_patterns() {
        let count = apply_pass(&mut text, &pattern.regex, &pattern.replacement, &pattern.name, source_id);
        summary.push(RedactionSummaryItem::new(&pattern.name, RedactionKind::Replaced, count));
    }

    for pattern in rules.pii_patterns() {
        let (replacement, kind) = if pattern.name == EMAIL_PATTERN {
            (contact, RedactionKind::Substituted)
        } else {
            (REDACTED_TOKEN, RedactionKind::Redacted)
        };
        let count = apply_pass(&mut text, &pattern.regex, replacement, &pattern.name, source_id);
        summary.push(RedactionSummaryItem::new(&pattern.name, kind, count));
    }

    RedactionOutcome { text: text.into_owned(), summary }
}

/// Runs one pattern over `text` in place and returns the number of matches.
fn apply_pass(
    text: &mut Cow<'_, str>,
    regex: &Regex,
    replacement: &str,
    rule_name: &str,
    source_id: &str,
) -> usize {
    let mut count = 0usize;
    let replaced = regex.replace_all(text.as_ref(), |caps: &Captures<'_>| {
        count += 1;
        let matched = caps.get(0).map_or("", |m| m.as_str());
        log_redaction_action_debug(source_id, rule_name, matched, replacement);
        replacement
    });
    if let Cow::Owned(new_text) = replaced {
        *text = Cow::Owned(new_text);
    }
    if count > 0 {
        log::debug!("[{}] Found {} {} match(es).", source_id, count, rule_name);
    }
    count
}
