// mdscrub-core/src/engines/markdown_engine.rs
//! A `SanitizationEngine` for markdown documents with optional YAML
//! frontmatter.
//!
//! The frontmatter and the body are sanitized independently and reassembled.
//! When nothing was removed or rewritten the input is returned verbatim, so
//! running the engine over its own output is a no-op. When only the body
//! changed, the original frontmatter text is kept as written; the block is
//! re-serialized only if fields were dropped from it.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use std::sync::Arc;

use crate::engine::{Document, EngineOptions, SanitizationEngine, SanitizedDocument};
use crate::errors::MdscrubError;
use crate::frontmatter;
use crate::redaction_match::{RedactionKind, RedactionSummaryItem};
use crate::redactor;
use crate::sanitizers::compiler::RuleSet;

#[derive(Debug, Clone)]
pub struct MarkdownEngine {
    rules: Arc<RuleSet>,
    options: EngineOptions,
}

impl MarkdownEngine {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self::with_options(rules, EngineOptions::default())
    }

    pub fn with_options(rules: Arc<RuleSet>, options: EngineOptions) -> Self {
        Self { rules, options }
    }

    /// The address email matches are replaced with.
    pub fn contact(&self) -> &str {
        self.options
            .contact_override
            .as_deref()
            .unwrap_or_else(|| self.rules.default_contact())
    }
}

impl SanitizationEngine for MarkdownEngine {
    fn sanitize(&self, content: &str, source_id: &str) -> Result<SanitizedDocument, MdscrubError> {
        let document = Document::parse(content, source_id)?;
        let mut summary = Vec::new();

        let cleaned_frontmatter = document.frontmatter.as_ref().map(|fm| {
            let (kept, removed) = frontmatter::sanitize(fm, self.rules.removal_fields());
            for field in &removed {
                debug!("[{}] Removing frontmatter field: {}", source_id, field);
                summary.push(RedactionSummaryItem::new(field.as_str(), RedactionKind::FieldRemoved, 1));
            }
            (kept, !removed.is_empty())
        });
        let fields_removed = cleaned_frontmatter.as_ref().is_some_and(|(_, removed)| *removed);

        let redacted = redactor::redact(document.body, &self.rules, self.contact(), source_id);
        summary.extend(redacted.summary);
        let body_changed = redacted.text != document.body;

        let output_text = match cleaned_frontmatter {
            _ if !fields_removed && !body_changed => content.to_string(),
            Some((kept, true)) => frontmatter::render(&kept, &redacted.text)?,
            _ => format!("{}{}", document.header(), redacted.text),
        };
        let changed = output_text != content;

        debug!(
            "[{}] Sanitized: changed={}, {} -> {} bytes.",
            source_id,
            changed,
            content.len(),
            output_text.len()
        );

        Ok(SanitizedDocument { output_text, changed, summary })
    }

    fn rules(&self) -> &RuleSet {
        &self.rules
    }

    fn options(&self) -> &EngineOptions {
        &self.options
    }
}
