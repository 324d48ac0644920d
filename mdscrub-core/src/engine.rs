// mdscrub-core/src/engine.rs
//! Defines the core SanitizationEngine trait and related data structures.
//!
//! The `SanitizationEngine` trait decouples callers (the batch runner, the
//! headless helper) from the concrete document sanitizer. Engines are pure:
//! they never touch the filesystem and only fail for problems inherent to
//! their input.
//!
//! License: MIT OR APACHE 2.0

use crate::errors::MdscrubError;
use crate::frontmatter::{self, Frontmatter};
use crate::redaction_match::RedactionSummaryItem;
use crate::sanitizers::compiler::RuleSet;

/// Caller-supplied knobs that sit on top of the rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Replaces `substitutions.default_contact` for email substitution.
    pub contact_override: Option<String>,
}

impl EngineOptions {
    pub fn with_contact(contact: impl Into<String>) -> Self {
        Self { contact_override: Some(contact.into()) }
    }
}

/// A document split into its parts. Borrowed from the raw text; lives only for
/// the duration of one sanitization.
#[derive(Debug, Clone, PartialEq)]
pub struct Document<'a> {
    pub raw_text: &'a str,
    pub frontmatter: Option<Frontmatter>,
    pub body: &'a str,
}

impl<'a> Document<'a> {
    /// Splits `raw_text` into frontmatter and body.
    pub fn parse(raw_text: &'a str, source_id: &str) -> Result<Self, MdscrubError> {
        let (frontmatter, body) = frontmatter::split(raw_text, source_id)?;
        Ok(Self { raw_text, frontmatter, body })
    }

    /// The raw text preceding the body, i.e. the frontmatter block including
    /// both delimiter lines. Empty when there is no frontmatter.
    pub fn header(&self) -> &'a str {
        &self.raw_text[..self.raw_text.len() - self.body.len()]
    }
}

/// Output of sanitizing one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedDocument {
    pub output_text: String,
    /// False iff `output_text` is byte-identical to the input.
    pub changed: bool,
    /// Removed frontmatter fields first, then one entry per body pattern pass.
    pub summary: Vec<RedactionSummaryItem>,
}

/// A trait that defines the core functionality of a sanitization engine.
pub trait SanitizationEngine: Send + Sync {
    /// Sanitizes one document.
    ///
    /// # Arguments
    /// * `content` - The raw document text.
    /// * `source_id` - The name or identifier of the source being processed, used in logs and errors.
    fn sanitize(&self, content: &str, source_id: &str) -> Result<SanitizedDocument, MdscrubError>;

    /// Reports what `sanitize` would change without returning the text.
    fn analyze(&self, content: &str, source_id: &str) -> Result<Vec<RedactionSummaryItem>, MdscrubError> {
        self.sanitize(content, source_id).map(|doc| doc.summary)
    }

    /// Returns the rule set used by the engine.
    fn rules(&self) -> &RuleSet;

    /// Returns the engine's options.
    fn options(&self) -> &EngineOptions;
}
