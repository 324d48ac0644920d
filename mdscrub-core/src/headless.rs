// mdscrub-core/src/headless.rs
//! Convenience wrappers for using the engine in headless mode (no files, no UI).
//! Provides helper functions for a full, one-shot sanitization of strings.

use std::sync::Arc;

use crate::engine::{EngineOptions, SanitizationEngine};
use crate::engines::markdown_engine::MarkdownEngine;
use crate::errors::MdscrubError;
use crate::sanitizers::compiler::RuleSet;

/// Fully sanitizes a markdown string and returns the resulting text.
///
/// # Arguments
///
/// * `rules` - The compiled rule set.
/// * `options` - EngineOptions (contact override).
/// * `content` - The document to be sanitized.
/// * `source_id` - A stable identifier for the input (file path or pseudo id).
pub fn headless_sanitize_string(
    rules: RuleSet,
    options: EngineOptions,
    content: &str,
    source_id: &str,
) -> Result<String, MdscrubError> {
    let engine = MarkdownEngine::with_options(Arc::new(rules), options);
    Ok(engine.sanitize(content, source_id)?.output_text)
}
