//! compiler.rs - Compiles a validated `RulesConfig` into an immutable `RuleSet`.
//!
//! Every regular expression is compiled exactly once, here. A rule set with a
//! single bad pattern never becomes partially active: all compilation errors
//! are collected and reported together as a configuration error.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;
use std::path::Path;

use crate::config::{RulesConfig, DEFAULT_CONTACT_KEY, FALLBACK_CONTACT, MAX_PATTERN_LENGTH};
use crate::errors::MdscrubError;

/// Size limit for a single compiled regex.
const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// A named, compiled pattern.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub name: String,
    pub regex: Regex,
}

/// A named, compiled pattern paired with its literal replacement.
#[derive(Debug, Clone)]
pub struct CompiledReplacement {
    pub name: String,
    pub regex: Regex,
    pub replacement: String,
}

/// The loaded, validated and compiled rule set.
///
/// Construct one per run and pass it by reference (or behind an `Arc`) to
/// every sanitization call. It cannot be mutated after construction.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pii_patterns: Vec<CompiledPattern>,
    remove_patterns: Vec<CompiledPattern>,
    replace_patterns: Vec<CompiledReplacement>,
    removal_fields: HashSet<String>,
    substitutions: Vec<(String, String)>,
}

impl RuleSet {
    /// Validates and compiles a rules configuration.
    pub fn compile(config: RulesConfig) -> Result<Self, MdscrubError> {
        config.validate()?;
        debug!(
            "Compiling {} PII, {} remove and {} replace patterns.",
            config.pii_patterns.len(),
            config.remove_patterns.len(),
            config.replace_patterns.len()
        );

        let mut errors: Vec<MdscrubError> = Vec::new();

        let pii_patterns = compile_group("pii_patterns", config.pii_patterns, &mut errors);
        let remove_patterns = compile_group("remove_patterns", config.remove_patterns, &mut errors);

        let mut replace_patterns = Vec::with_capacity(config.replace_patterns.len());
        for (name, entry) in config.replace_patterns {
            // validate() guarantees both fields are present.
            let (Some(pattern), Some(replacement)) = (entry.pattern, entry.replacement) else {
                continue;
            };
            match compile_pattern(&format!("replace_patterns.{}", name), &pattern) {
                Ok(regex) => replace_patterns.push(CompiledReplacement { name, regex, replacement }),
                Err(e) => errors.push(e),
            }
        }

        if !errors.is_empty() {
            let error_message = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<String>>()
                .join("\n");
            return Err(MdscrubError::Config(format!(
                "Failed to compile {} pattern(s):\n{}",
                errors.len(),
                error_message
            )));
        }

        let removal_fields: HashSet<String> = config
            .frontmatter_remove
            .iter()
            .chain(&config.mkdocs_material_fields)
            .cloned()
            .collect();

        debug!(
            "Rule set ready: {} patterns, {} frontmatter fields.",
            pii_patterns.len() + remove_patterns.len() + replace_patterns.len(),
            removal_fields.len()
        );

        Ok(Self {
            pii_patterns,
            remove_patterns,
            replace_patterns,
            removal_fields,
            substitutions: config.substitutions,
        })
    }

    /// Loads and compiles the rule set from `path`, or the embedded defaults
    /// when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, MdscrubError> {
        let config = match path {
            Some(p) => RulesConfig::load_from_file(p)?,
            None => RulesConfig::load_default_rules()?,
        };
        Self::compile(config)
    }

    /// The compiled-in default rule set.
    pub fn defaults() -> Result<Self, MdscrubError> {
        Self::load(None)
    }

    pub fn pii_patterns(&self) -> &[CompiledPattern] {
        &self.pii_patterns
    }

    pub fn remove_patterns(&self) -> &[CompiledPattern] {
        &self.remove_patterns
    }

    pub fn replace_patterns(&self) -> &[CompiledReplacement] {
        &self.replace_patterns
    }

    /// `frontmatter_remove` ∪ `mkdocs_material_fields`.
    pub fn removal_fields(&self) -> &HashSet<String> {
        &self.removal_fields
    }

    pub fn substitution(&self, key: &str) -> Option<&str> {
        self.substitutions
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// The contact address used for email substitution.
    pub fn default_contact(&self) -> &str {
        self.substitution(DEFAULT_CONTACT_KEY).unwrap_or(FALLBACK_CONTACT)
    }

    /// Total number of compiled patterns across all groups.
    pub fn pattern_count(&self) -> usize {
        self.pii_patterns.len() + self.remove_patterns.len() + self.replace_patterns.len()
    }
}

fn compile_group(
    group: &str,
    entries: Vec<(String, String)>,
    errors: &mut Vec<MdscrubError>,
) -> Vec<CompiledPattern> {
    let mut compiled = Vec::with_capacity(entries.len());
    for (name, pattern) in entries {
        match compile_pattern(&format!("{}.{}", group, name), &pattern) {
            Ok(regex) => compiled.push(CompiledPattern { name, regex }),
            Err(e) => errors.push(e),
        }
    }
    compiled
}

fn compile_pattern(qualified_name: &str, pattern: &str) -> Result<Regex, MdscrubError> {
    debug!("Compiling pattern '{}': {:?}", qualified_name, pattern);
    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(MdscrubError::PatternLengthExceeded(
            qualified_name.to_string(),
            pattern.len(),
            MAX_PATTERN_LENGTH,
        ));
    }
    RegexBuilder::new(pattern)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map_err(|e| MdscrubError::RuleCompilation(qualified_name.to_string(), e))
}
