//! Configuration management for `mdscrub-core`.
//!
//! This module defines the on-disk shape of a rules file and handles
//! deserialization of YAML rule sets, including the embedded defaults. A
//! [`RulesConfig`] is the raw, validated-but-uncompiled form; see
//! [`crate::sanitizers::compiler::RuleSet`] for the compiled, immutable form the
//! engine consumes.
//!
//! Named pattern groups are YAML mappings whose declaration order is
//! significant, so they are deserialized into ordered `(name, value)` lists
//! rather than hash maps.
//!
//! License: MIT OR Apache-2.0

use log::{debug, info, warn};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use crate::errors::MdscrubError;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Substitution key holding the generic contact used for email replacement.
pub const DEFAULT_CONTACT_KEY: &str = "default_contact";

/// Contact used when a rule set carries no `default_contact` substitution.
pub const FALLBACK_CONTACT: &str = "contact@example.com";

/// An ordered list of named entries, in the order they appear in the rules file.
pub type NamedEntries<T> = Vec<(String, T)>;

/// A `replace_patterns` entry. Both fields are required; they are optional
/// here only so that a missing field can be reported as a configuration error
/// naming the offending entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReplacePatternConfig {
    pub pattern: Option<String>,
    pub replacement: Option<String>,
}

/// Top-level structure of a rules file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// PII patterns applied last; `email` matches are substituted with the
    /// contact address, everything else becomes `[REDACTED]`.
    #[serde(deserialize_with = "ordered_entries")]
    pub pii_patterns: NamedEntries<String>,
    /// Frontmatter keys stripped from every document.
    #[serde(deserialize_with = "nullable_list")]
    pub frontmatter_remove: Vec<String>,
    #[serde(deserialize_with = "ordered_entries")]
    pub substitutions: NamedEntries<String>,
    /// Additional frontmatter keys injected by mkdocs-material plugins.
    #[serde(deserialize_with = "nullable_list")]
    pub mkdocs_material_fields: Vec<String>,
    /// Patterns whose matches are deleted outright.
    #[serde(deserialize_with = "ordered_entries")]
    pub remove_patterns: NamedEntries<String>,
    /// Patterns whose matches are replaced by a literal string.
    #[serde(deserialize_with = "ordered_entries")]
    pub replace_patterns: NamedEntries<ReplacePatternConfig>,
    /// Anything else found at the top level. Kept only to warn about it.
    #[serde(flatten)]
    pub unknown: BTreeMap<String, serde_yml::Value>,
}

impl RulesConfig {
    /// Loads rules from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, MdscrubError> {
        let path = path.as_ref();
        info!("Loading rules from: {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|e| {
            MdscrubError::Config(format!("Failed to read rules file {}: {}", path.display(), e))
        })?;
        let config = Self::from_yaml_str(&text).map_err(|e| match e {
            MdscrubError::Config(msg) => MdscrubError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;
        info!(
            "Loaded {} PII, {} remove and {} replace patterns from {}.",
            config.pii_patterns.len(),
            config.remove_patterns.len(),
            config.replace_patterns.len(),
            path.display()
        );
        Ok(config)
    }

    /// Loads the default rules from the embedded configuration.
    pub fn load_default_rules() -> Result<Self, MdscrubError> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let config = Self::from_yaml_str(default_yaml)?;
        debug!("Loaded {} default PII patterns.", config.pii_patterns.len());
        Ok(config)
    }

    /// Parses and validates a rules document. An empty document yields an
    /// empty rule set.
    pub fn from_yaml_str(text: &str) -> Result<Self, MdscrubError> {
        let value: serde_yml::Value = serde_yml::from_str(text)
            .map_err(|e| MdscrubError::Config(format!("Failed to parse rules: {}", e)))?;
        if value.is_null() {
            warn!("Rules document is empty; no patterns or fields are active.");
            return Ok(Self::default());
        }
        let config: RulesConfig = serde_yml::from_value(value)
            .map_err(|e| MdscrubError::Config(format!("Failed to parse rules: {}", e)))?;

        for key in config.unknown.keys() {
            warn!("Ignoring unknown top-level key '{}' in rules.", key);
        }

        config.validate()?;
        Ok(config)
    }

    /// Looks up a substitution value by key.
    pub fn substitution(&self, key: &str) -> Option<&str> {
        self.substitutions
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Checks rule integrity short of regex compilation: names, duplicates,
    /// empty patterns and incomplete replace entries. All problems are
    /// reported together.
    pub fn validate(&self) -> Result<(), MdscrubError> {
        let mut errors = Vec::new();

        check_group("pii_patterns", self.pii_patterns.iter().map(|(n, p)| (n, Some(p))), &mut errors);
        check_group("remove_patterns", self.remove_patterns.iter().map(|(n, p)| (n, Some(p))), &mut errors);
        check_group(
            "replace_patterns",
            self.replace_patterns.iter().map(|(n, r)| (n, r.pattern.as_ref())),
            &mut errors,
        );

        for (name, entry) in &self.replace_patterns {
            if entry.replacement.is_none() {
                errors.push(format!("replace_patterns '{}' is missing the `replacement` field.", name));
            }
        }

        for field in self.frontmatter_remove.iter().chain(&self.mkdocs_material_fields) {
            if field.is_empty() {
                errors.push("A frontmatter field name is empty.".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(MdscrubError::Config(format!("Rule validation failed:\n{}", errors.join("\n"))))
        }
    }
}

fn check_group<'a>(
    group: &str,
    entries: impl Iterator<Item = (&'a String, Option<&'a String>)>,
    errors: &mut Vec<String>,
) {
    let mut names = HashSet::new();
    for (name, pattern) in entries {
        if name.is_empty() {
            errors.push(format!("{} contains an entry with an empty name.", group));
        } else if !names.insert(name.as_str()) {
            errors.push(format!("Duplicate {} name found: '{}'.", group, name));
        }
        match pattern {
            None => errors.push(format!("{} '{}' is missing the `pattern` field.", group, name)),
            Some(p) if p.is_empty() => {
                errors.push(format!("{} '{}' has an empty pattern.", group, name))
            }
            Some(_) => {}
        }
    }
}

/// Deserializes a YAML mapping into `(key, value)` pairs, keeping document
/// order. A null value is treated as an empty mapping.
fn ordered_entries<'de, D, T>(deserializer: D) -> Result<NamedEntries<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    struct OrderedVisitor<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de>> Visitor<'de> for OrderedVisitor<T> {
        type Value = NamedEntries<T>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a mapping of names to values")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, T>()? {
                entries.push((key, value));
            }
            Ok(entries)
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(OrderedVisitor(PhantomData))
}

fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
