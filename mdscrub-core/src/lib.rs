// mdscrub-core/src/lib.rs
//! # mdscrub Core Library
//!
//! `mdscrub-core` sanitizes markdown documents for external publication. It
//! strips denylisted keys from YAML frontmatter and rewrites the body with a
//! fixed, ordered set of regular-expression passes: deletions, literal
//! replacements, email substitution and PII redaction.
//!
//! The library does no file discovery or writing; see the `mdscrub` crate for
//! the batch runner.
//!
//! ## Modules
//!
//! * `config`: The rules file format and its loading/validation.
//! * `sanitizers`: Compiles a `RulesConfig` into an immutable `RuleSet`.
//! * `frontmatter`: Splits, sanitizes and re-renders YAML frontmatter.
//! * `redactor`: Applies the ordered body pattern passes.
//! * `engine`: The `SanitizationEngine` trait and document types.
//! * `engines`: Concrete engines (`MarkdownEngine`).
//! * `headless`: One-shot string sanitization.
//! * `redaction_match`: Per-rule match counts used for reporting.
//! * `errors`: The `MdscrubError` enum.
//!
//! ## Usage Example
//!
//! ```rust
//! use mdscrub_core::{headless_sanitize_string, EngineOptions, RuleSet};
//!
//! fn main() -> Result<(), mdscrub_core::MdscrubError> {
//!     let rules = RuleSet::defaults()?;
//!     let input = "---\ntitle: Guide\nauthor: Jane Doe\n---\nMail jane@corp.com or call 555-123-4567.";
//!
//!     let output = headless_sanitize_string(rules, EngineOptions::default(), input, "guide.md")?;
//!     assert_eq!(output, "---\ntitle: Guide\n---\nMail contact@example.com or call [REDACTED].");
//!     Ok(())
//! }
//! ```
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod frontmatter;
pub mod headless;
pub mod redaction_match;
pub mod redactor;
pub mod sanitizers;

/// Re-exports the rules file types.
pub use config::{ReplacePatternConfig, RulesConfig, DEFAULT_CONTACT_KEY, MAX_PATTERN_LENGTH};

/// Re-exports the custom error type for clear error reporting.
pub use errors::MdscrubError;

/// Re-exports the engine trait and its data types.
pub use engine::{Document, EngineOptions, SanitizationEngine, SanitizedDocument};

pub use engines::markdown_engine::MarkdownEngine;

pub use redaction_match::{RedactionKind, RedactionSummaryItem};

pub use redactor::{RedactionOutcome, EMAIL_PATTERN, REDACTED_TOKEN};

pub use headless::headless_sanitize_string;

pub use sanitizers::compiler::{CompiledPattern, CompiledReplacement, RuleSet};
