//! Rule compilation for mdscrub.
//!
//! Turns a validated `RulesConfig` into the compiled, immutable `RuleSet` that
//! every sanitization call borrows. Regexes are compiled here once and never
//! recompiled per document.

pub mod compiler;
