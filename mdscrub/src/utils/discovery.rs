// mdscrub/src/utils/discovery.rs
//! Finds the files a batch run should process.
//!
//! The glob is matched against each file's name (`*.md`, `*.mdx`, ...), or
//! against its path relative to the input root when the glob itself contains
//! a `/`. Results are sorted so runs are deterministic.

use anyhow::{bail, Context, Result};
use glob::Pattern;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What to look for under an input root.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    pub pattern: String,
    pub recursive: bool,
    /// A directory to skip entirely, typically an output directory nested
    /// inside the input root.
    pub exclude: Option<PathBuf>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self { pattern: "*.md".to_string(), recursive: true, exclude: None }
    }
}

/// Lists regular files under `root` whose name matches `options.pattern`.
///
/// Fails if `root` does not exist, is not a directory, or the pattern is not
/// a valid glob. Unreadable entries below the root are logged and skipped.
pub fn discover_files(root: &Path, options: &DiscoveryOptions) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        bail!("Input directory {} does not exist", root.display());
    }
    if !root.is_dir() {
        bail!("{} is not a directory", root.display());
    }
    let pattern = Pattern::new(&options.pattern)
        .with_context(|| format!("Invalid file pattern '{}'", options.pattern))?;
    let match_full_path = options.pattern.contains('/');
    let excluded = options.exclude.as_ref().map(|p| fs::canonicalize(p).unwrap_or_else(|_| p.clone()));

    let mut walker = WalkDir::new(root).follow_links(false);
    if !options.recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    let entries = walker.into_iter().filter_entry(|entry| {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }
        match &excluded {
            Some(excluded) => fs::canonicalize(entry.path()).map(|p| &p != excluded).unwrap_or(true),
            None => true,
        }
    });

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let matched = if match_full_path {
            entry
                .path()
                .strip_prefix(root)
                .map(|rel| pattern.matches_path(rel))
                .unwrap_or(false)
        } else {
            entry.file_name().to_str().is_some_and(|name| pattern.matches(name))
        };
        if matched {
            files.push(entry.into_path());
        }
    }

    files.sort();
    debug!("Discovered {} file(s) matching '{}' under {}", files.len(), options.pattern, root.display());
    Ok(files)
}
