//! YAML frontmatter handling.
//!
//! A document may open with a metadata block:
//!
//! ```text
//! ---
//! title: Guide
//! author: Jane Doe
//! ---
//! The body starts here.
//! ```
//!
//! The opening `---` must be the very first line and the block closes at the
//! next line consisting of exactly `---`. A trailing `\r` on either delimiter
//! line is tolerated. If either delimiter is missing the whole text is body.

use log::debug;
use serde_yml::{Mapping, Value};
use std::collections::HashSet;

use crate::errors::MdscrubError;

/// The frontmatter delimiter line.
pub const DELIMITER: &str = "---";

/// Parsed frontmatter, in document order.
pub type Frontmatter = Mapping;

fn is_delimiter(line: &str) -> bool {
    line.strip_suffix('\r').unwrap_or(line) == DELIMITER
}

/// Splits `content` into its frontmatter mapping (if any) and body.
///
/// Returns `(None, content)` when there is no opening delimiter or it is never
/// closed. An empty block yields an empty mapping.
///
/// # Errors
///
/// Returns [`MdscrubError::Parse`] when a closed block contains invalid YAML
/// or a value that is not a mapping.
pub fn split<'a>(
    content: &'a str,
    source_id: &str,
) -> Result<(Option<Frontmatter>, &'a str), MdscrubError> {
    let Some(first_newline) = content.find('\n') else {
        return Ok((None, content));
    };
    if !is_delimiter(&content[..first_newline]) {
        return Ok((None, content));
    }

    let block_start = first_newline + 1;
    let mut pos = block_start;
    loop {
        let line_end = content[pos..].find('\n').map(|i| pos + i);
        let line = &content[pos..line_end.unwrap_or(content.len())];

        if is_delimiter(line) {
            let yaml_text = &content[block_start..pos];
            let body = line_end.map_or("", |end| &content[end + 1..]);
            let frontmatter = parse_block(yaml_text, source_id)?;
            debug!("[{}] Frontmatter block with {} key(s).", source_id, frontmatter.len());
            return Ok((Some(frontmatter), body));
        }

        match line_end {
            Some(end) => pos = end + 1,
            None => break,
        }
    }

    debug!("[{}] Frontmatter opened but never closed; treating as body.", source_id);
    Ok((None, content))
}

fn parse_block(yaml_text: &str, source_id: &str) -> Result<Frontmatter, MdscrubError> {
    let value: Value = serde_yml::from_str(yaml_text).map_err(|e| MdscrubError::Parse {
        source_id: source_id.to_string(),
        message: e.to_string(),
    })?;
    match value {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(MdscrubError::Parse {
            source_id: source_id.to_string(),
            message: "frontmatter is not a mapping".to_string(),
        }),
    }
}

/// Returns a copy of `frontmatter` without the keys listed in `fields`, along
/// with the names of the keys that were dropped.
///
/// Matching is exact and case-sensitive. Non-string keys are always kept.
pub fn sanitize(frontmatter: &Frontmatter, fields: &HashSet<String>) -> (Frontmatter, Vec<String>) {
    let mut kept = Mapping::new();
    let mut removed = Vec::new();
    for (key, value) in frontmatter {
        match key.as_str() {
            Some(name) if fields.contains(name) => removed.push(name.to_string()),
            _ => {
                kept.insert(key.clone(), value.clone());
            }
        }
    }
    (kept, removed)
}

/// Reassembles a document from frontmatter and body.
///
/// An empty mapping still produces an empty `---`/`---` block, so a body that
/// opens with a horizontal rule is never mistaken for frontmatter later.
pub fn render(frontmatter: &Frontmatter, body: &str) -> Result<String, MdscrubError> {
    if frontmatter.is_empty() {
        return Ok(format!("{DELIMITER}\n{DELIMITER}\n{body}"));
    }
    let mut yaml = serde_yml::to_string(frontmatter)
        .map_err(|e| MdscrubError::Serialization(e.to_string()))?;
    if !yaml.ends_with('\n') {
        yaml.push('\n');
    }
    Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n{body}"))
}
