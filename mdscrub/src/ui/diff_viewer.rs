// mdscrub/src/ui/diff_viewer.rs
//! Unified diff output for dry runs.
//!
//! Removed lines are red, added lines green; the `---`/`+++` file header and
//! `@@` hunk markers use the diff header style.

use diffy::{create_patch, Line as DiffLine};
use std::io::{self, Write};

use crate::ui::theme::{paint, ThemeEntry};

/// Writes a unified diff of `original` against `sanitized` labelled with
/// `path`. Writes nothing when the texts are equal.
pub fn print_diff<W: Write>(
    original: &str,
    sanitized: &str,
    path: &str,
    writer: &mut W,
    supports_color: bool,
) -> io::Result<()> {
    if original == sanitized {
        return Ok(());
    }
    let patch = create_patch(original, sanitized);

    writeln!(writer, "{}", paint(&format!("--- {}", path), ThemeEntry::DiffHeader, supports_color))?;
    writeln!(writer, "{}", paint(&format!("+++ {}", path), ThemeEntry::DiffHeader, supports_color))?;

    for hunk in patch.hunks() {
        let marker = format!(
            "@@ -{},{} +{},{} @@",
            hunk.old_range().start(),
            hunk.old_range().len(),
            hunk.new_range().start(),
            hunk.new_range().len()
        );
        writeln!(writer, "{}", paint(&marker, ThemeEntry::DiffHeader, supports_color))?;
        for line in hunk.lines() {
            let (prefix, text, entry) = match line {
                DiffLine::Delete(s) => ('-', *s, Some(ThemeEntry::DiffRemoved)),
                DiffLine::Insert(s) => ('+', *s, Some(ThemeEntry::DiffAdded)),
                DiffLine::Context(s) => (' ', *s, None),
            };
            let rendered = format!("{}{}", prefix, text.trim_end_matches(['\n', '\r']));
            match entry {
                Some(entry) => writeln!(writer, "{}", paint(&rendered, entry, supports_color))?,
                None => writeln!(writer, "{}", rendered)?,
            }
        }
    }
    Ok(())
}
