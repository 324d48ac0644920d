// mdscrub/src/ui/theme.rs
//! Console palette for mdscrub output.
//!
//! Every styled element of the console report maps to one `ThemeEntry`.
//! Colors are applied only when the destination stream is a terminal.

use owo_colors::{AnsiColors, OwoColorize};

/// The different logical parts of the output that are styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeEntry {
    /// Section titles such as the batch summary header.
    Header,
    /// Successful operation messages.
    Success,
    /// General informational messages.
    Info,
    /// Warning messages.
    Warn,
    /// Error messages and failed files.
    Error,
    /// Lines added in a diff view.
    DiffAdded,
    /// Lines removed in a diff view.
    DiffRemoved,
    /// File headers and hunk markers of a diff view.
    DiffHeader,
    /// Rule and field names in the per-file summary.
    SummaryRuleName,
    /// Occurrence counts in the per-file summary.
    SummaryOccurrences,
}

impl ThemeEntry {
    pub fn color(self) -> AnsiColors {
        match self {
            ThemeEntry::Header => AnsiColors::BrightBlue,
            ThemeEntry::Success => AnsiColors::Green,
            ThemeEntry::Info => AnsiColors::Cyan,
            ThemeEntry::Warn => AnsiColors::Yellow,
            ThemeEntry::Error => AnsiColors::Red,
            ThemeEntry::DiffAdded => AnsiColors::Green,
            ThemeEntry::DiffRemoved => AnsiColors::Red,
            ThemeEntry::DiffHeader => AnsiColors::BrightBlack,
            ThemeEntry::SummaryRuleName => AnsiColors::Magenta,
            ThemeEntry::SummaryOccurrences => AnsiColors::BrightYellow,
        }
    }
}

/// Returns `text` styled for `entry`, or unchanged when color is disabled.
pub fn paint(text: &str, entry: ThemeEntry, supports_color: bool) -> String {
    if supports_color {
        text.color(entry.color()).to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_without_color_is_plain() {
        assert_eq!(paint("hello", ThemeEntry::Error, false), "hello");
    }

    #[test]
    fn test_paint_with_color_wraps_in_escape_codes() {
        let painted = paint("hello", ThemeEntry::Success, true);
        assert!(painted.contains("hello"));
        assert!(painted.starts_with("\u{1b}["));
    }
}
