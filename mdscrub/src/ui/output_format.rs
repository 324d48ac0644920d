// mdscrub/src/ui/output_format.rs
//! Prefixed status messages (`Info:`, `Warning:`, `Error:`).

use std::io::{self, Write};

use crate::ui::theme::{paint, ThemeEntry};

pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    writeln!(writer, "{}", paint(msg, ThemeEntry::Info, supports_color))
}

pub fn print_success_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    writeln!(writer, "{}", paint(msg, ThemeEntry::Success, supports_color))
}

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    writeln!(writer, "{}", paint(&format!("Warning: {}", msg), ThemeEntry::Warn, supports_color))
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    writeln!(writer, "{}", paint(&format!("Error: {}", msg), ThemeEntry::Error, supports_color))
}
