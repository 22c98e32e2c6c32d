//! String utilities for Skiff.

use unicode_width::UnicodeWidthStr;

/// Upper-case the first character of a string, leaving the rest untouched.
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Count the display width of a string.
pub fn display_width(s: &str) -> usize {
    s.width()
}
