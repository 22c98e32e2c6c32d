//! Inline style tags for terminal output.
//!
//! Help text and error messages are marked up with `<tag>` / `</>` pairs
//! (`<info>--depth</>`, `<comment>Usage:</>`). [`render`] resolves known tags
//! to ANSI SGR sequences when stdout supports color and strips them
//! otherwise. Unknown tags pass through untouched, so angle-bracket text that
//! is not a style tag survives rendering.

use std::io::IsTerminal;
use std::sync::LazyLock;

use regex_lite::Captures;
use regex_lite::Regex;

/// ANSI SGR sequences backing the tag table.
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub const BOLD_RED: &str = "\x1b[1;31m";
}

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[a-zA-Z][a-zA-Z0-9_]*>|</>").expect("Invalid tag regex"));

/// Resolve a tag name to its SGR sequence.
fn tag_code(name: &str) -> Option<&'static str> {
    let code = match name {
        "red" => colors::RED,
        "green" => colors::GREEN,
        "yellow" => colors::YELLOW,
        "blue" => colors::BLUE,
        "magenta" => colors::MAGENTA,
        "cyan" => colors::CYAN,
        "gray" => colors::GRAY,
        "bold" => colors::BOLD,
        // Semantic names used throughout help output
        "comment" | "warning" => colors::YELLOW,
        "info" | "success" => colors::GREEN,
        "note" => colors::CYAN,
        "error" | "danger" => colors::BOLD_RED,
        _ => return None,
    };
    Some(code)
}

/// Check if stdout should output colors.
///
/// Returns false when stdout is piped/redirected or the NO_COLOR
/// environment variable is set (<https://no-color.org/>).
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    std::io::stdout().is_terminal()
}

/// Check if stderr should output colors.
pub fn should_colorize_stderr() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    std::io::stderr().is_terminal()
}

/// Render style tags for stdout, following [`should_colorize`].
pub fn render(s: &str) -> String {
    render_with(s, should_colorize())
}

/// Render style tags for stderr, following [`should_colorize_stderr`].
pub fn render_stderr(s: &str) -> String {
    render_with(s, should_colorize_stderr())
}

/// Render style tags with explicit color enablement.
///
/// Known `<tag>` markers become their SGR sequence, and `</>` (or the closing
/// form of a known tag) becomes reset. With color disabled both are removed
/// instead.
pub fn render_with(s: &str, enabled: bool) -> String {
    TAG_RE
        .replace_all(s, |caps: &Captures| {
            let tag = &caps[0];
            let name = &tag[1..tag.len() - 1];
            if let Some(closing) = name.strip_prefix('/') {
                if closing.is_empty() || tag_code(closing).is_some() {
                    return if enabled { colors::RESET } else { "" }.to_string();
                }
                return tag.to_string();
            }
            match tag_code(name) {
                Some(code) if enabled => code.to_string(),
                Some(_) => String::new(),
                None => tag.to_string(),
            }
        })
        .into_owned()
}

/// Remove known style tags without emitting any ANSI sequences.
pub fn strip_tags(s: &str) -> String {
    render_with(s, false)
}

/// Strip ANSI escape sequences (CSI and OSC) from a string.
pub fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            // CSI: parameter bytes run until the first ASCII letter
            Some('[') => {
                chars.next();
                for t in chars.by_ref() {
                    if t.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
            // OSC: runs until BEL or ST
            Some(']') => {
                chars.next();
                while let Some(t) = chars.next() {
                    if t == '\x07' {
                        break;
                    }
                    if t == '\x1b' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    out
}

/// Display width of a string with style tags and ANSI sequences excluded.
pub fn visible_width(s: &str) -> usize {
    skiff_utils_string::display_width(&strip_ansi(&strip_tags(s)))
}
