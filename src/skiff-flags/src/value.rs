//! Flag value kinds and their parse/format rules.

use std::fmt;
use std::fmt::Write as _;
use std::num::IntErrorKind;
use std::time::Duration;

use thiserror::Error;

/// Error parsing a string into a flag value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("parse error")]
    Syntax,
    #[error("value out of range")]
    Range,
}

/// A flag's current value. The set of kinds is closed; every flag is one of
/// these and parses with the rules of its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagValue {
    Str(String),
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Duration(Duration),
}

impl FlagValue {
    /// Parse `s` with this kind's rules, replacing the current value.
    pub fn set_from_str(&mut self, s: &str) -> Result<(), ValueError> {
        match self {
            FlagValue::Str(v) => *v = s.to_string(),
            FlagValue::Bool(v) => *v = parse_bool(s)?,
            FlagValue::Int(v) => *v = s.parse().map_err(int_error)?,
            FlagValue::Uint(v) => *v = s.parse().map_err(int_error)?,
            FlagValue::Float(v) => *v = s.parse().map_err(|_| ValueError::Syntax)?,
            FlagValue::Duration(v) => *v = parse_duration(s)?,
        }
        Ok(())
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, FlagValue::Bool(_))
    }

    pub fn is_str(&self) -> bool {
        matches!(self, FlagValue::Str(_))
    }

    /// Kind name shown as the value hint in help output when the usage
    /// string carries no backquoted hint. Booleans take no value and get
    /// an empty hint.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FlagValue::Str(_) => "string",
            FlagValue::Bool(_) => "",
            FlagValue::Int(_) => "int",
            FlagValue::Uint(_) => "uint",
            FlagValue::Float(_) => "float",
            FlagValue::Duration(_) => "duration",
        }
    }

    /// String form of a freshly constructed zero value of the same kind.
    pub fn zero_string(&self) -> String {
        match self {
            FlagValue::Str(_) => String::new(),
            FlagValue::Bool(_) => "false".to_string(),
            FlagValue::Int(_) | FlagValue::Uint(_) | FlagValue::Float(_) => "0".to_string(),
            FlagValue::Duration(_) => "0s".to_string(),
        }
    }

    /// Whether `s` reads as an unset default for this kind: it matches the
    /// kind's zero string, or one of the literal forms `"false"`, `""` and
    /// `"0"`. The literal list also catches a string flag whose default
    /// really is `"0"`; help output relies on exactly this behavior.
    pub fn is_zero_value(&self, s: &str) -> bool {
        s == self.zero_string() || matches!(s, "false" | "" | "0")
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlagValue::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FlagValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FlagValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self {
            FlagValue::Uint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            FlagValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            FlagValue::Duration(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Str(v) => f.write_str(v),
            FlagValue::Bool(v) => write!(f, "{v}"),
            FlagValue::Int(v) => write!(f, "{v}"),
            FlagValue::Uint(v) => write!(f, "{v}"),
            FlagValue::Float(v) => write!(f, "{v}"),
            FlagValue::Duration(v) => f.write_str(&format_duration(*v)),
        }
    }
}

fn int_error(err: std::num::ParseIntError) -> ValueError {
    match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ValueError::Range,
        _ => ValueError::Syntax,
    }
}

fn parse_bool(s: &str) -> Result<bool, ValueError> {
    match s {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(ValueError::Syntax),
    }
}

/// Parse a compact duration string: a sequence of decimal numbers with unit
/// suffixes (`ns`, `us`, `ms`, `s`, `m`, `h`), such as `300ms`, `2s` or
/// `1h2m30s`. A bare `0` is accepted. Negative durations are rejected.
pub fn parse_duration(s: &str) -> Result<Duration, ValueError> {
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err(ValueError::Syntax);
    }

    let mut total = Duration::ZERO;
    let mut rest = s;
    while !rest.is_empty() {
        let num_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if num_end == 0 {
            return Err(ValueError::Syntax);
        }
        let num: f64 = rest[..num_end].parse().map_err(|_| ValueError::Syntax)?;
        rest = &rest[num_end..];

        let unit_end = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let scale = match &rest[..unit_end] {
            "ns" => 1.0,
            "us" | "\u{b5}s" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60.0 * 1e9,
            "h" => 3600.0 * 1e9,
            _ => return Err(ValueError::Syntax),
        };
        rest = &rest[unit_end..];

        let nanos = num * scale;
        if nanos > u64::MAX as f64 {
            return Err(ValueError::Range);
        }
        total = total
            .checked_add(Duration::from_nanos(nanos as u64))
            .ok_or(ValueError::Range)?;
    }
    Ok(total)
}

/// Format a duration in the same compact form [`parse_duration`] reads:
/// `0s`, `150ms`, `2s`, `1m30s`, `1h0m0s`.
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < 1_000 {
        return format!("{nanos}ns");
    }
    if nanos < 1_000_000 {
        return format!("{}us", trim_float(nanos as f64 / 1e3));
    }
    if nanos < 1_000_000_000 {
        return format!("{}ms", trim_float(nanos as f64 / 1e6));
    }

    let whole = d.as_secs();
    let hours = whole / 3600;
    let mins = (whole % 3600) / 60;
    let secs = (whole % 60) as f64 + f64::from(d.subsec_nanos()) / 1e9;

    let mut out = String::new();
    if hours > 0 {
        let _ = write!(out, "{hours}h");
    }
    if mins > 0 || hours > 0 {
        let _ = write!(out, "{mins}m");
    }
    let _ = write!(out, "{}s", trim_float(secs));
    out
}

fn trim_float(v: f64) -> String {
    format!("{v}")
}
