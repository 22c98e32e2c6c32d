//! Flag sets: registration, parsing and visitation.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

use crate::value::FlagValue;
use crate::value::ValueError;

/// Shared handle on a flag's value cell, updated by [`FlagSet::parse`].
///
/// Registering a shortcut alias creates a second entry sharing the same
/// cell, so setting either name is visible through one handle.
pub type ValueRef = Rc<RefCell<FlagValue>>;

/// Errors surfaced by [`FlagSet::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("bad flag syntax: {0}")]
    BadSyntax(String),
    #[error("flag provided but not defined: -{0}")]
    UndefinedFlag(String),
    #[error("flag needs an argument: -{0}")]
    MissingValue(String),
    #[error("invalid value {value:?} for flag -{name}: {source}")]
    BadValue {
        value: String,
        name: String,
        #[source]
        source: ValueError,
    },
    /// `-h`/`--help` was given and no flag with that name is defined.
    #[error("help requested")]
    HelpRequested,
}

/// A registered flag entry.
///
/// Cloning shares the value cell: a parse through the original is visible
/// through the clone and vice versa.
#[derive(Debug, Clone)]
pub struct Flag {
    pub name: String,
    pub usage: String,
    /// String form of the default, captured at registration.
    pub def_value: String,
    value: ValueRef,
}

impl Flag {
    /// Snapshot of the current value.
    pub fn current(&self) -> FlagValue {
        self.value.borrow().clone()
    }

    pub fn is_bool(&self) -> bool {
        self.value.borrow().is_bool()
    }

    pub fn is_str(&self) -> bool {
        self.value.borrow().is_str()
    }

    /// Whether the default reads as this kind's zero value and should be
    /// suppressed from help output.
    pub fn is_zero_default(&self) -> bool {
        self.value.borrow().is_zero_value(&self.def_value)
    }

    /// Extract the backquoted value hint from the usage string, returning
    /// the hint and the usage with the backquotes removed. Without a
    /// backquoted segment the hint falls back to the kind name.
    pub fn unquote_usage(&self) -> (String, String) {
        if let Some(start) = self.usage.find('`') {
            if let Some(len) = self.usage[start + 1..].find('`') {
                let hint = self.usage[start + 1..start + 1 + len].to_string();
                let unquoted = format!(
                    "{}{}{}",
                    &self.usage[..start],
                    hint,
                    &self.usage[start + 1 + len + 1..]
                );
                return (hint, unquoted);
            }
        }
        (
            self.value.borrow().kind_name().to_string(),
            self.usage.clone(),
        )
    }
}

/// A set of registered flags plus the result of parsing input tokens
/// against them.
///
/// Parsing follows the classic single-pass style: it stops at the first
/// token that is not a flag, treats `--` as a terminator, and accepts
/// `-n`, `--name` and `--name=value` forms. Boolean flags only take an
/// explicit value in the `=` form.
///
/// Cloning a set clones the entries but shares their value cells, so a
/// command copied for reuse sees values through the same handles.
#[derive(Debug, Clone, Default)]
pub struct FlagSet {
    flags: BTreeMap<String, Flag>,
    shortcuts: HashMap<char, String>,
    args: Vec<String>,
    parsed: bool,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a string flag. Panics if `name` (or the shortcut) is
    /// already taken.
    pub fn str_opt(
        &mut self,
        name: &str,
        short: Option<char>,
        default: &str,
        usage: &str,
    ) -> ValueRef {
        self.add(name, short, FlagValue::Str(default.to_string()), usage)
    }

    /// Register a boolean flag.
    pub fn bool_opt(
        &mut self,
        name: &str,
        short: Option<char>,
        default: bool,
        usage: &str,
    ) -> ValueRef {
        self.add(name, short, FlagValue::Bool(default), usage)
    }

    /// Register a signed integer flag.
    pub fn int_opt(
        &mut self,
        name: &str,
        short: Option<char>,
        default: i64,
        usage: &str,
    ) -> ValueRef {
        self.add(name, short, FlagValue::Int(default), usage)
    }

    /// Register an unsigned integer flag.
    pub fn uint_opt(
        &mut self,
        name: &str,
        short: Option<char>,
        default: u64,
        usage: &str,
    ) -> ValueRef {
        self.add(name, short, FlagValue::Uint(default), usage)
    }

    /// Register a float flag.
    pub fn float_opt(
        &mut self,
        name: &str,
        short: Option<char>,
        default: f64,
        usage: &str,
    ) -> ValueRef {
        self.add(name, short, FlagValue::Float(default), usage)
    }

    /// Register a duration flag.
    pub fn duration_opt(
        &mut self,
        name: &str,
        short: Option<char>,
        default: std::time::Duration,
        usage: &str,
    ) -> ValueRef {
        self.add(name, short, FlagValue::Duration(default), usage)
    }

    fn add(&mut self, name: &str, short: Option<char>, value: FlagValue, usage: &str) -> ValueRef {
        assert!(!name.is_empty(), "flag name must not be empty");
        assert!(
            !name.starts_with('-'),
            "flag name must not begin with -: {name}"
        );
        assert!(
            !self.flags.contains_key(name),
            "flag redefined: {name}"
        );

        let cell = Rc::new(RefCell::new(value));
        let def_value = cell.borrow().to_string();
        self.flags.insert(
            name.to_string(),
            Flag {
                name: name.to_string(),
                usage: usage.to_string(),
                def_value: def_value.clone(),
                value: cell.clone(),
            },
        );

        if let Some(s) = short {
            let short_name = s.to_string();
            assert!(
                !self.flags.contains_key(&short_name),
                "flag redefined: {short_name}"
            );
            self.flags.insert(
                short_name.clone(),
                Flag {
                    name: short_name,
                    usage: usage.to_string(),
                    def_value,
                    value: cell.clone(),
                },
            );
            self.shortcuts.insert(s, name.to_string());
        }

        cell
    }

    /// Parse `input` against the registered flags. Stops at the first
    /// non-flag token; the remainder is available through [`Self::args`].
    pub fn parse(&mut self, input: &[String]) -> Result<(), ParseError> {
        self.parsed = true;
        self.args.clear();

        let mut rest = input;
        loop {
            let Some(arg) = rest.first() else { break };
            if arg.len() < 2 || !arg.starts_with('-') {
                break;
            }

            let mut name = &arg[1..];
            if let Some(stripped) = name.strip_prefix('-') {
                if stripped.is_empty() {
                    rest = &rest[1..];
                    break;
                }
                name = stripped;
            }
            if name.starts_with('-') || name.starts_with('=') {
                return Err(ParseError::BadSyntax(arg.clone()));
            }
            rest = &rest[1..];

            let (name, inline) = match name.split_once('=') {
                Some((n, v)) => (n, Some(v.to_string())),
                None => (name, None),
            };

            let Some(flag) = self.flags.get(name) else {
                if name == "help" || name == "h" {
                    return Err(ParseError::HelpRequested);
                }
                return Err(ParseError::UndefinedFlag(name.to_string()));
            };

            let value = if flag.is_bool() {
                inline.unwrap_or_else(|| "true".to_string())
            } else if let Some(v) = inline {
                v
            } else if let Some(next) = rest.first() {
                rest = &rest[1..];
                next.clone()
            } else {
                return Err(ParseError::MissingValue(name.to_string()));
            };

            flag.value
                .borrow_mut()
                .set_from_str(&value)
                .map_err(|source| ParseError::BadValue {
                    value,
                    name: name.to_string(),
                    source,
                })?;
        }

        self.args = rest.to_vec();
        Ok(())
    }

    /// Non-flag tokens remaining after [`Self::parse`].
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn parsed(&self) -> bool {
        self.parsed
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn lookup(&self, name: &str) -> Option<&Flag> {
        self.flags.get(name)
    }

    /// All entries in lexicographic name order.
    pub fn flags(&self) -> impl Iterator<Item = &Flag> {
        self.flags.values()
    }

    /// Single-character alias registered for long flag `name`, if any.
    pub fn shortcut_for(&self, name: &str) -> Option<char> {
        self.shortcuts
            .iter()
            .find_map(|(s, long)| (long == name).then_some(*s))
    }

    /// Whether `name` is a single-character alias of a longer flag name.
    pub fn is_shortcut(&self, name: &str) -> bool {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.shortcuts.contains_key(&c),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_defaults_captured_at_registration() {
        let mut fs = FlagSet::new();
        fs.str_opt("config", None, "app.ini", "config `file` to load");
        fs.int_opt("depth", Some('d'), 1, "clone depth");

        let config = fs.lookup("config").unwrap();
        assert_eq!(config.def_value, "app.ini");
        assert!(!config.is_zero_default());

        let depth = fs.lookup("depth").unwrap();
        assert_eq!(depth.def_value, "1");
        assert_eq!(depth.current(), FlagValue::Int(1));
    }

    #[test]
    fn test_parse_long_and_short_share_value() {
        let mut fs = FlagSet::new();
        let depth = fs.int_opt("depth", Some('d'), 0, "clone depth");

        fs.parse(&argv(&["-d", "3"])).unwrap();
        assert_eq!(depth.borrow().as_int(), Some(3));

        fs.parse(&argv(&["--depth", "7"])).unwrap();
        assert_eq!(depth.borrow().as_int(), Some(7));
        assert_eq!(fs.lookup("d").unwrap().current(), FlagValue::Int(7));
    }

    #[test]
    fn test_parse_inline_value() {
        let mut fs = FlagSet::new();
        let name = fs.str_opt("name", None, "", "target name");
        fs.parse(&argv(&["--name=web", "extra"])).unwrap();
        assert_eq!(name.borrow().as_str(), Some("web"));
        assert_eq!(fs.args(), argv(&["extra"]));
    }

    #[test]
    fn test_bool_needs_equals_for_explicit_value() {
        let mut fs = FlagSet::new();
        let verbose = fs.bool_opt("verbose", Some('v'), false, "more output");

        fs.parse(&argv(&["-v", "false"])).unwrap();
        // The bare token is positional, not a value for -v.
        assert_eq!(verbose.borrow().as_bool(), Some(true));
        assert_eq!(fs.args(), argv(&["false"]));

        fs.parse(&argv(&["--verbose=false"])).unwrap();
        assert_eq!(verbose.borrow().as_bool(), Some(false));
    }

    #[test]
    fn test_parse_stops_at_first_positional() {
        let mut fs = FlagSet::new();
        let verbose = fs.bool_opt("verbose", None, false, "more output");
        fs.parse(&argv(&["src", "--verbose"])).unwrap();
        assert_eq!(verbose.borrow().as_bool(), Some(false));
        assert_eq!(fs.args(), argv(&["src", "--verbose"]));
    }

    #[test]
    fn test_double_dash_terminates() {
        let mut fs = FlagSet::new();
        let verbose = fs.bool_opt("verbose", None, false, "more output");
        fs.parse(&argv(&["--verbose", "--", "--not-a-flag"])).unwrap();
        assert_eq!(verbose.borrow().as_bool(), Some(true));
        assert_eq!(fs.args(), argv(&["--not-a-flag"]));
    }

    #[test]
    fn test_single_dash_is_positional() {
        let mut fs = FlagSet::new();
        fs.bool_opt("verbose", None, false, "more output");
        fs.parse(&argv(&["-", "x"])).unwrap();
        assert_eq!(fs.args(), argv(&["-", "x"]));
    }

    #[test]
    fn test_undefined_flag() {
        let mut fs = FlagSet::new();
        let err = fs.parse(&argv(&["--nope"])).unwrap_err();
        assert_eq!(err, ParseError::UndefinedFlag("nope".to_string()));
        assert_eq!(
            err.to_string(),
            "flag provided but not defined: -nope"
        );
    }

    #[test]
    fn test_help_requested_when_undefined() {
        let mut fs = FlagSet::new();
        assert_matches!(
            fs.parse(&argv(&["-h"])),
            Err(ParseError::HelpRequested)
        );
        assert_matches!(
            fs.parse(&argv(&["--help"])),
            Err(ParseError::HelpRequested)
        );

        // A user-defined help flag wins over the built-in.
        let mut fs = FlagSet::new();
        let help = fs.bool_opt("help", Some('h'), false, "show help");
        fs.parse(&argv(&["-h"])).unwrap();
        assert_eq!(help.borrow().as_bool(), Some(true));
    }

    #[test]
    fn test_missing_value() {
        let mut fs = FlagSet::new();
        fs.str_opt("name", None, "", "target name");
        assert_eq!(
            fs.parse(&argv(&["--name"])),
            Err(ParseError::MissingValue("name".to_string()))
        );
    }

    #[test]
    fn test_bad_value() {
        let mut fs = FlagSet::new();
        fs.int_opt("depth", None, 0, "clone depth");
        let err = fs.parse(&argv(&["--depth", "abc"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value \"abc\" for flag -depth: parse error"
        );
    }

    #[test]
    fn test_bad_syntax() {
        let mut fs = FlagSet::new();
        assert_matches!(
            fs.parse(&argv(&["---x"])),
            Err(ParseError::BadSyntax(_))
        );
        assert_matches!(
            fs.parse(&argv(&["-=v"])),
            Err(ParseError::BadSyntax(_))
        );
    }

    #[test]
    fn test_lexicographic_visitation() {
        let mut fs = FlagSet::new();
        fs.str_opt("name", None, "", "target name");
        fs.bool_opt("all", None, false, "apply to all");
        fs.int_opt("depth", Some('d'), 0, "clone depth");

        let names: Vec<&str> = fs.flags().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["all", "d", "depth", "name"]);
    }

    #[test]
    fn test_shortcut_queries() {
        let mut fs = FlagSet::new();
        fs.int_opt("depth", Some('d'), 0, "clone depth");
        fs.bool_opt("x", None, false, "single-letter flag");

        assert_eq!(fs.shortcut_for("depth"), Some('d'));
        assert_eq!(fs.shortcut_for("x"), None);
        assert!(fs.is_shortcut("d"));
        assert!(!fs.is_shortcut("x"));
        assert!(!fs.is_shortcut("depth"));
    }

    #[test]
    #[should_panic(expected = "flag redefined: depth")]
    fn test_redefinition_panics() {
        let mut fs = FlagSet::new();
        fs.int_opt("depth", None, 0, "clone depth");
        fs.int_opt("depth", None, 1, "again");
    }

    #[test]
    fn test_unquote_usage() {
        let mut fs = FlagSet::new();
        fs.str_opt("config", None, "", "load the given `file` on start");
        fs.int_opt("depth", None, 0, "clone depth");
        fs.bool_opt("verbose", None, false, "more output");

        let (hint, usage) = fs.lookup("config").unwrap().unquote_usage();
        assert_eq!(hint, "file");
        assert_eq!(usage, "load the given file on start");

        let (hint, usage) = fs.lookup("depth").unwrap().unquote_usage();
        assert_eq!(hint, "int");
        assert_eq!(usage, "clone depth");

        let (hint, _) = fs.lookup("verbose").unwrap().unquote_usage();
        assert_eq!(hint, "");
    }
}
