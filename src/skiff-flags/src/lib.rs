//! Typed flag registration and parsing for Skiff commands.
//!
//! A [`FlagSet`] holds option values registered under long names with
//! optional single-character shortcuts, parses command-line tokens in the
//! classic stop-at-first-positional style, and exposes the registered
//! entries in lexicographic order for help rendering.
//!
//! # Example
//!
//! ```
//! use skiff_flags::FlagSet;
//!
//! let mut fs = FlagSet::new();
//! let depth = fs.int_opt("depth", Some('d'), 0, "clone `depth` limit");
//!
//! let args: Vec<String> = ["-d", "3", "src"].iter().map(|s| s.to_string()).collect();
//! fs.parse(&args)?;
//!
//! assert_eq!(depth.borrow().as_int(), Some(3));
//! assert_eq!(fs.args(), ["src".to_string()]);
//! # Ok::<(), skiff_flags::ParseError>(())
//! ```

mod set;
mod value;

pub use set::{Flag, FlagSet, ParseError, ValueRef};
pub use value::{FlagValue, ValueError, format_duration, parse_duration};
