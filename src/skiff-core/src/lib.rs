//! Command abstraction for building command-line tools.
//!
//! A [`Command`] bundles a flag set, declared positional arguments, lifecycle
//! hooks, and a handler closure. Commands run in two modes:
//!
//! - **standalone**: the command owns the process arguments, parses its own
//!   flags, renders its own help, and exits the process on a flag error.
//! - **attached**: the command belongs to an [`App`] that has already parsed
//!   the input and hands the remaining tokens through unchanged.
//!
//! Lifecycle hooks fire around the handler: `before` once arguments are
//! bound, then `after` on success or `error` on failure.
//!
//! # Example
//!
//! ```rust,ignore
//! use skiff_core::Command;
//!
//! let mut cmd = Command::new("clone")
//!     .with_use_for("clone a repository into a new directory");
//! let depth = cmd.flags.int_opt("depth", Some('d'), 0, "shallow clone depth");
//! cmd.add_arg("repo", "the remote repository", true, false);
//! cmd.set_handler(move |c, _args| {
//!     let repo = c.arg("repo").and_then(|a| a.value().as_single());
//!     println!("cloning {repo:?} at depth {}", *depth.borrow());
//!     Ok(())
//! });
//! cmd.must_run(&[]);
//! ```

mod app;
mod args;
mod command;
mod help;
mod hooks;
mod introspect;
mod runner;

pub use app::App;
pub use args::{ArgValue, Argument};
pub use command::{Command, CommandError, CommandFunc};
pub use hooks::{EVT_AFTER, EVT_BEFORE, EVT_ERROR, HookFunc, HookPayload, Hooks};
pub use runner::{ERR, OK};

pub use skiff_flags::{FlagSet, FlagValue, ParseError, ValueRef};

/// Re-export common types for convenience.
pub mod prelude {
    pub use crate::{App, ArgValue, Argument, Command, CommandError, HookPayload};
    pub use skiff_flags::{FlagSet, FlagValue, ValueRef};
}
