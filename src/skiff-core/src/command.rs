//! Command definition: metadata, flags, arguments, hooks and handler.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use skiff_flags::FlagSet;

use crate::app::{App, current_bin_name};
use crate::args::Argument;
use crate::hooks::{HookPayload, Hooks};

/// Errors returned by command execution.
#[derive(Debug, Clone, Error)]
pub enum CommandError {
    /// A required positional argument was not supplied.
    #[error("must set value for the argument: {name} (position {position})")]
    MissingArgument { name: String, position: usize },

    /// More positional input than declared arguments, under strict mode.
    #[error("entered too many arguments: {extra:?}")]
    TooManyArguments { extra: Vec<String> },

    /// The handler failed. The same error object is recorded in the owning
    /// application's error list, when there is one.
    #[error("{0}")]
    Handler(Arc<anyhow::Error>),
}

/// Handler invoked when a command executes. Receives the command (with
/// argument values bound) and the raw positional input.
pub type CommandFunc = Box<dyn Fn(&Command, &[String]) -> anyhow::Result<()>>;

/// A runnable command: a name plus flags, positional arguments, lifecycle
/// hooks and a handler.
///
/// A command is standalone until [`Command::attach_to`] hands it to an
/// owning application; attachment enables strict argument-count checking
/// and application-level error aggregation.
pub struct Command {
    /// Command name.
    pub name: String,

    /// Alternate names, shown in help output.
    pub aliases: Vec<String>,

    /// One-line description, the first line of help output.
    pub use_for: String,

    /// Example invocations shown in the help Examples section.
    pub examples: String,

    /// Free-form text shown in the help Help section.
    pub help: String,

    /// Registered options.
    pub flags: FlagSet,

    pub(crate) args: Vec<Argument>,
    pub(crate) hooks: Hooks,
    pub(crate) handler: Option<CommandFunc>,
    pub(crate) app: Option<App>,
    pub(crate) standalone: bool,
    vars: HashMap<String, String>,
    initialized: bool,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            use_for: String::new(),
            examples: String::new(),
            help: String::new(),
            flags: FlagSet::new(),
            args: Vec::new(),
            hooks: Hooks::new(),
            handler: None,
            app: None,
            standalone: true,
            vars: HashMap::new(),
            initialized: false,
        }
    }

    /// Set the one-line description.
    pub fn with_use_for(mut self, use_for: impl Into<String>) -> Self {
        self.use_for = use_for.into();
        self
    }

    /// Set alternate names.
    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }

    /// Set the Examples help section.
    pub fn with_examples(mut self, examples: impl Into<String>) -> Self {
        self.examples = examples.into();
        self
    }

    /// Set the Help help section.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Set the handler.
    pub fn with_handler<F>(mut self, func: F) -> Self
    where
        F: Fn(&Command, &[String]) -> anyhow::Result<()> + 'static,
    {
        self.handler = Some(Box::new(func));
        self
    }

    /// Replace the handler.
    pub fn set_handler<F>(&mut self, func: F)
    where
        F: Fn(&Command, &[String]) -> anyhow::Result<()> + 'static,
    {
        self.handler = Some(Box::new(func));
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Declare a positional argument. Shorthand for [`Command::add_argument`].
    pub fn add_arg(&mut self, name: &str, description: &str, required: bool, is_array: bool) {
        let mut arg = Argument::new(name, description);
        arg.required = required;
        arg.is_array = is_array;
        self.add_argument(arg);
    }

    /// Declare a positional argument.
    ///
    /// Panics on misdeclaration: a duplicate name, an argument after an
    /// array argument, or a required argument after an optional one.
    pub fn add_argument(&mut self, mut arg: Argument) {
        if self.args.iter().any(|a| a.name == arg.name) {
            panic!(
                "command '{}': the argument '{}' already exists",
                self.name, arg.name
            );
        }
        if self.args.last().is_some_and(|a| a.is_array) {
            panic!(
                "command '{}': only the last argument can be an array",
                self.name
            );
        }
        if arg.required && self.args.iter().any(|a| !a.required) {
            panic!(
                "command '{}': required argument '{}' cannot follow an optional one",
                self.name, arg.name
            );
        }

        arg.index = self.args.len() + 1;
        self.args.push(arg);
    }

    /// Declared arguments, in declaration order.
    pub fn args(&self) -> &[Argument] {
        &self.args
    }

    /// Look up a declared argument by name.
    pub fn arg(&self, name: &str) -> Option<&Argument> {
        self.args.iter().find(|a| a.name == name)
    }

    /// Register a callback for a lifecycle event.
    pub fn on<F>(&mut self, event: &str, func: F)
    where
        F: Fn(&Command, HookPayload<'_>) + 'static,
    {
        debug!("command '{}' add hook: {}", self.name, event);
        self.hooks.on(event, Box::new(func));
    }

    /// Fire a lifecycle event to every registered callback.
    pub fn fire(&self, event: &str, payload: HookPayload<'_>) {
        debug!("command '{}' trigger the event: {}", self.name, event);
        self.hooks.fire(event, self, payload);
    }

    /// Registered hooks.
    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    /// Hand the command to an owning application. Strict argument-count
    /// checking and error aggregation follow the application from here on,
    /// and the help variables come from it instead of the process args.
    pub fn attach_to(&mut self, app: &App) {
        self.app = Some(app.clone());
        self.standalone = false;
        let bin_name = app.bin_name();
        let name = self.name.clone();
        self.add_var("binName", &bin_name);
        self.add_var("cmd", &name);
    }

    pub fn app(&self) -> Option<&App> {
        self.app.as_ref()
    }

    pub fn is_standalone(&self) -> bool {
        self.standalone
    }

    /// Whether the command runs under an owning application.
    pub fn not_alone(&self) -> bool {
        !self.standalone
    }

    /// Aliases joined for display.
    pub fn aliases_string(&self) -> String {
        self.aliases.join(",")
    }

    /// Add a `{$name}` help variable.
    pub fn add_var(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }

    /// Replace `{$name}` placeholders from the variable map. Unknown
    /// placeholders are left untouched.
    pub fn replace_vars(&self, s: &str) -> String {
        let mut out = s.to_string();
        for (name, value) in &self.vars {
            out = out.replace(&format!("{{${name}}}"), value);
        }
        out
    }

    /// One-time setup before a standalone run: capture the binary name and
    /// seed the default help variables. Idempotent.
    pub(crate) fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        let bin_name = current_bin_name();
        let name = self.name.clone();
        self.add_var("binName", &bin_name);
        self.add_var("cmd", &name);
    }

    /// Copy the command for reuse under another registration. The copy
    /// keeps the metadata and shares the flag value cells, but drops the
    /// handler and all hooks.
    pub fn copy(&self) -> Command {
        Command {
            name: self.name.clone(),
            aliases: self.aliases.clone(),
            use_for: self.use_for.clone(),
            examples: self.examples.clone(),
            help: self.help.clone(),
            flags: self.flags.clone(),
            args: self.args.clone(),
            hooks: Hooks::new(),
            handler: None,
            app: self.app.clone(),
            standalone: self.standalone,
            vars: self.vars.clone(),
            initialized: self.initialized,
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("args", &self.args)
            .field("standalone", &self.standalone)
            .field("has_handler", &self.handler.is_some())
            .finish_non_exhaustive()
    }
}
