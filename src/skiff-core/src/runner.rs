//! Command execution: binding, hook firing, handler invocation, and the
//! standalone run path.

use std::process;
use std::sync::Arc;

use tracing::warn;

use skiff_flags::ParseError;

use crate::app::App;
use crate::args::bind_named_args;
use crate::command::{Command, CommandError};
use crate::hooks::{EVT_AFTER, EVT_BEFORE, EVT_ERROR, HookPayload};

/// Process exit code for success.
pub const OK: i32 = 0;

/// Process exit code for a fatal error.
pub const ERR: i32 = 2;

impl Command {
    /// Execute the command against already-parsed positional input.
    ///
    /// Binds arguments, fires `before`, invokes the handler, then fires
    /// `after` on success or `error` on failure. A binding failure returns
    /// before any event fires. A handler failure is also recorded in the
    /// owning application's error list when the command is attached.
    pub fn execute(&mut self, args: &[String]) -> Result<(), CommandError> {
        let strict = self.app.as_ref().is_some_and(App::strict);
        bind_named_args(&mut self.args, args, strict)?;

        self.fire(EVT_BEFORE, HookPayload::Args(args));

        let result = match &self.handler {
            Some(func) => func(self, args),
            None => {
                warn!("the command '{}' has no handler func to run", self.name);
                Ok(())
            }
        };

        match result {
            Err(err) => {
                let shared = Arc::new(err);
                if let Some(app) = &self.app {
                    app.add_error(Arc::clone(&shared));
                }
                self.fire(EVT_ERROR, HookPayload::Error(&*shared));
                Err(CommandError::Handler(shared))
            }
            Ok(()) => {
                self.fire(EVT_AFTER, HookPayload::None);
                Ok(())
            }
        }
    }

    /// Run the command. Standalone commands parse their own flags first:
    /// with empty `args` the process arguments are used, a parse failure
    /// prints the error and exits the process, and a bare `-h`/`--help`
    /// renders help and exits cleanly. An attached command delegates
    /// straight to [`Command::execute`]; its application already parsed
    /// the input.
    pub fn run(&mut self, args: &[String]) -> Result<(), CommandError> {
        if !self.standalone {
            return self.execute(args);
        }

        self.initialize();

        let argv: Vec<String>;
        let mut input = args;
        if input.is_empty() {
            argv = std::env::args().skip(1).collect();
            input = &argv;
        }

        if let Err(err) = self.flags.parse(input) {
            if matches!(err, ParseError::HelpRequested) {
                self.show_help(true);
                return Ok(());
            }
            exit_with_error(&err.to_string());
        }

        let rest = self.flags.args().to_vec();
        self.execute(&rest)
    }

    /// Like [`Command::run`], but panics on error.
    pub fn must_run(&mut self, args: &[String]) {
        if let Err(err) = self.run(args) {
            panic!("run command '{}' failed: {err}", self.name);
        }
    }
}

/// Print a styled error message to stderr and exit the process.
fn exit_with_error(msg: &str) -> ! {
    eprintln!(
        "{}",
        skiff_style::render_stderr(&format!("<error>ERROR:</> {msg}"))
    );
    process::exit(ERR);
}
