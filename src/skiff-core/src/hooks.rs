//! Named lifecycle events scoped to one command.

use std::collections::HashMap;
use std::fmt;

use crate::command::Command;

/// Event fired after argument binding succeeds, before the handler runs.
pub const EVT_BEFORE: &str = "before";

/// Event fired after the handler returns success.
pub const EVT_AFTER: &str = "after";

/// Event fired when the handler returns an error.
pub const EVT_ERROR: &str = "error";

/// Data passed to hook callbacks when an event fires.
#[derive(Debug, Clone, Copy)]
pub enum HookPayload<'a> {
    None,
    /// The raw positional input, on [`EVT_BEFORE`].
    Args(&'a [String]),
    /// The handler's error, on [`EVT_ERROR`].
    Error(&'a anyhow::Error),
}

/// Callback registered for an event.
pub type HookFunc = Box<dyn Fn(&Command, HookPayload<'_>)>;

/// Per-command registry of event callbacks.
///
/// Callbacks for one event run in registration order; there is no ordering
/// across different events. Firing is fire-and-forget: callbacks return
/// nothing and cannot cancel execution.
#[derive(Default)]
pub struct Hooks {
    hooks: HashMap<String, Vec<HookFunc>>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for `event`.
    pub fn on(&mut self, event: &str, func: HookFunc) {
        self.hooks.entry(event.to_string()).or_default().push(func);
    }

    /// Invoke every callback registered for `event`, in registration order.
    /// An event with no callbacks is a no-op.
    pub fn fire(&self, event: &str, cmd: &Command, payload: HookPayload<'_>) {
        if let Some(funcs) = self.hooks.get(event) {
            for func in funcs {
                func(cmd, payload);
            }
        }
    }

    /// Drop all registered callbacks.
    pub fn clear(&mut self) {
        self.hooks.clear();
    }

    /// Number of callbacks registered for `event`.
    pub fn count(&self, event: &str) -> usize {
        self.hooks.get(event).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.values().all(Vec::is_empty)
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (event, funcs) in &self.hooks {
            map.entry(event, &funcs.len());
        }
        map.finish()
    }
}
