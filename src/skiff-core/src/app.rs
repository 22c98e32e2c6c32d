//! Minimal owning-application handle for attached commands.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

/// Shared handle on the application owning a set of commands.
///
/// Cloning the handle shares state: a command attached to a clone reports
/// errors into the same aggregate list. The full command container
/// (routing, global option parsing) lives above this crate; commands only
/// need the pieces here.
#[derive(Debug, Clone, Default)]
pub struct App {
    inner: Rc<RefCell<AppInner>>,
}

#[derive(Debug, Default)]
struct AppInner {
    name: String,
    version: String,
    bin_name: String,
    strict: bool,
    errors: Vec<Arc<anyhow::Error>>,
}

impl App {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        let app = Self::default();
        {
            let mut inner = app.inner.borrow_mut();
            inner.name = name.into();
            inner.version = version.into();
            inner.bin_name = current_bin_name();
        }
        app
    }

    /// Enable or disable strict argument-count checking for attached
    /// commands.
    pub fn with_strict(self, strict: bool) -> Self {
        self.inner.borrow_mut().strict = strict;
        self
    }

    /// Override the binary name used in help output.
    pub fn with_bin_name(self, bin_name: impl Into<String>) -> Self {
        self.inner.borrow_mut().bin_name = bin_name.into();
        self
    }

    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    pub fn version(&self) -> String {
        self.inner.borrow().version.clone()
    }

    pub fn bin_name(&self) -> String {
        self.inner.borrow().bin_name.clone()
    }

    pub fn strict(&self) -> bool {
        self.inner.borrow().strict
    }

    /// Record a command failure in the aggregate error list.
    pub fn add_error(&self, err: Arc<anyhow::Error>) {
        self.inner.borrow_mut().errors.push(err);
    }

    /// Errors recorded by attached commands so far.
    pub fn errors(&self) -> Vec<Arc<anyhow::Error>> {
        self.inner.borrow().errors.clone()
    }

    pub fn has_errors(&self) -> bool {
        !self.inner.borrow().errors.is_empty()
    }
}

/// Base name of the running binary.
pub(crate) fn current_bin_name() -> String {
    let Some(argv0) = std::env::args().next() else {
        return String::new();
    };
    Path::new(&argv0)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or(argv0)
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;

    #[test]
    fn test_clones_share_state() {
        let app = App::new("git", "2.0.0").with_strict(true);
        let other = app.clone();

        other.add_error(Arc::new(anyhow!("boom")));
        assert!(app.has_errors());
        assert_eq!(app.errors().len(), 1);
        assert_eq!(app.errors()[0].to_string(), "boom");
        assert!(other.strict());
    }

    #[test]
    fn test_bin_name_override() {
        let app = App::new("git", "2.0.0").with_bin_name("git");
        assert_eq!(app.bin_name(), "git");
        assert_eq!(app.name(), "git");
        assert_eq!(app.version(), "2.0.0");
    }
}
