//! Skiff demo binary: a standalone `clone` command.
//!
//! Run with `-h` to see the generated help, or try:
//!
//! ```text
//! skiff --depth 1 https://github.com/inhere/console my-console
//! ```

use anyhow::anyhow;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use skiff_core::{Command, EVT_BEFORE, HookPayload};

fn main() {
    setup_logging();

    let mut cmd = build_clone_command();
    if let Err(err) = cmd.run(&[]) {
        eprintln!(
            "{}",
            skiff_style::render_stderr(&format!("<error>ERROR:</> {err}"))
        );
        std::process::exit(skiff_core::ERR);
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Build the demo command: typed flags, positional arguments, a lifecycle
/// hook, and a handler that reports what it would clone.
fn build_clone_command() -> Command {
    let mut cmd = Command::new("clone")
        .with_use_for("clone a repository into a new directory")
        .with_examples(concat!(
            "{$binName} https://github.com/inhere/console\n",
            "{$binName} --depth 1 --bare https://github.com/inhere/console console-bare"
        ))
        .with_help(
            "The repository url may end in '.git'; the suffix is dropped\nwhen deriving a directory name.",
        );

    let depth = cmd.flags.int_opt(
        "depth",
        Some('d'),
        0,
        "create a shallow clone truncated to `num` commits",
    );
    let bare = cmd
        .flags
        .bool_opt("bare", None, false, "make a bare repository");
    let branch = cmd.flags.str_opt(
        "branch",
        Some('b'),
        "",
        "checkout `name` instead of the remote head",
    );

    cmd.add_arg("repo", "the remote repository url", true, false);
    cmd.add_arg("dir", "directory to clone into", false, false);

    cmd.on(EVT_BEFORE, |c, payload| {
        if let HookPayload::Args(args) = payload {
            debug!(
                "command '{}' received {} positional tokens",
                c.name,
                args.len()
            );
        }
    });

    cmd.set_handler(move |c, _args| {
        let repo = c
            .arg("repo")
            .and_then(|a| a.value().as_single())
            .ok_or_else(|| anyhow!("repository url must not be empty"))?
            .to_string();
        let dir = c
            .arg("dir")
            .and_then(|a| a.value().as_single())
            .map(str::to_string)
            .unwrap_or_else(|| repo_dir_name(&repo));

        let depth = depth.borrow().as_int().unwrap_or(0);
        let bare = bare.borrow().as_bool().unwrap_or(false);

        let mut line = format!("Cloning <info>{repo}</> into <comment>{dir}</>");
        if let Some(name) = branch.borrow().as_str().filter(|n| !n.is_empty()) {
            line.push_str(&format!(" at branch <magenta>{name}</>"));
        }
        if depth > 0 {
            line.push_str(&format!(" (depth {depth})"));
        }
        if bare {
            line.push_str(" as a bare repository");
        }
        println!("{}", skiff_style::render(&line));
        Ok(())
    });

    cmd
}

/// Derive a directory name from a repository url.
fn repo_dir_name(repo: &str) -> String {
    let base = repo
        .trim_end_matches('/')
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(repo);
    base.trim_end_matches(".git").to_string()
}
