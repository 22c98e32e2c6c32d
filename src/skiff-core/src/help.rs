//! Help rendering for a single command.

use std::process;

use skiff_utils_string::upper_first;

use crate::args::Argument;
use crate::command::Command;
use crate::runner::OK;

/// Everything the help layout draws from, collected up front so the
/// renderer works off plain fields instead of reaching back into the
/// command mid-format.
#[derive(Debug)]
struct HelpContext<'a> {
    use_for: &'a str,
    name: &'a str,
    aliases: String,
    not_alone: bool,
    options: String,
    args: &'a [Argument],
    examples: &'a str,
    help: &'a str,
}

impl HelpContext<'_> {
    fn render(&self) -> String {
        let mut out = String::new();

        out.push_str(&upper_first(self.use_for));
        out.push_str("\n\n");

        if self.not_alone {
            out.push_str(&format!("<comment>Name:</> {}", self.name));
            if !self.aliases.is_empty() {
                out.push_str(&format!(" (alias: <info>{}</>)", self.aliases));
            }
            out.push('\n');
        }

        out.push_str("<comment>Usage:</> {$binName} [Global Options...] ");
        if self.not_alone {
            out.push_str(&format!("<info>{}</> ", self.name));
        }
        out.push_str("[--option ...] [argument ...]\n");

        out.push('\n');
        out.push_str("<comment>Global Options:</>\n");
        out.push_str("      <info>--verbose</>     Set error reporting level(quiet 0 - 4 debug)\n");
        out.push_str("      <info>--no-color</>    Disable color when outputting message\n");
        out.push_str("  <info>-h, --help</>        Display this help information\n");

        if !self.options.is_empty() {
            push_section(&mut out, "Options", &self.options);
        }

        if !self.args.is_empty() {
            let mut body = String::new();
            for arg in self.args {
                body.push_str(&format!(
                    "  <info>{:<12}</>{}",
                    arg.display_name,
                    upper_first(&arg.description)
                ));
                if arg.required {
                    body.push_str("<red>*</>");
                }
                body.push('\n');
            }
            push_section(&mut out, "Arguments", &body);
        }

        if !self.examples.is_empty() {
            push_section(&mut out, "Examples", self.examples);
        }

        if !self.help.is_empty() {
            push_section(&mut out, "Help", self.help);
        }

        out
    }
}

fn push_section(out: &mut String, title: &str, body: &str) {
    out.push('\n');
    out.push_str(&format!("<comment>{title}:</>\n"));
    out.push_str(body);
    if !body.ends_with('\n') {
        out.push('\n');
    }
}

impl Command {
    /// Assemble the full help text with style tags left unresolved.
    /// Help variables such as `{$binName}` are substituted; tags are kept
    /// so callers can decide whether to colorize.
    pub fn render_help(&self) -> String {
        let ctx = HelpContext {
            use_for: &self.use_for,
            name: &self.name,
            aliases: self.aliases_string(),
            not_alone: self.not_alone(),
            options: self.flag_defaults(),
            args: self.args(),
            examples: &self.examples,
            help: &self.help,
        };

        self.replace_vars(&ctx.render())
    }

    /// Render help to stdout. With `quit` the process exits with a success
    /// status after printing.
    pub fn show_help(&self, quit: bool) {
        print!("{}", skiff_style::render(&self.render_help()));
        if quit {
            process::exit(OK);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::app::App;

    use super::*;

    #[test]
    fn test_render_help_standalone_full() {
        let mut cmd = Command::new("clone")
            .with_use_for("clone a repository into a new directory")
            .with_examples("{$binName} {$cmd} https://github.com/inhere/console my-console")
            .with_help("See 'git help clone' for the underlying semantics.");
        cmd.add_var("binName", "skiff");
        cmd.add_var("cmd", "clone");
        cmd.flags.int_opt(
            "depth",
            Some('d'),
            0,
            "make a shallow clone truncated to `num` commits",
        );
        cmd.add_arg("repo", "the remote repository", true, false);
        cmd.add_arg("dir", "directory name", false, false);

        let expected = concat!(
            "Clone a repository into a new directory\n",
            "\n",
            "<comment>Usage:</> skiff [Global Options...] [--option ...] [argument ...]\n",
            "\n",
            "<comment>Global Options:</>\n",
            "      <info>--verbose</>     Set error reporting level(quiet 0 - 4 debug)\n",
            "      <info>--no-color</>    Disable color when outputting message\n",
            "  <info>-h, --help</>        Display this help information\n",
            "\n",
            "<comment>Options:</>\n",
            "  <info>-d, --depth</> <magenta>num</>\n",
            "    \tMake a shallow clone truncated to num commits\n",
            "\n",
            "<comment>Arguments:</>\n",
            "  <info>repo        </>The remote repository<red>*</>\n",
            "  <info>dir         </>Directory name\n",
            "\n",
            "<comment>Examples:</>\n",
            "skiff clone https://github.com/inhere/console my-console\n",
            "\n",
            "<comment>Help:</>\n",
            "See 'git help clone' for the underlying semantics.\n",
        );
        assert_eq!(cmd.render_help(), expected);
    }

    #[test]
    fn test_render_help_attached_names_the_command() {
        let app = App::new("demo", "0.1.0").with_bin_name("skiff");
        let mut cmd = Command::new("clone")
            .with_use_for("clone a repository")
            .with_aliases(&["cl"]);
        cmd.attach_to(&app);

        let help = cmd.render_help();
        assert!(help.contains("<comment>Name:</> clone (alias: <info>cl</>)\n"));
        assert!(help.contains(
            "<comment>Usage:</> skiff [Global Options...] <info>clone</> [--option ...] [argument ...]\n"
        ));
    }

    #[test]
    fn test_render_help_attached_without_aliases() {
        let app = App::new("demo", "0.1.0").with_bin_name("skiff");
        let mut cmd = Command::new("status").with_use_for("show status");
        cmd.attach_to(&app);

        assert!(cmd.render_help().contains("<comment>Name:</> status\n"));
    }

    #[test]
    fn test_render_help_omits_empty_sections() {
        let cmd = Command::new("noop").with_use_for("do nothing");

        let help = cmd.render_help();
        assert!(!help.contains("<comment>Name:</>"));
        assert!(!help.contains("<comment>Options:</>"));
        assert!(!help.contains("<comment>Arguments:</>"));
        assert!(!help.contains("<comment>Examples:</>"));
        assert!(!help.contains("<comment>Help:</>"));
        assert!(help.ends_with("Display this help information\n"));
    }

    #[test]
    fn test_render_help_leaves_unknown_vars() {
        let cmd = Command::new("noop").with_use_for("do nothing");

        // No binName var was seeded, so the placeholder survives as-is.
        assert!(cmd.render_help().contains("{$binName}"));
    }
}
