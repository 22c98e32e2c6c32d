//! Flag introspection: turns a command's registered flags into the styled
//! option lines shown in help output.

use skiff_utils_string::upper_first;

use crate::command::Command;

impl Command {
    /// Build the option list for help output, one entry per flag in
    /// lexicographic order. A flag with a shortcut is merged with it onto a
    /// single line; the shortcut's own entry is skipped.
    pub fn flag_defaults(&self) -> String {
        let mut lines = Vec::new();

        for flag in self.flags.flags() {
            if flag.name.len() == 1 && self.flags.is_shortcut(&flag.name) {
                continue;
            }

            let mut s = if flag.name.len() > 1 {
                match self.flags.shortcut_for(&flag.name) {
                    Some(short) => format!("  <info>-{}, --{}</>", short, flag.name),
                    None => format!("      <info>--{}</>", flag.name),
                }
            } else {
                format!("  <info>-{}</>", flag.name)
            };

            let (hint, usage) = flag.unquote_usage();
            if !hint.is_empty() {
                s.push_str(&format!(" <magenta>{hint}</>"));
            }

            // Single-letter boolean flags keep their usage on the same line.
            // Anything wider wraps; four spaces before the tab keeps 4- and
            // 8-space tab stops aligned. Width ignores the style tags.
            if skiff_style::visible_width(&s) <= 4 {
                s.push('\t');
            } else {
                s.push_str("\n    \t");
            }
            s.push_str(&upper_first(&usage).replace('\n', "\n    \t"));

            if !flag.is_zero_default() {
                if flag.is_str() {
                    s.push_str(&format!(" (default <cyan>{:?}</>)", flag.def_value));
                } else {
                    s.push_str(&format!(" (default <cyan>{}</>)", flag.def_value));
                }
            }

            lines.push(s);
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_flag_defaults_layout() {
        let mut cmd = Command::new("ls");
        cmd.flags.bool_opt("all", Some('a'), false, "Show all entries");
        cmd.flags
            .str_opt("branch", Some('b'), "main", "Branch `name` to use");
        cmd.flags.int_opt("depth", None, 0, "Clone depth");
        cmd.flags.bool_opt("x", None, false, "Use xray");

        let expected = concat!(
            "  <info>-a, --all</>\n",
            "    \tShow all entries\n",
            "  <info>-b, --branch</> <magenta>name</>\n",
            "    \tBranch name to use (default <cyan>\"main\"</>)\n",
            "      <info>--depth</> <magenta>int</>\n",
            "    \tClone depth\n",
            "  <info>-x</>\tUse xray",
        );
        assert_eq!(cmd.flag_defaults(), expected);
    }

    #[test]
    fn test_single_letter_bool_stays_on_one_line() {
        // The same-line rule measures visible width, so the style tags
        // around the name do not push a short flag onto its own line.
        let mut cmd = Command::new("ls");
        cmd.flags.bool_opt("q", None, false, "quiet mode");

        assert_eq!(cmd.flag_defaults(), "  <info>-q</>\tQuiet mode");
    }

    #[test]
    fn test_single_letter_with_hint_wraps() {
        let mut cmd = Command::new("ls");
        cmd.flags.int_opt("n", None, 0, "limit to `count` results");

        assert_eq!(
            cmd.flag_defaults(),
            "  <info>-n</> <magenta>count</>\n    \tLimit to count results"
        );
    }

    #[test]
    fn test_multiline_usage_keeps_indent() {
        let mut cmd = Command::new("ls");
        cmd.flags
            .str_opt("mode", None, "", "output mode.\none of: plain, json");

        assert_eq!(
            cmd.flag_defaults(),
            "      <info>--mode</> <magenta>string</>\n    \tOutput mode.\n    \tone of: plain, json"
        );
    }

    #[test]
    fn test_nonzero_defaults_shown() {
        let mut cmd = Command::new("fetch");
        cmd.flags
            .duration_opt("timeout", None, Duration::from_secs(90), "request timeout");
        cmd.flags.uint_opt("jobs", Some('j'), 4, "worker count");

        let expected = concat!(
            "  <info>-j, --jobs</> <magenta>uint</>\n",
            "    \tWorker count (default <cyan>4</>)\n",
            "      <info>--timeout</> <magenta>duration</>\n",
            "    \tRequest timeout (default <cyan>1m30s</>)",
        );
        assert_eq!(cmd.flag_defaults(), expected);
    }

    #[test]
    fn test_zero_defaults_suppressed() {
        let mut cmd = Command::new("ls");
        cmd.flags.str_opt("filter", None, "", "name filter");
        cmd.flags.float_opt("ratio", None, 0.0, "split ratio");
        // A string default of "0" is swallowed by the literal fallback too.
        cmd.flags.str_opt("retries", None, "0", "retry budget");

        let out = cmd.flag_defaults();
        assert!(!out.contains("default"), "unexpected default in: {out}");
    }

    #[test]
    fn test_no_flags_yields_empty() {
        let cmd = Command::new("bare");
        assert_eq!(cmd.flag_defaults(), "");
    }
}
