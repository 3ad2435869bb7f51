//! Output and configuration flags that sit beside the project directory.

use std::ffi::OsStr;
use std::path::PathBuf;

use clap::Args;

/// How much sprout says, whether it colours it, and where settings come from.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Repeat to see more of the scaffold as it runs.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Show scaffold steps (-v), package-manager commands (-vv), file copies (-vvv)"
    )]
    pub verbose: u8,

    /// Only errors reach the terminal. Wins over `-v`.
    #[arg(short = 'q', long = "quiet", help = "Print errors only")]
    pub quiet: bool,

    /// Plain text output. `NO_COLOR` set to any non-empty value does the same.
    #[arg(long = "no-color", help = "Disable colored output (also: NO_COLOR=<anything>)")]
    pub no_color: bool,

    /// Settings file used instead of the per-user `config.toml`.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Read settings from FILE (must exist)"
    )]
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    /// `--no-color`, or a non-empty `NO_COLOR` in the environment.
    pub fn color_disabled(&self) -> bool {
        color_disabled(self.no_color, std::env::var_os("NO_COLOR").as_deref())
    }
}

fn color_disabled(flag: bool, no_color_env: Option<&OsStr>) -> bool {
    flag || no_color_env.is_some_and(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_non_empty_no_color_value_disables_color() {
        for value in ["1", "true", "0", "false", "yes"] {
            assert!(color_disabled(false, Some(OsStr::new(value))), "{value}");
        }
    }

    #[test]
    fn empty_or_unset_no_color_keeps_color() {
        assert!(!color_disabled(false, None));
        assert!(!color_disabled(false, Some(OsStr::new(""))));
    }

    #[test]
    fn flag_disables_color_without_env() {
        assert!(color_disabled(true, None));
    }
}
