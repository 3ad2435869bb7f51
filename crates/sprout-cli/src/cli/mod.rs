//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases
//! and help text.  No business logic lives here.

use clap::Parser;
use clap_complete::Shell;

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
///
/// Parse errors are ignored so that unknown options do not abort a run; a
/// missing directory is reported by name validation instead.
#[derive(Debug, Parser)]
#[command(
    name    = "sprout",
    bin_name = "sprout",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f331} Scaffold a React application",
    long_about = "Sprout creates a ready-to-run React project: it initialises \
                  package.json, installs the runtime and development \
                  dependencies and copies webpack, babel, eslint, stylelint \
                  and jest configuration plus a starter app.",
    after_help = "EXAMPLES:\n\
        \x20 sprout my-react-app\n\
        \x20 sprout my-react-app --package-manager pnpm\n\
        \x20 sprout --completions bash > /usr/share/bash-completion/completions/sprout",
    ignore_errors = true,
)]
pub struct Cli {
    /// Flags available on every invocation.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Directory to create; its name becomes the package name.
    #[arg(value_name = "PROJECT_DIRECTORY", help = "Project directory to create")]
    pub project_directory: Option<String>,

    /// Scaffold into an existing non-empty directory.
    #[arg(
        long = "force",
        help = "Use an existing non-empty directory (removed again if scaffolding fails)"
    )]
    pub force: bool,

    /// Override the configured package-manager executable.
    #[arg(
        long = "package-manager",
        value_name = "PROGRAM",
        help = "Package manager executable (default: npm)"
    )]
    pub package_manager: Option<String>,

    /// Print a completion script and exit.
    #[arg(
        long = "completions",
        value_name = "SHELL",
        value_enum,
        help = "Generate shell completions"
    )]
    pub completions: Option<Shell>,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_project_directory() {
        let cli = Cli::parse_from(["sprout", "my-app"]);
        assert_eq!(cli.project_directory.as_deref(), Some("my-app"));
        assert!(!cli.force);
        assert!(cli.package_manager.is_none());
    }

    #[test]
    fn directory_is_optional_at_parse_time() {
        let cli = Cli::parse_from(["sprout"]);
        assert!(cli.project_directory.is_none());
    }

    #[test]
    fn parse_options() {
        let cli = Cli::parse_from([
            "sprout",
            "my-app",
            "--force",
            "--package-manager",
            "pnpm",
            "-vv",
        ]);
        assert!(cli.force);
        assert_eq!(cli.package_manager.as_deref(), Some("pnpm"));
        assert_eq!(cli.global.verbose, 2);
    }

    #[test]
    fn parse_completions() {
        let cli = Cli::parse_from(["sprout", "--completions", "zsh"]);
        assert_eq!(cli.completions, Some(Shell::Zsh));
    }

    #[test]
    fn unknown_option_after_directory_is_ignored() {
        let cli = Cli::try_parse_from(["sprout", "my-app", "--use-yarn"]).unwrap();
        assert_eq!(cli.project_directory.as_deref(), Some("my-app"));
    }
}
