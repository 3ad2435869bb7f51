//! Diagnostics on stderr.
//!
//! A normal run prints only warnings from sprout's own crates; user-facing
//! messages go through [`crate::output`] instead. Each `-v` opens one more
//! tier of detail about the scaffold. `RUST_LOG` replaces the filter wholesale.

use std::io::{self, IsTerminal as _};

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

const TARGETS: [&str; 3] = ["sprout", "sprout_core", "sprout_adapters"];

/// Detail tiers selected by `-q` and `-v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// `-q`: errors only.
    Quiet,
    /// Warnings, e.g. a rollback that could not remove the directory.
    Normal,
    /// `-v`: each scaffold step as it starts and ends.
    Steps,
    /// `-vv`: package-manager command lines, resolved paths, install plan.
    Commands,
    /// `-vvv`: every template file copied.
    Files,
}

impl Verbosity {
    pub fn from_args(args: &GlobalArgs) -> Self {
        if args.quiet {
            return Self::Quiet;
        }
        match args.verbose {
            0 => Self::Normal,
            1 => Self::Steps,
            2 => Self::Commands,
            _ => Self::Files,
        }
    }

    fn level(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Steps => "info",
            Self::Commands => "debug",
            Self::Files => "trace",
        }
    }

    /// `EnvFilter` directives limiting output to sprout's crates.
    fn directives(self) -> String {
        let level = self.level();
        TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Install the stderr subscriber. Call once, before anything logs.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let verbosity = Verbosity::from_args(args);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directives()));

    // No timestamps; module targets from -vv up.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_target(verbosity >= Verbosity::Commands)
        .with_ansi(!args.color_disabled() && io::stderr().is_terminal())
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}
