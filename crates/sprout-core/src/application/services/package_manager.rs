//! Package-manager command construction.
//!
//! Only builds [`Invocation`]s; running them is the job of whatever
//! [`ProcessRunner`] the service was given.

use std::path::Path;

use tracing::debug;

use crate::{
    application::{
        ApplicationError,
        ports::{Invocation, ProcessRunner, StdioMode},
    },
    domain::DependencyKind,
    error::SproutResult,
};

#[cfg(windows)]
const DEFAULT_PROGRAM: &str = "npm.cmd";
#[cfg(not(windows))]
const DEFAULT_PROGRAM: &str = "npm";

/// An npm-compatible package manager executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManager {
    program: String,
}

impl PackageManager {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Platform default for npm itself.
    pub fn npm() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// `init -y` inside `dir`, output captured.
    pub fn init_invocation(&self, dir: &Path) -> Invocation {
        Invocation::new(&self.program, dir)
            .args(["init", "-y"])
            .stdio(StdioMode::Quiet)
    }

    /// `install --save[-dev] <specs…>` inside `dir`, output streamed live.
    pub fn install_invocation(
        &self,
        dir: &Path,
        kind: DependencyKind,
        specifiers: &[String],
    ) -> Invocation {
        Invocation::new(&self.program, dir)
            .args(["install", kind.save_flag()])
            .args(specifiers.iter().cloned())
            .stdio(StdioMode::Inherit)
    }
}

impl Default for PackageManager {
    fn default() -> Self {
        Self::npm()
    }
}

/// Run `invocation` and turn a non-zero exit into an error.
pub(crate) fn run_checked(runner: &dyn ProcessRunner, invocation: &Invocation) -> SproutResult<()> {
    debug!(command = %invocation, cwd = %invocation.cwd.display(), "Running command");
    let outcome = runner.run(invocation)?;
    if outcome.success() {
        return Ok(());
    }
    Err(ApplicationError::CommandFailed {
        command: invocation.to_string(),
        code: outcome.code,
        stderr: outcome.stderr,
    }
    .into())
}
