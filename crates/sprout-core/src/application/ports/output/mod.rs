//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `sprout-adapters` crate provides implementations.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::SproutResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `sprout_adapters::filesystem::LocalFilesystem` (production)
/// - `sprout_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Implementations must be shareable across threads: the template copier
/// issues its copies concurrently against one instance.
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SproutResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> SproutResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// `true` if `path` is a directory with no entries.
    fn is_empty_dir(&self, path: &Path) -> SproutResult<bool>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> SproutResult<String>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> SproutResult<()>;

    /// Copy one file, creating the destination's parent and overwriting.
    fn copy_file(&self, from: &Path, to: &Path) -> SproutResult<()>;

    /// Recursively copy a directory tree, overwriting existing files.
    fn copy_tree(&self, from: &Path, to: &Path) -> SproutResult<()>;
}

/// How a child process' standard streams are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdioMode {
    /// Share the parent's terminal so output is visible live.
    Inherit,
    /// Capture output; only the exit status (and stderr on failure) matters.
    Quiet,
}

/// A single external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub stdio: StdioMode,
}

impl Invocation {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
            stdio: StdioMode::Quiet,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn stdio(mut self, stdio: StdioMode) -> Self {
        self.stdio = stdio;
        self
    }

    /// First argument, i.e. the package-manager subcommand.
    pub fn subcommand(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How a finished process ended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExitOutcome {
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
    /// Captured stderr; empty for `StdioMode::Inherit`.
    pub stderr: String,
}

impl ExitOutcome {
    pub fn with_code(code: i32) -> Self {
        Self {
            code: Some(code),
            stderr: String::new(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Port for running external commands.
///
/// Implemented by:
/// - `sprout_adapters::process::SystemProcessRunner` (production)
/// - `sprout_adapters::process::ScriptedProcessRunner` (testing)
///
/// A command that cannot be spawned is an `Err`; a command that ran is an
/// `Ok` regardless of its exit status.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner: Send + Sync {
    fn run(&self, invocation: &Invocation) -> SproutResult<ExitOutcome>;
}

/// Port for reporting scaffold progress.
///
/// Implemented by:
/// - the CLI's spinner (terminal)
/// - `sprout_adapters::progress::SilentProgress` / `RecordingProgress`
pub trait ProgressReporter: Send + Sync {
    /// A step began.
    fn start(&self, message: &str);

    /// The running step finished successfully.
    fn succeed(&self, message: &str);

    /// Stop any animation and print a plain note.
    fn info(&self, message: &str);

    /// The running step failed.
    fn fail(&self, message: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_displays_as_command_line() {
        let inv = Invocation::new("npm", "/tmp/app")
            .arg("install")
            .args(["--save", "react@^16.8.0"]);
        assert_eq!(inv.to_string(), "npm install --save react@^16.8.0");
        assert_eq!(inv.subcommand(), Some("install"));
        assert_eq!(inv.stdio, StdioMode::Quiet);
    }

    #[test]
    fn only_zero_is_success() {
        assert!(ExitOutcome::with_code(0).success());
        assert!(!ExitOutcome::with_code(1).success());
        assert!(!ExitOutcome::default().success());
    }
}
