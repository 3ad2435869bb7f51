//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::{
    domain::ScaffoldStage,
    error::{ErrorCategory, SproutError},
};

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// An external command ran but exited unsuccessfully.
    #[error("`{command}` exited with {}", describe_code(.code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// An external command could not be started at all.
    #[error("could not run `{program}`: {reason}")]
    CommandUnavailable { program: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Target directory already holds files and overwriting was not allowed.
    #[error("Project directory {path} already exists and is not empty")]
    ProjectExists { path: PathBuf },

    /// A scaffold step failed; the partially created project was removed.
    #[error("{stage} step failed: {source}")]
    StepFailed {
        stage: ScaffoldStage,
        #[source]
        source: Box<SproutError>,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".into(),
    }
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::CommandFailed { command, stderr, .. } => {
                let mut out = vec![format!("`{command}` did not complete")];
                if let Some(line) = stderr.lines().rev().find(|l| !l.trim().is_empty()) {
                    out.push(format!("Last error output: {}", line.trim()));
                }
                out.push("Check the command output above for details".into());
                out
            }
            Self::CommandUnavailable { program, .. } => vec![
                format!("Ensure `{program}` is installed and in your PATH"),
                "Or point sprout at another package manager with --package-manager".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the template directory is complete".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Use --force to scaffold into it anyway (it is deleted if scaffolding fails)"
                    .into(),
                "Choose a different project name".into(),
            ],
            Self::StepFailed { source, .. } => {
                let mut out = source.suggestions();
                out.push("The partially created project directory was removed".into());
                out
            }
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CommandFailed { .. } | Self::CommandUnavailable { .. } => ErrorCategory::External,
            Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::StepFailed { source, .. } => source.category(),
        }
    }
}
