// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside `StepFailed` chains)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("no project directory was specified")]
    MissingProjectName,

    #[error("could not create a project called \"{name}\" because of npm naming restrictions")]
    InvalidProjectName {
        name: String,
        errors: Vec<String>,
        warnings: Vec<String>,
    },

    #[error(
        "cannot create a project called \"{name}\" because a dependency with the same name exists"
    )]
    ReservedProjectName {
        name: String,
        reserved: Vec<&'static str>,
    },

    // ========================================================================
    // Manifest Errors
    // ========================================================================
    #[error("invalid package manifest: {0}")]
    InvalidManifest(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingProjectName => vec![
                "Please specify the project directory:".into(),
                "  sprout <project-directory>".into(),
                "For example:".into(),
                "  sprout my-react-app".into(),
                "Run sprout --help to see all options.".into(),
            ],
            Self::InvalidProjectName {
                errors, warnings, ..
            } => errors
                .iter()
                .chain(warnings)
                .map(|problem| format!("  *  {problem}"))
                .collect(),
            Self::ReservedProjectName { reserved, .. } => {
                let mut out =
                    vec!["Due to the way npm works, the following names are not allowed:".into()];
                out.extend(reserved.iter().map(|name| format!("  {name}")));
                out.push("Please choose a different project name.".into());
                out
            }
            Self::InvalidManifest(_) => vec![
                "The package manager produced a manifest that is not a JSON object".into(),
                "Check the output of `npm init -y` in an empty directory".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingProjectName
            | Self::InvalidProjectName { .. }
            | Self::ReservedProjectName { .. } => ErrorCategory::Validation,
            Self::InvalidManifest(_) => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
