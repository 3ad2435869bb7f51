//! Scaffold lifecycle.
//!
//! ```text
//! Validating → DirectoryCreated → ManifestInitialized → ManifestPatched
//!   → DependenciesInstalled → DevDependenciesInstalled → TemplatesCopied → Done
//!
//! (any non-terminal stage) → Failed
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaffoldStage {
    Validating,
    DirectoryCreated,
    ManifestInitialized,
    ManifestPatched,
    DependenciesInstalled,
    DevDependenciesInstalled,
    TemplatesCopied,
    Done,
    Failed,
}

impl ScaffoldStage {
    /// The stage reached when the current step succeeds.
    pub const fn next(self) -> Self {
        match self {
            Self::Validating => Self::DirectoryCreated,
            Self::DirectoryCreated => Self::ManifestInitialized,
            Self::ManifestInitialized => Self::ManifestPatched,
            Self::ManifestPatched => Self::DependenciesInstalled,
            Self::DependenciesInstalled => Self::DevDependenciesInstalled,
            Self::DevDependenciesInstalled => Self::TemplatesCopied,
            Self::TemplatesCopied | Self::Done => Self::Done,
            Self::Failed => Self::Failed,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Whether failing out of this stage leaves something on disk to remove.
    pub const fn needs_rollback(self) -> bool {
        !matches!(self, Self::Validating | Self::Done | Self::Failed)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::DirectoryCreated => "directory-created",
            Self::ManifestInitialized => "manifest-initialized",
            Self::ManifestPatched => "manifest-patched",
            Self::DependenciesInstalled => "deps-installed",
            Self::DevDependenciesInstalled => "dev-deps-installed",
            Self::TemplatesCopied => "templates-copied",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ScaffoldStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_reaches_done() {
        let mut stage = ScaffoldStage::Validating;
        let mut steps = 0;
        while !stage.is_terminal() {
            stage = stage.next();
            steps += 1;
        }
        assert_eq!(stage, ScaffoldStage::Done);
        assert_eq!(steps, 7);
    }

    #[test]
    fn terminal_stages_are_absorbing() {
        assert_eq!(ScaffoldStage::Done.next(), ScaffoldStage::Done);
        assert_eq!(ScaffoldStage::Failed.next(), ScaffoldStage::Failed);
    }

    #[test]
    fn rollback_only_once_something_exists() {
        assert!(!ScaffoldStage::Validating.needs_rollback());
        assert!(ScaffoldStage::DirectoryCreated.needs_rollback());
        assert!(ScaffoldStage::DevDependenciesInstalled.needs_rollback());
        assert!(!ScaffoldStage::Done.needs_rollback());
    }

    #[test]
    fn display_uses_kebab_names() {
        assert_eq!(ScaffoldStage::DevDependenciesInstalled.to_string(), "dev-deps-installed");
    }
}
