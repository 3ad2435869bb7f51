//! Core domain layer for Sprout.
//!
//! Pure logic only: naming rules, manifest merging, dependency selection,
//! the template layout and the scaffold lifecycle. All I/O happens behind
//! the ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, process, or terminal access
//! - **Validated values**: a `ProjectName` only exists once it passed every check

pub mod dependencies;
pub mod error;
pub mod manifest;
pub mod project_name;
pub mod stage;
pub mod template;

pub use dependencies::{DependencyKind, TOOLING_PACKAGES, installable_specifiers};
pub use error::{DomainError, ErrorCategory};
pub use manifest::{Manifest, ManifestPatch, STANDARD_SCRIPTS, jest_block};
pub use project_name::{NameReport, ProjectName, RESERVED_NAMES, check_package_name};
pub use stage::ScaffoldStage;
pub use template::{CONFIG_FILES, ConfigFile, CopyJob, TemplateBundle};
