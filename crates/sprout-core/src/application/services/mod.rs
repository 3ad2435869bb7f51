//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a project".

pub mod package_manager;
pub mod scaffold_service;

pub use package_manager::PackageManager;
pub use scaffold_service::{ScaffoldReport, ScaffoldRequest, ScaffoldService, ScaffoldSettings};
