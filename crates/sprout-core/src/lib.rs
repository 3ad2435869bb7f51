//! Sprout Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Sprout
//! React scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           sprout-cli (CLI)              │
//! │  (parses args, owns config + terminal)  │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (ScaffoldService, PackageManager)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, ProcessRunner, Progress)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    sprout-adapters (Infrastructure)     │
//! │ (LocalFilesystem, SystemProcessRunner)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ProjectName, Manifest, TemplateBundle) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sprout_core::prelude::*;
//!
//! // 1. Validate the name before anything touches the disk
//! let name = ProjectName::parse(Some("my-app"))?;
//!
//! // 2. Wire adapters into the service and run it
//! let settings = ScaffoldSettings::new(TemplateBundle::new("/usr/share/sprout/template"));
//! let service = ScaffoldService::new(runner, filesystem, progress, settings);
//! service.scaffold(&ScaffoldRequest::new(name, "/work/my-app"))?;
//! ```

pub mod application;
pub mod domain;
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        PackageManager, ScaffoldReport, ScaffoldRequest, ScaffoldService, ScaffoldSettings,
        ports::{
            ExitOutcome, Filesystem, Invocation, ProcessRunner, ProgressReporter, StdioMode,
        },
    };
    pub use crate::domain::{
        DependencyKind, Manifest, ManifestPatch, ProjectName, ScaffoldStage, TemplateBundle,
    };
    pub use crate::error::{SproutError, SproutResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
