//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `sprout-adapters` and the CLI
//! implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: directory, file and tree operations
//!   - `ProcessRunner`: external package-manager invocations
//!   - `ProgressReporter`: step-by-step progress for the user
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{ExitOutcome, Filesystem, Invocation, ProcessRunner, ProgressReporter, StdioMode};

#[cfg(test)]
pub use output::MockProcessRunner;
