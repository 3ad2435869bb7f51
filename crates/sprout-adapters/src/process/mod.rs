//! Process execution adapters.

mod scripted;
mod system;

pub use scripted::ScriptedProcessRunner;
pub use system::SystemProcessRunner;
