//! Progress reporters that do not draw to a terminal.

use std::sync::{Arc, Mutex};

use tracing::debug;

use sprout_core::application::ports::ProgressReporter;

/// Discards progress; lifecycle lines still reach the debug log.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn start(&self, message: &str) {
        debug!(event = "start", "{message}");
    }

    fn succeed(&self, message: &str) {
        debug!(event = "succeed", "{message}");
    }

    fn info(&self, message: &str) {
        debug!(event = "info", "{message}");
    }

    fn fail(&self, message: &str) {
        debug!(event = "fail", "{message}");
    }
}

/// One reported progress event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Start(String),
    Succeed(String),
    Info(String),
    Fail(String),
}

/// Keeps every event for later inspection. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingProgress {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    fn push(&self, event: ProgressEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl ProgressReporter for RecordingProgress {
    fn start(&self, message: &str) {
        self.push(ProgressEvent::Start(message.into()));
    }

    fn succeed(&self, message: &str) {
        self.push(ProgressEvent::Succeed(message.into()));
    }

    fn info(&self, message: &str) {
        self.push(ProgressEvent::Info(message.into()));
    }

    fn fail(&self, message: &str) {
        self.push(ProgressEvent::Fail(message.into()));
    }
}
