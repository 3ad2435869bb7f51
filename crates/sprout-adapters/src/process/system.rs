//! Runs commands with `std::process::Command`.

use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use sprout_core::{
    application::{
        ApplicationError,
        ports::{ExitOutcome, Invocation, ProcessRunner, StdioMode},
    },
    error::SproutResult,
};

/// Production process runner.
///
/// `Inherit` invocations share the terminal so the package manager's own
/// progress output stays visible; `Quiet` ones capture stderr for error
/// reporting and drop stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    #[instrument(skip_all, fields(command = %invocation))]
    fn run(&self, invocation: &Invocation) -> SproutResult<ExitOutcome> {
        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::inherit());

        let unavailable = |e: std::io::Error| ApplicationError::CommandUnavailable {
            program: invocation.program.clone(),
            reason: e.to_string(),
        };

        let outcome = match invocation.stdio {
            StdioMode::Inherit => {
                let status = command
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .map_err(unavailable)?;
                ExitOutcome {
                    code: status.code(),
                    stderr: String::new(),
                }
            }
            StdioMode::Quiet => {
                let output = command
                    .stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::piped())
                    .output()
                    .map_err(unavailable)?;
                ExitOutcome {
                    code: output.status.code(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                }
            }
        };

        debug!(code = ?outcome.code, "Command finished");
        Ok(outcome)
    }
}
