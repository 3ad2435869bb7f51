//! Scripted process runner for tests.

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use sprout_core::{
    application::{
        ApplicationError,
        ports::{ExitOutcome, Filesystem, Invocation, ProcessRunner},
    },
    error::{SproutError, SproutResult},
};

#[derive(Debug, Clone)]
enum Reply {
    Exit(ExitOutcome),
    Unavailable,
}

#[derive(Debug, Clone)]
struct Rule {
    needle: String,
    reply: Reply,
}

/// Records every invocation and answers from a script instead of spawning.
///
/// Clones share the call log. With [`writing_manifests_to`] it mimics
/// `npm init -y` by writing a default `package.json` into the invocation's
/// working directory.
///
/// [`writing_manifests_to`]: ScriptedProcessRunner::writing_manifests_to
#[derive(Clone, Default)]
pub struct ScriptedProcessRunner {
    calls: Arc<Mutex<Vec<Invocation>>>,
    rules: Vec<Rule>,
    manifests: Option<Arc<dyn Filesystem>>,
}

impl ScriptedProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a default manifest through `fs` whenever `init` runs.
    pub fn writing_manifests_to(mut self, fs: Arc<dyn Filesystem>) -> Self {
        self.manifests = Some(fs);
        self
    }

    /// Exit with `code` when the command line contains `needle`.
    pub fn fail_on(mut self, needle: impl Into<String>, code: i32) -> Self {
        self.rules.push(Rule {
            needle: needle.into(),
            reply: Reply::Exit(ExitOutcome {
                code: Some(code),
                stderr: format!("scripted failure (status {code})"),
            }),
        });
        self
    }

    /// Refuse to start any command whose line contains `needle`.
    pub fn unavailable_on(mut self, needle: impl Into<String>) -> Self {
        self.rules.push(Rule {
            needle: needle.into(),
            reply: Reply::Unavailable,
        });
        self
    }

    /// Every invocation seen so far, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Command lines seen so far, in order.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }

    fn write_default_manifest(&self, dir: &Path) -> SproutResult<()> {
        let Some(fs) = &self.manifests else {
            return Ok(());
        };
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        fs.write_file(&dir.join("package.json"), &default_manifest(&name))
    }
}

impl std::fmt::Debug for ScriptedProcessRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedProcessRunner")
            .field("calls", &self.calls)
            .field("rules", &self.rules)
            .field("writes_manifests", &self.manifests.is_some())
            .finish()
    }
}

impl ProcessRunner for ScriptedProcessRunner {
    fn run(&self, invocation: &Invocation) -> SproutResult<ExitOutcome> {
        self.calls
            .lock()
            .map_err(|_| SproutError::Internal {
                message: "scripted runner call log poisoned".into(),
            })?
            .push(invocation.clone());

        let line = invocation.to_string();
        if let Some(rule) = self.rules.iter().find(|r| line.contains(&r.needle)) {
            return match &rule.reply {
                Reply::Exit(outcome) => Ok(outcome.clone()),
                Reply::Unavailable => Err(ApplicationError::CommandUnavailable {
                    program: invocation.program.clone(),
                    reason: "No such file or directory (os error 2)".into(),
                }
                .into()),
            };
        }

        if invocation.subcommand() == Some("init") {
            self.write_default_manifest(&invocation.cwd)?;
        }
        Ok(ExitOutcome::with_code(0))
    }
}

fn default_manifest(name: &str) -> String {
    format!(
        r#"{{
  "name": "{name}",
  "version": "1.0.0",
  "description": "",
  "main": "index.js",
  "scripts": {{
    "test": "echo \"Error: no test specified\" && exit 1"
  }},
  "keywords": [],
  "author": "",
  "license": "ISC"
}}
"#
    )
}
