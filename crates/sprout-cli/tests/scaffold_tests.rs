//! End-to-end scaffolding against a fake package manager.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// Writes `package.json` on `init`, logs `install` calls, and fails
/// `install` when its flag equals `$FAKE_FAIL_FLAG`.
const FAKE_NPM: &str = r#"#!/bin/sh
case "$1" in
  init)
    name=$(basename "$PWD")
    cat > package.json <<EOF
{
  "name": "$name",
  "version": "1.0.0",
  "description": "",
  "main": "index.js",
  "scripts": {
    "test": "exit 1"
  },
  "license": "ISC"
}
EOF
    ;;
  install)
    echo "$*" >> "$FAKE_NPM_LOG"
    if [ "$2" = "$FAKE_FAIL_FLAG" ]; then
      echo "npm ERR! scripted failure" >&2
      exit 1
    fi
    ;;
esac
"#;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let npm = dir.path().join("fake-npm");
        fs::write(&npm, FAKE_NPM).unwrap();
        fs::set_permissions(&npm, fs::Permissions::from_mode(0o755)).unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn log(&self) -> PathBuf {
        self.path().join("npm.log")
    }

    fn sprout(&self) -> Command {
        let mut cmd = Command::cargo_bin("sprout").unwrap();
        cmd.current_dir(self.path())
            .env("NO_COLOR", "1")
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env("XDG_CACHE_HOME", self.path().join(".cache"))
            .env_remove("RUST_LOG")
            .env(
                "SPROUT_PACKAGE_MANAGER__PROGRAM",
                self.path().join("fake-npm"),
            )
            .env(
                "SPROUT_TEMPLATE__PATH",
                concat!(env!("CARGO_MANIFEST_DIR"), "/template"),
            )
            .env("FAKE_NPM_LOG", self.log())
            .env("FAKE_FAIL_FLAG", "none");
        cmd
    }

    fn install_log(&self) -> Vec<String> {
        fs::read_to_string(self.log())
            .unwrap_or_default()
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

#[test]
fn creates_a_complete_project() {
    let sandbox = Sandbox::new();

    sandbox
        .sprout()
        .arg("my-app")
        .assert()
        .success()
        .stdout(predicate::str::contains("Creating a new React app in"))
        .stdout(predicate::str::contains(
            "Your react application my-app is ready to go!",
        ))
        .stdout(predicate::str::contains("React codebase ready to go!"));

    let root = sandbox.path().join("my-app");
    for file in [
        "README.md",
        "webpack.config.js",
        ".eslintrc.js",
        ".babelrc",
        ".gitignore",
        "jest.config.js",
        ".stylelintrc",
        "src/index.jsx",
        "src/components/App.jsx",
        "src/pages/Home.jsx",
    ] {
        assert!(root.join(file).is_file(), "missing {file}");
    }
    assert!(!root.join("gitignore").exists());

    let manifest: Value =
        serde_json::from_str(&fs::read_to_string(root.join("package.json")).unwrap()).unwrap();
    assert_eq!(manifest["name"], "my-app");
    assert_eq!(manifest["license"], "ISC");
    assert_eq!(manifest["scripts"]["test"], "jest");
    assert_eq!(
        manifest["scripts"]["start"],
        "cross-env NODE_ENV=development webpack-dev-server -d"
    );
    assert!(manifest["scripts"]["lint:css"].is_string());

    let installs = sandbox.install_log();
    assert_eq!(installs.len(), 2);
    assert!(installs[0].starts_with("install --save "));
    assert!(installs[0].contains("react@"));
    assert!(!installs[0].contains("chalk"));
    assert!(installs[1].starts_with("install --save-dev "));
    assert!(installs[1].contains("webpack@"));
    assert!(!installs[1].contains("semantic-release"));
}

#[test]
fn failed_install_removes_the_project() {
    let sandbox = Sandbox::new();

    sandbox
        .sprout()
        .arg("broken-app")
        .env("FAKE_FAIL_FLAG", "--save-dev")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Welp something broke"))
        .stderr(predicate::str::contains("exited with status 1"));

    assert!(!sandbox.path().join("broken-app").exists());
    assert_eq!(sandbox.install_log().len(), 2);
}

#[test]
fn missing_package_manager_removes_the_project() {
    let sandbox = Sandbox::new();

    sandbox
        .sprout()
        .args(["no-npm", "--package-manager"])
        .arg(sandbox.path().join("not-installed"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("could not run"));

    assert!(!sandbox.path().join("no-npm").exists());
}

#[test]
fn non_empty_directory_is_left_alone() {
    let sandbox = Sandbox::new();
    let root = sandbox.path().join("taken");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("notes.txt"), "keep me").unwrap();

    sandbox
        .sprout()
        .arg("taken")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists and is not empty"))
        .stderr(predicate::str::contains("--force"));

    assert_eq!(fs::read_to_string(root.join("notes.txt")).unwrap(), "keep me");
    assert!(!root.join("package.json").exists());
    assert!(sandbox.install_log().is_empty());
}

#[test]
fn force_scaffolds_into_existing_directory() {
    let sandbox = Sandbox::new();
    let root = sandbox.path().join("reused");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("notes.txt"), "keep me").unwrap();

    sandbox.sprout().args(["reused", "--force"]).assert().success();

    assert!(root.join("package.json").is_file());
    assert!(root.join("notes.txt").is_file());
}

#[test]
fn inline_jest_config_from_file() {
    let sandbox = Sandbox::new();
    let config = sandbox.path().join("sprout.toml");
    fs::write(&config, "[template]\ninline_jest = true\n").unwrap();

    sandbox
        .sprout()
        .arg("--config")
        .arg(&config)
        .arg("jesty")
        .assert()
        .success();

    let root = sandbox.path().join("jesty");
    let manifest: Value =
        serde_json::from_str(&fs::read_to_string(root.join("package.json")).unwrap()).unwrap();
    assert!(manifest["jest"].is_object());
    assert!(!root.join("jest.config.js").exists());
}

#[test]
fn compiled_in_template_is_used_without_a_configured_path() {
    let sandbox = Sandbox::new();

    sandbox
        .sprout()
        .env_remove("SPROUT_TEMPLATE__PATH")
        .arg("embedded")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Your react application embedded is ready to go!",
        ));

    let root = sandbox.path().join("embedded");
    for file in ["webpack.config.js", ".gitignore", "src/components/App.jsx"] {
        assert!(root.join(file).is_file(), "missing {file}");
    }
    assert_eq!(
        fs::read_to_string(root.join("webpack.config.js")).unwrap(),
        fs::read_to_string(
            Path::new(env!("CARGO_MANIFEST_DIR")).join("template/webpack.config.js")
        )
        .unwrap()
    );
    assert!(!root.join(".sprout-bundle").exists());
}
