//! `package.json` as a domain object.
//!
//! The manifest is created by the package manager and mutated exactly once
//! by a [`ManifestPatch`] (read, merge, write back). Key order is preserved
//! so the rewritten file diffs cleanly against what `npm init` produced.

use serde_json::{Map, Value, json};

use crate::domain::{dependencies::DependencyKind, error::DomainError};

/// Scripts merged into every generated manifest.
pub const STANDARD_SCRIPTS: &[(&str, &str)] = &[
    ("start", "cross-env NODE_ENV=development webpack-dev-server -d"),
    ("build", "cross-env NODE_ENV=production webpack -p"),
    ("lint:css", "stylelint \"./src/**/*.js\""),
    ("test", "jest"),
];

/// An insertion-ordered `package.json` document.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    fields: Map<String, Value>,
}

impl Manifest {
    /// Parse manifest text. The top-level value must be an object.
    pub fn from_json_str(text: &str) -> Result<Self, DomainError> {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(fields)) => Ok(Self { fields }),
            Ok(other) => Err(DomainError::InvalidManifest(format!(
                "expected a JSON object, found {}",
                json_type(&other)
            ))),
            Err(e) => Err(DomainError::InvalidManifest(e.to_string())),
        }
    }

    /// Serialise with 2-space indentation and a trailing newline.
    pub fn to_json_string(&self) -> Result<String, DomainError> {
        let mut text = serde_json::to_string_pretty(&self.fields)
            .map_err(|e| DomainError::InvalidManifest(e.to_string()))?;
        text.push('\n');
        Ok(text)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// `(name, version)` pairs of one dependency section, in file order.
    ///
    /// Non-string versions are skipped; a missing section yields nothing.
    pub fn dependency_entries(&self, kind: DependencyKind) -> Vec<(&str, &str)> {
        self.fields
            .get(kind.manifest_key())
            .and_then(Value::as_object)
            .map(|section| {
                section
                    .iter()
                    .filter_map(|(name, version)| Some((name.as_str(), version.as_str()?)))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn set(&mut self, key: &str, value: Value) {
        // `insert` keeps the position of an existing key.
        self.fields.insert(key.to_owned(), value);
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── ManifestPatch ─────────────────────────────────────────────────────────────

/// Fixed content merged into a freshly initialised manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestPatch {
    scripts: Map<String, Value>,
    blocks: Vec<(String, Value)>,
}

impl ManifestPatch {
    /// The scripts every scaffold gets, nothing else.
    pub fn standard() -> Self {
        let scripts = STANDARD_SCRIPTS
            .iter()
            .map(|(name, command)| ((*name).to_owned(), Value::from(*command)))
            .collect();
        Self {
            scripts,
            blocks: Vec::new(),
        }
    }

    /// Add a top-level configuration block (replaces any previous one with
    /// the same key).
    pub fn with_block(mut self, key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        self.blocks.retain(|(existing, _)| *existing != key);
        self.blocks.push((key, value));
        self
    }

    pub fn scripts(&self) -> &Map<String, Value> {
        &self.scripts
    }

    pub fn has_block(&self, key: &str) -> bool {
        self.blocks.iter().any(|(existing, _)| existing == key)
    }

    /// Merge into `manifest`. `scripts` and every block are replaced
    /// wholesale; other keys are left alone.
    pub fn apply(&self, manifest: &mut Manifest) {
        manifest.set("scripts", Value::Object(self.scripts.clone()));
        for (key, value) in &self.blocks {
            manifest.set(key, value.clone());
        }
    }
}

/// Jest configuration equivalent to the bundled `jest.config.js`, for
/// embedding under the manifest's `jest` key.
pub fn jest_block() -> Value {
    json!({
        "cacheDirectory": "<rootDir>/.tmp/jest",
        "coverageDirectory": "./.tmp/coverage",
        "moduleNameMapper": {
            "^.+\\.(css|scss|cssmodule)$": "identity-obj-proxy"
        },
        "modulePaths": ["<rootDir>"],
        "moduleFileExtensions": ["js", "jsx", "json"],
        "globals": { "NODE_ENV": "test" },
        "verbose": true,
        "testRegex": "(/__tests__/.*|\\.(test|spec))\\.(js|jsx)$",
        "testPathIgnorePatterns": ["/node_modules/", "/__tests__/mocks/.*", "/__tests__/setup.js"],
        "transformIgnorePatterns": [".*(node_modules).*$"],
        "transform": { "^.+\\.jsx?$": "babel-jest" },
        "setupFiles": ["<rootDir>/src/__tests__/setup.js"],
        "snapshotSerializers": ["enzyme-to-json/serializer"]
    })
}
