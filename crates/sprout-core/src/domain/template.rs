//! The bundled template shipped alongside the binary.
//!
//! ```text
//! template/
//! ├── package.json        ← source of the dependency lists
//! ├── README.md
//! ├── webpack.config.js
//! ├── .eslintrc.js
//! ├── .babelrc
//! ├── gitignore           ← becomes `.gitignore`
//! ├── jest.config.js
//! ├── .stylelintrc
//! └── src/                ← copied to `<project>/src`
//! ```

use std::path::{Path, PathBuf};

/// A single config file copied into the project root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigFile {
    /// Name inside the bundle.
    pub source: &'static str,
    /// Name inside the generated project.
    pub destination: &'static str,
}

impl ConfigFile {
    const fn same(name: &'static str) -> Self {
        Self {
            source: name,
            destination: name,
        }
    }
}

/// Package managers drop `.gitignore` from published tarballs, so the bundle
/// carries it without the dot.
pub const CONFIG_FILES: &[ConfigFile] = &[
    ConfigFile::same("README.md"),
    ConfigFile::same("webpack.config.js"),
    ConfigFile::same(".eslintrc.js"),
    ConfigFile::same(".babelrc"),
    ConfigFile {
        source: "gitignore",
        destination: ".gitignore",
    },
    ConfigFile::same(JEST_CONFIG_FILE),
    ConfigFile::same(".stylelintrc"),
];

pub const JEST_CONFIG_FILE: &str = "jest.config.js";
pub const MANIFEST_FILE: &str = "package.json";
pub const SOURCE_DIR: &str = "src";

/// One unit of work for the template copier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyJob {
    File { from: PathBuf, to: PathBuf },
    Tree { from: PathBuf, to: PathBuf },
}

impl CopyJob {
    pub fn destination(&self) -> &Path {
        match self {
            Self::File { to, .. } | Self::Tree { to, .. } => to,
        }
    }
}

/// Location of the bundled template on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateBundle {
    root: PathBuf,
}

impl TemplateBundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The generator's own manifest, listing the template's dependencies.
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    pub fn source_tree(&self) -> PathBuf {
        self.root.join(SOURCE_DIR)
    }

    /// Every copy needed to populate `project_root`.
    ///
    /// `skip_jest_config` drops `jest.config.js` when the jest configuration
    /// lives inside the manifest instead.
    pub fn copy_jobs(&self, project_root: &Path, skip_jest_config: bool) -> Vec<CopyJob> {
        let mut jobs: Vec<CopyJob> = CONFIG_FILES
            .iter()
            .filter(|file| !(skip_jest_config && file.source == JEST_CONFIG_FILE))
            .map(|file| CopyJob::File {
                from: self.root.join(file.source),
                to: project_root.join(file.destination),
            })
            .collect();

        jobs.push(CopyJob::Tree {
            from: self.source_tree(),
            to: project_root.join(SOURCE_DIR),
        });
        jobs
    }
}
