//! The React template compiled into the binary.
//!
//! The files live under `template/` in this crate and are included as string
//! constants, then unpacked to disk on first use so the core copier can read
//! them like any other bundle directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Written last; its presence means the unpack finished.
const MARKER: &str = ".sprout-bundle";

/// `(path relative to the bundle root, content)`.
pub const FILES: &[(&str, &str)] = &[
    ("package.json", include_str!("../template/package.json")),
    ("README.md", include_str!("../template/README.md")),
    ("gitignore", include_str!("../template/gitignore")),
    (".babelrc", include_str!("../template/.babelrc")),
    (".eslintrc.js", include_str!("../template/.eslintrc.js")),
    (".stylelintrc", include_str!("../template/.stylelintrc")),
    ("jest.config.js", include_str!("../template/jest.config.js")),
    ("webpack.config.js", include_str!("../template/webpack.config.js")),
    ("src/index.html", include_str!("../template/src/index.html")),
    ("src/index.jsx", include_str!("../template/src/index.jsx")),
    (
        "src/components/App.jsx",
        include_str!("../template/src/components/App.jsx"),
    ),
    (
        "src/components/ThemeSelect.jsx",
        include_str!("../template/src/components/ThemeSelect.jsx"),
    ),
    (
        "src/contexts/ThemeContext.jsx",
        include_str!("../template/src/contexts/ThemeContext.jsx"),
    ),
    ("src/pages/About.jsx", include_str!("../template/src/pages/About.jsx")),
    ("src/pages/Home.jsx", include_str!("../template/src/pages/Home.jsx")),
    (
        "src/theme/globalStyle.js",
        include_str!("../template/src/theme/globalStyle.js"),
    ),
    (
        "src/__tests__/setup.js",
        include_str!("../template/src/__tests__/setup.js"),
    ),
    (
        "src/__tests__/App.test.jsx",
        include_str!("../template/src/__tests__/App.test.jsx"),
    ),
];

/// Where this version's bundle is unpacked: the user cache directory, or the
/// system temp directory when no home is known.
pub fn default_dir() -> PathBuf {
    let leaf = format!("template-{}", env!("CARGO_PKG_VERSION"));
    directories::ProjectDirs::from("dev", "sprout", "sprout")
        .map(|d| d.cache_dir().join(&leaf))
        .unwrap_or_else(|| std::env::temp_dir().join(format!("sprout-{leaf}")))
}

/// Unpack the embedded files under `dir` unless a finished copy is there.
pub fn unpack(dir: &Path) -> io::Result<PathBuf> {
    if dir.join(MARKER).is_file() {
        debug!(dir = %dir.display(), "Template bundle already unpacked");
        return Ok(dir.to_path_buf());
    }

    for (relative, content) in FILES {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
    }
    fs::write(dir.join(MARKER), env!("CARGO_PKG_VERSION"))?;

    debug!(dir = %dir.display(), files = FILES.len(), "Template bundle unpacked");
    Ok(dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn files_on_disk(root: &Path, dir: &Path, out: &mut Vec<String>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                files_on_disk(root, &path, out);
            } else {
                let rel = path.strip_prefix(root).unwrap();
                out.push(rel.to_string_lossy().replace('\\', "/"));
            }
        }
    }

    #[test]
    fn every_template_file_is_embedded() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("template");
        let mut on_disk = Vec::new();
        files_on_disk(&root, &root, &mut on_disk);
        on_disk.sort();

        let mut embedded: Vec<String> = FILES.iter().map(|(p, _)| p.to_string()).collect();
        embedded.sort();

        assert_eq!(embedded, on_disk);
    }

    #[test]
    fn unpack_writes_every_file() {
        let dir = TempDir::new().unwrap();
        let root = unpack(&dir.path().join("bundle")).unwrap();

        for (relative, content) in FILES {
            assert_eq!(fs::read_to_string(root.join(relative)).unwrap(), *content);
        }
        assert!(root.join("src/components/App.jsx").is_file());
    }

    #[test]
    fn finished_bundle_is_reused() {
        let dir = TempDir::new().unwrap();
        let root = unpack(dir.path()).unwrap();
        fs::write(root.join("README.md"), "edited").unwrap();

        unpack(dir.path()).unwrap();
        assert_eq!(fs::read_to_string(root.join("README.md")).unwrap(), "edited");
    }

    #[test]
    fn interrupted_unpack_is_completed() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();

        unpack(dir.path()).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("package.json")).unwrap(),
            FILES[0].1
        );
        assert!(dir.path().join(MARKER).is_file());
    }

    #[test]
    fn default_dir_is_versioned() {
        let dir = default_dir();
        assert!(
            dir.to_string_lossy()
                .ends_with(&format!("template-{}", env!("CARGO_PKG_VERSION")))
        );
    }
}
