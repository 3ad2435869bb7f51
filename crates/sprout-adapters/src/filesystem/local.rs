//! Local filesystem adapter using std::fs.

use std::fs;
use std::io;
use std::path::Path;

use tracing::trace;
use walkdir::WalkDir;

use sprout_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{SproutError, SproutResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> SproutResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn remove_dir_all(&self, path: &Path) -> SproutResult<()> {
        match fs::remove_dir_all(path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => {
                Err(map_io_error(path, e, "remove directory"))
            }
            _ => Ok(()),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_empty_dir(&self, path: &Path) -> SproutResult<bool> {
        if !path.is_dir() {
            return Ok(false);
        }
        let mut entries =
            fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;
        Ok(entries.next().is_none())
    }

    fn read_to_string(&self, path: &Path) -> SproutResult<String> {
        fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> SproutResult<()> {
        fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> SproutResult<()> {
        if let Some(parent) = to.parent() {
            self.create_dir_all(parent)?;
        }
        fs::copy(from, to).map_err(|e| map_io_error(from, e, "copy file"))?;
        trace!(from = %from.display(), to = %to.display(), "Copied file");
        Ok(())
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> SproutResult<()> {
        for entry in WalkDir::new(from).follow_links(true) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(from).to_path_buf();
                SproutError::from(ApplicationError::FilesystemError {
                    path,
                    reason: format!("Failed to walk template tree: {e}"),
                })
            })?;

            let relative = entry
                .path()
                .strip_prefix(from)
                .map_err(|_| SproutError::Internal {
                    message: format!(
                        "walked path {} escaped {}",
                        entry.path().display(),
                        from.display()
                    ),
                })?;
            let target = to.join(relative);

            if entry.file_type().is_dir() {
                self.create_dir_all(&target)?;
            } else {
                fs::copy(entry.path(), &target)
                    .map_err(|e| map_io_error(entry.path(), e, "copy file"))?;
            }
        }
        trace!(from = %from.display(), to = %to.display(), "Copied tree");
        Ok(())
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> SproutError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("template/src");
        fs::create_dir_all(src.join("components")).unwrap();
        fs::create_dir_all(src.join("assets")).unwrap();
        fs::write(src.join("index.jsx"), "index").unwrap();
        fs::write(src.join("components/App.jsx"), "app").unwrap();
        fs::write(dir.path().join("template/gitignore"), "node_modules\n").unwrap();
        dir
    }

    #[test]
    fn copy_tree_mirrors_nested_layout() {
        let dir = fixture();
        let fs_ = LocalFilesystem::new();
        let dest = dir.path().join("app/src");

        fs_.copy_tree(&dir.path().join("template/src"), &dest).unwrap();

        assert_eq!(fs::read_to_string(dest.join("index.jsx")).unwrap(), "index");
        assert_eq!(
            fs::read_to_string(dest.join("components/App.jsx")).unwrap(),
            "app"
        );
        assert!(dest.join("assets").is_dir());
    }

    #[test]
    fn copy_tree_overwrites_existing_files() {
        let dir = fixture();
        let fs_ = LocalFilesystem::new();
        let dest = dir.path().join("app/src");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("index.jsx"), "stale").unwrap();

        fs_.copy_tree(&dir.path().join("template/src"), &dest).unwrap();
        assert_eq!(fs::read_to_string(dest.join("index.jsx")).unwrap(), "index");
    }

    #[test]
    fn copy_file_creates_parent_and_renames() {
        let dir = fixture();
        let fs_ = LocalFilesystem::new();
        let to = dir.path().join("fresh/.gitignore");

        fs_.copy_file(&dir.path().join("template/gitignore"), &to).unwrap();
        assert_eq!(fs::read_to_string(to).unwrap(), "node_modules\n");
    }

    #[test]
    fn missing_source_is_a_filesystem_error() {
        let dir = TempDir::new().unwrap();
        let fs_ = LocalFilesystem::new();
        let err = fs_
            .copy_file(&dir.path().join("nope"), &dir.path().join("out"))
            .unwrap_err();
        assert!(matches!(
            err,
            SproutError::Application(ApplicationError::FilesystemError { .. })
        ));
        assert!(fs_.copy_tree(&dir.path().join("nope"), &dir.path().join("out")).is_err());
    }

    #[test]
    fn remove_dir_all_ignores_missing_directories() {
        let dir = TempDir::new().unwrap();
        let fs_ = LocalFilesystem::new();
        assert!(fs_.remove_dir_all(&dir.path().join("never-created")).is_ok());
    }

    #[test]
    fn empty_dir_detection() {
        let dir = fixture();
        let fs_ = LocalFilesystem::new();
        let empty = dir.path().join("empty");
        fs::create_dir(&empty).unwrap();

        assert!(fs_.is_empty_dir(&empty).unwrap());
        assert!(!fs_.is_empty_dir(&dir.path().join("template")).unwrap());
        assert!(!fs_.is_empty_dir(&dir.path().join("template/gitignore")).unwrap());
    }
}
