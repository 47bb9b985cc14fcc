//! Folder capability: list PDF entries and rename within one directory.
//!
//! The processor only touches the target folder through [`Folder`], so the
//! rename step can be exercised against a folder that fails on demand.

use crate::error::{FileError, RenamerError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Operations the processor needs from the target folder.
///
/// `rename` must be a single atomic move within the folder; implementations
/// never fall back to copy + delete.
pub trait Folder: Send + Sync {
    /// Directory this folder operates on.
    fn path(&self) -> &Path;

    /// Names of the immediate regular files ending in `.pdf`
    /// (case-insensitive), sorted.
    fn list_pdfs(&self) -> Result<Vec<String>, RenamerError>;

    /// Whether an entry with exactly this name exists.
    fn contains(&self, name: &str) -> bool;

    /// Move `from` to `to`, refusing to overwrite an existing entry.
    fn rename(&self, from: &str, to: &str) -> Result<(), FileError>;
}

/// A directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalFolder {
    path: PathBuf,
}

impl LocalFolder {
    /// Open `path`, which must be an existing directory.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RenamerError> {
        let path = path.into();
        if !path.is_dir() {
            return Err(RenamerError::NotADirectory { path });
        }
        Ok(Self { path })
    }
}

impl Folder for LocalFolder {
    fn path(&self) -> &Path {
        &self.path
    }

    fn list_pdfs(&self) -> Result<Vec<String>, RenamerError> {
        let entries = std::fs::read_dir(&self.path).map_err(|e| RenamerError::ListFailed {
            path: self.path.clone(),
            source: e,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| RenamerError::ListFailed {
                path: self.path.clone(),
                source: e,
            })?;
            let Ok(name) = entry.file_name().into_string() else {
                debug!("Skipping non-UTF-8 entry {:?}", entry.file_name());
                continue;
            };
            if !is_pdf_name(&name) {
                continue;
            }
            // file_type() does not follow symlinks; metadata() does.
            if entry.path().metadata().map(|m| m.is_file()).unwrap_or(false) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    fn contains(&self, name: &str) -> bool {
        // A dangling symlink still occupies the name.
        std::fs::symlink_metadata(self.path.join(name)).is_ok()
    }

    fn rename(&self, from: &str, to: &str) -> Result<(), FileError> {
        // std::fs::rename replaces an existing target on Unix.
        if self.contains(to) {
            return Err(FileError::RenameConflict {
                name: to.to_string(),
            });
        }
        std::fs::rename(self.path.join(from), self.path.join(to)).map_err(|e| {
            FileError::RenameFailed {
                from: from.to_string(),
                to: to.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

/// Case-insensitive `.pdf` suffix check.
pub fn is_pdf_name(name: &str) -> bool {
    name.len() > 4
        && name
            .get(name.len() - 4..)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(".pdf"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn pdf_suffix_is_case_insensitive() {
        assert!(is_pdf_name("a.pdf"));
        assert!(is_pdf_name("扫描件.PDF"));
        assert!(!is_pdf_name(".pdf"));
        assert!(!is_pdf_name("notes.txt"));
        assert!(!is_pdf_name("pdf"));
    }

    #[test]
    fn open_rejects_missing_dir() {
        let err = LocalFolder::open("/definitely/not/here").unwrap_err();
        assert!(matches!(err, RenamerError::NotADirectory { .. }));
    }

    #[test]
    fn lists_only_immediate_pdf_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.pdf"), b"%PDF").unwrap();
        std::fs::write(dir.path().join("A.PDF"), b"%PDF").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("nested.pdf")).unwrap();
        std::fs::write(dir.path().join("nested.pdf").join("inner.pdf"), b"%PDF").unwrap();

        let folder = LocalFolder::open(dir.path()).unwrap();
        assert_eq!(folder.list_pdfs().unwrap(), vec!["A.PDF", "b.pdf"]);
    }

    #[test]
    fn rename_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.pdf"), b"one").unwrap();
        std::fs::write(dir.path().join("b.pdf"), b"two").unwrap();

        let folder = LocalFolder::open(dir.path()).unwrap();
        let err = folder.rename("a.pdf", "b.pdf").unwrap_err();
        assert!(matches!(err, FileError::RenameConflict { .. }));
        assert_eq!(std::fs::read(dir.path().join("b.pdf")).unwrap(), b"two");
        assert!(dir.path().join("a.pdf").exists());
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_counts_as_taken() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.pdf"), b"one").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.pdf"), dir.path().join("X.pdf"))
            .unwrap();

        let folder = LocalFolder::open(dir.path()).unwrap();
        assert!(folder.contains("X.pdf"));
        let err = folder.rename("a.pdf", "X.pdf").unwrap_err();
        assert!(matches!(err, FileError::RenameConflict { .. }));
        assert!(dir.path().join("a.pdf").exists());
        assert!(std::fs::symlink_metadata(dir.path().join("X.pdf"))
            .unwrap()
            .file_type()
            .is_symlink());
    }

    #[test]
    fn rename_moves_within_folder() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("scan001.pdf"), b"%PDF").unwrap();

        let folder = LocalFolder::open(dir.path()).unwrap();
        folder.rename("scan001.pdf", "合同.pdf").unwrap();
        assert!(!dir.path().join("scan001.pdf").exists());
        assert!(dir.path().join("合同.pdf").exists());
    }
}
