//! Optional safety copy of a source file before it is renamed.

use crate::error::FileError;
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Copy `src` into `backup_dir` as `<YYYYmmdd_HHMMSS>_<file name>`.
///
/// The directory is created on demand. Returns the path of the copy.
pub fn backup_file(src: &Path, backup_dir: &Path) -> Result<PathBuf, FileError> {
    let failed = |detail: String| FileError::BackupFailed {
        path: src.to_path_buf(),
        detail,
    };

    let file_name = src
        .file_name()
        .ok_or_else(|| failed("source has no file name".into()))?;

    std::fs::create_dir_all(backup_dir).map_err(|e| failed(e.to_string()))?;

    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let dest = backup_dir.join(format!("{}_{}", stamp, file_name.to_string_lossy()));
    std::fs::copy(src, &dest).map_err(|e| failed(e.to_string()))?;

    debug!("Backed up {} → {}", src.display(), dest.display());
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn copy_is_timestamp_prefixed() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("scan.pdf");
        std::fs::write(&src, b"%PDF-1.7").unwrap();

        let dest = backup_file(&src, &dir.path().join("backups")).unwrap();
        let name = dest.file_name().unwrap().to_string_lossy().to_string();

        assert!(name.ends_with("_scan.pdf"), "got {name}");
        // YYYYmmdd_HHMMSS_
        assert_eq!(name.len(), "20240101_120000_scan.pdf".len());
        assert_eq!(std::fs::read(&dest).unwrap(), b"%PDF-1.7");
        assert!(src.exists());
    }

    #[test]
    fn missing_source_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = backup_file(&dir.path().join("gone.pdf"), dir.path()).unwrap_err();
        assert!(matches!(err, FileError::BackupFailed { .. }));
    }
}
