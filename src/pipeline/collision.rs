//! Collision resolution: pick the first free `base（n）ext` in the folder.
//!
//! Numbering is deterministic and human-readable rather than random. The
//! check-then-rename window is only safe with a single writer per folder;
//! [`crate::folder::Folder::rename`] reports the race as
//! [`crate::error::FileError::RenameConflict`] if it happens anyway.

use crate::folder::Folder;

/// Extension given to every renamed document.
pub const PDF_EXTENSION: &str = ".pdf";

/// Return `base + ext`, or `base（n）+ ext` for the smallest `n ≥ 1` that
/// is absent from `folder`.
pub fn unique_filename(folder: &dyn Folder, base: &str, ext: &str) -> String {
    let mut candidate = format!("{base}{ext}");
    let mut counter: u32 = 0;
    while folder.contains(&candidate) {
        counter += 1;
        candidate = format!("{base}（{counter}）{ext}");
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folder::LocalFolder;
    use tempfile::TempDir;

    fn folder_with(names: &[&str]) -> (TempDir, LocalFolder) {
        let dir = TempDir::new().unwrap();
        for n in names {
            std::fs::write(dir.path().join(n), b"%PDF").unwrap();
        }
        let folder = LocalFolder::open(dir.path()).unwrap();
        (dir, folder)
    }

    #[test]
    fn free_name_has_no_suffix() {
        let (_dir, folder) = folder_with(&[]);
        assert_eq!(unique_filename(&folder, "A", PDF_EXTENSION), "A.pdf");
    }

    #[test]
    fn skips_taken_suffixes() {
        let (_dir, folder) = folder_with(&["A.pdf", "A（1）.pdf"]);
        assert_eq!(unique_filename(&folder, "A", PDF_EXTENSION), "A（2）.pdf");
    }

    #[test]
    fn gap_in_numbering_is_reused() {
        let (_dir, folder) = folder_with(&["A.pdf", "A（2）.pdf"]);
        assert_eq!(unique_filename(&folder, "A", PDF_EXTENSION), "A（1）.pdf");
    }
}
