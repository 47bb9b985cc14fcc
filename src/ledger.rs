//! Append-only record of names this tool has produced in a folder.
//!
//! ## Format
//!
//! Plain UTF-8, one file name per line, no header, no escaping. Lines are
//! only ever appended, and only after the rename they record has completed,
//! so a name is in the ledger iff a rename to it finished. Sanitized names
//! never contain whitespace, which keeps the line format unambiguous.

use crate::error::{FileError, RenamerError};
use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// In-memory view of a folder's ledger plus its backing file.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    entries: HashSet<String>,
}

impl Ledger {
    /// Read the ledger at `path`. A missing file is an empty ledger.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, RenamerError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(body) => body
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashSet::new(),
            Err(e) => return Err(RenamerError::LedgerUnreadable { path, source: e }),
        };
        debug!("Ledger {}: {} entries", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append `name` as a new line and remember it.
    pub fn append(&mut self, name: &str) -> Result<(), FileError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| FileError::LedgerAppendFailed {
                name: name.to_string(),
                detail: e.to_string(),
            })?;
        writeln!(file, "{name}").map_err(|e| FileError::LedgerAppendFailed {
            name: name.to_string(),
            detail: e.to_string(),
        })?;
        self.entries.insert(name.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let ledger = Ledger::load(dir.path().join("更名存档.txt")).unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn append_survives_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("更名存档.txt");

        let mut ledger = Ledger::load(&path).unwrap();
        ledger.append("合同.pdf").unwrap();
        ledger.append("合同（1）.pdf").unwrap();
        assert!(ledger.contains("合同.pdf"));

        let reloaded = Ledger::load(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains("合同（1）.pdf"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "合同.pdf\n合同（1）.pdf\n"
        );
    }

    #[test]
    fn load_ignores_blank_lines_and_crlf() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.txt");
        std::fs::write(&path, "a.pdf\r\n\r\nb.pdf\n").unwrap();

        let ledger = Ledger::load(&path).unwrap();
        assert_eq!(ledger.len(), 2);
        assert!(ledger.contains("a.pdf"));
        assert!(ledger.contains("b.pdf"));
    }

    #[test]
    fn append_never_rewrites_existing_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.txt");
        std::fs::write(&path, "old.pdf\n").unwrap();

        let mut ledger = Ledger::load(&path).unwrap();
        ledger.append("new.pdf").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old.pdf\nnew.pdf\n");
    }
}
