//! Result types for a folder sweep.

use crate::error::FileError;
use std::fmt;

/// Where the page text that named a file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    /// The PDF's embedded text layer.
    Embedded,
    /// OCR over the rendered first page.
    Ocr,
    /// Nothing usable was found.
    None,
}

/// Extracted first-page text of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    /// Trimmed text; empty when nothing was found.
    pub text: String,
    pub source: TextSource,
}

impl PageContent {
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            source: TextSource::None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// One completed rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedFile {
    /// Name before the sweep.
    pub from: String,
    /// Resolved name, now recorded in the ledger.
    pub to: String,
    pub source: TextSource,
}

/// A file left under its original name.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub file_name: String,
    pub error: FileError,
}

/// Outcome of one pass over the target folder.
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    /// Number of unledgered PDFs found.
    pub candidates: usize,
    pub renamed: Vec<RenamedFile>,
    pub skipped: Vec<SkippedFile>,
    pub duration_ms: u64,
}

impl SweepReport {
    /// True when the sweep touched nothing.
    pub fn is_idle(&self) -> bool {
        self.renamed.is_empty()
    }
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} candidates, {} renamed, {} skipped in {}ms",
            self.candidates,
            self.renamed.len(),
            self.skipped.len(),
            self.duration_ms
        )
    }
}
