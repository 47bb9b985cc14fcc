//! Error types for the edgequake-pdf-renamer library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`RenamerError`] — **Fatal**: the sweep cannot proceed at all
//!   (target folder missing, ledger unreadable, pdfium not loadable).
//!   Returned as `Err(RenamerError)` from constructors and from
//!   [`crate::processor::FolderProcessor::sweep`].
//!
//! * [`FileError`] — **Non-fatal**: a single file could not be renamed
//!   (corrupt PDF, no text, rename raced with another writer). Stored inside
//!   [`crate::output::SweepReport`]; the file keeps its original name and is
//!   picked up again on the next sweep because it was never ledgered.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the edgequake-pdf-renamer library.
///
/// Per-file failures use [`FileError`] and are collected in
/// [`crate::output::SweepReport`] rather than propagated here.
#[derive(Debug, Error)]
pub enum RenamerError {
    // ── Folder errors ─────────────────────────────────────────────────────
    /// The target path does not exist or is not a directory.
    #[error("'{path}' is not a valid folder path")]
    NotADirectory { path: PathBuf },

    /// The folder exists but its entries could not be listed.
    #[error("Failed to list folder '{path}': {source}")]
    ListFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The ledger file exists but could not be read.
    #[error("Failed to read ledger '{path}': {source}")]
    LedgerUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Backend errors ────────────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\
Set PDFIUM_LIB_PATH=/path/to/dir-containing-libpdfium or install pdfium system-wide."
    )]
    PdfiumBindingFailed(String),

    /// The configured LLM provider could not be created (missing API key etc.).
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single file.
///
/// Every variant leaves the file under its original name and writes no
/// ledger entry, so the next sweep retries it.
#[derive(Debug, Clone, Error)]
pub enum FileError {
    /// The PDF could not be opened or parsed.
    #[error("'{path}' is unreadable: {detail}")]
    DocumentUnreadable { path: PathBuf, detail: String },

    /// The OCR engine or its language pack is missing.
    #[error("OCR unavailable: {detail}")]
    OcrUnavailable { detail: String },

    /// The OCR engine ran but did not produce a result.
    #[error("OCR failed: {detail}")]
    OcrFailed { detail: String },

    /// The summarization call failed (network, auth, malformed body).
    #[error("Summarization request failed: {detail}")]
    RequestError { detail: String },

    /// Neither the text layer nor OCR produced anything usable.
    #[error("No content found in '{path}'")]
    NoContentFound { path: PathBuf },

    /// The resolved name was taken between collision resolution and rename.
    #[error("Target name '{name}' is already occupied")]
    RenameConflict { name: String },

    /// The filesystem refused the rename.
    #[error("Failed to rename '{from}' to '{to}': {detail}")]
    RenameFailed {
        from: String,
        to: String,
        detail: String,
    },

    /// The safety copy could not be written; the file is left untouched.
    #[error("Failed to back up '{path}': {detail}")]
    BackupFailed { path: PathBuf, detail: String },

    /// The rename succeeded but the ledger line could not be appended.
    #[error("Renamed to '{name}' but the ledger append failed: {detail}")]
    LedgerAppendFailed { name: String, detail: String },
}

impl FileError {
    /// Whether the file content itself is the problem, as opposed to a
    /// transient condition in the folder or an external service.
    pub fn is_content_error(&self) -> bool {
        matches!(
            self,
            FileError::DocumentUnreadable { .. } | FileError::NoContentFound { .. }
        )
    }
}
