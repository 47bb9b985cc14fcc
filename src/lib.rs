//! # edgequake-pdf-renamer
//!
//! Give scanned and exported PDFs human-meaningful names derived from their
//! first page.
//!
//! ## Pipeline Overview
//!
//! ```text
//! folder sweep
//!  │
//!  ├─ 1. Select   immediate *.pdf entries not yet in the ledger
//!  ├─ 2. Extract  page-one text layer via pdfium
//!  ├─ 3. OCR      blank text → render at 2× → tesseract (scratch PNG, always deleted)
//!  ├─ 4. Name     LLM summarizer; on failure the first non-blank line
//!  ├─ 5. Clean    strip \ / * ? : " < > | and whitespace, cap at 100 chars
//!  ├─ 6. Resolve  base.pdf, base（1）.pdf, base（2）.pdf, …
//!  └─ 7. Commit   atomic rename, then append the new name to the ledger
//! ```
//!
//! A file that fails at any step keeps its name and gets no ledger entry,
//! so the next sweep tries it again. A failing file never stops the sweep.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgequake_pdf_renamer::{FolderProcessor, RenamerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RenamerConfig::builder().folder("/srv/scans").build()?;
//!     let processor = FolderProcessor::from_config(config)?;
//!     let report = processor.sweep().await?;
//!     println!("{report}");
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf-renamer` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod folder;
pub mod ledger;
pub mod output;
pub mod pipeline;
pub mod processor;
pub mod prompts;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{RenamerConfig, RenamerConfigBuilder, SummarizerConfig};
pub use error::{FileError, RenamerError};
pub use folder::{Folder, LocalFolder};
pub use ledger::Ledger;
pub use output::{PageContent, RenamedFile, SkippedFile, SweepReport, TextSource};
pub use pipeline::extract::PageReader;
pub use pipeline::ocr::{OcrEngine, TesseractCli};
pub use pipeline::render::PdfiumReader;
pub use pipeline::synthesize::{CandidateName, FilenameSynthesizer, NameOrigin, Summarizer};
pub use processor::FolderProcessor;
