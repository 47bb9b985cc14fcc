//! Pipeline stages for turning a PDF's first page into a file name.
//!
//! Each submodule implements exactly one step, so each is testable alone and
//! the external engines (pdfium, tesseract, the summarization service) sit
//! behind traits.
//!
//! ## Data Flow
//!
//! ```text
//! extract ──▶ (ocr) ──▶ synthesize ──▶ sanitize ──▶ collision ──▶ rename
//! (pdfium)   (2× PNG)   (LLM / 1st line)  (clean)    （n）suffix    (+ backup)
//! ```
//!
//! 1. [`extract`]    — text layer of page one; blank → [`ocr`] fallback
//! 2. [`render`]     — pdfium implementation of the page reader
//! 3. [`ocr`]        — rasterise at 2×, scratch PNG, tesseract
//! 4. [`synthesize`] — remote summarizer with first-line fallback; clients in [`llm`]
//! 5. [`sanitize`]   — strip reserved characters and whitespace, cap length
//! 6. [`collision`]  — first free `base（n）.pdf`
//! 7. [`backup`]     — optional timestamped copy before mutation

pub mod backup;
pub mod collision;
pub mod extract;
pub mod llm;
pub mod ocr;
pub mod render;
pub mod sanitize;
pub mod synthesize;
