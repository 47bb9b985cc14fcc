//! One sweep over the target folder: extract → synthesize → sanitize →
//! resolve → rename → ledger.
//!
//! ## Ordering guarantees
//!
//! Files are handled one at a time in name order. The ledger line for a file
//! is written strictly after its rename succeeded, so an interrupted or
//! failed rename leaves no trace and the file is picked up again by the next
//! sweep. Renamed files are excluded from later sweeps through the ledger,
//! which is what makes repeated sweeps idempotent across restarts.
//!
//! ## Why spawn_blocking?
//!
//! pdfium and the tesseract subprocess block. Extraction runs on the blocking
//! pool so the runtime stays responsive to Ctrl-C while a page is being OCR'd.

use crate::config::RenamerConfig;
use crate::error::{FileError, RenamerError};
use crate::folder::{Folder, LocalFolder};
use crate::ledger::Ledger;
use crate::output::{PageContent, RenamedFile, SkippedFile, SweepReport};
use crate::pipeline::collision::{unique_filename, PDF_EXTENSION};
use crate::pipeline::extract::{extract_page_content, OcrSettings, PageReader};
use crate::pipeline::llm::resolve_summarizer;
use crate::pipeline::ocr::{OcrEngine, TesseractCli};
use crate::pipeline::render::PdfiumReader;
use crate::pipeline::synthesize::{FilenameSynthesizer, Summarizer};
use crate::pipeline::{backup, sanitize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Renames the PDFs of one folder.
pub struct FolderProcessor {
    config: RenamerConfig,
    folder: Arc<dyn Folder>,
    reader: Arc<dyn PageReader>,
    ocr: Arc<dyn OcrEngine>,
    synthesizer: FilenameSynthesizer,
}

impl fmt::Debug for FolderProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FolderProcessor")
            .field("folder", &self.folder.path())
            .field("config", &self.config)
            .finish()
    }
}

impl FolderProcessor {
    /// Wire the production backends: pdfium, the tesseract CLI, and the
    /// summarizer selected by `config.summarizer`.
    pub fn from_config(config: RenamerConfig) -> Result<Self, RenamerError> {
        let reader = Arc::new(PdfiumReader::new(config.pdfium_lib_path.clone())?);
        let ocr = Arc::new(TesseractCli::new(config.tesseract_cmd.clone()));
        let summarizer = resolve_summarizer(&config.summarizer)?;
        Self::new(config, reader, ocr, summarizer)
    }

    /// Build a processor over the local folder named in `config`.
    pub fn new(
        config: RenamerConfig,
        reader: Arc<dyn PageReader>,
        ocr: Arc<dyn OcrEngine>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Result<Self, RenamerError> {
        let folder = Arc::new(LocalFolder::open(&config.folder)?);
        Ok(Self::with_folder(config, folder, reader, ocr, summarizer))
    }

    /// Build a processor over an arbitrary [`Folder`].
    pub fn with_folder(
        config: RenamerConfig,
        folder: Arc<dyn Folder>,
        reader: Arc<dyn PageReader>,
        ocr: Arc<dyn OcrEngine>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        let synthesizer =
            FilenameSynthesizer::new(summarizer, config.summarizer.prompt_template.clone());
        Self {
            config,
            folder,
            reader,
            ocr,
            synthesizer,
        }
    }

    pub fn folder(&self) -> &Path {
        self.folder.path()
    }

    /// Unledgered PDFs currently in the folder, in name order.
    pub fn candidates(&self, ledger: &Ledger) -> Result<Vec<String>, RenamerError> {
        Ok(self
            .folder
            .list_pdfs()?
            .into_iter()
            .filter(|name| !ledger.contains(name))
            .collect())
    }

    /// Run one pass over the folder.
    ///
    /// # Errors
    /// Only when the pass cannot start: the ledger is unreadable or the
    /// folder cannot be listed. Per-file failures are logged and returned in
    /// [`SweepReport::skipped`].
    pub async fn sweep(&self) -> Result<SweepReport, RenamerError> {
        let start = Instant::now();
        let ledger_path = self.folder.path().join(&self.config.ledger_file_name);
        let mut ledger = Ledger::load(ledger_path)?;

        let candidates = self.candidates(&ledger)?;
        info!("Found {} unprocessed PDF files", candidates.len());

        let mut report = SweepReport {
            candidates: candidates.len(),
            ..Default::default()
        };

        for file_name in candidates {
            let span = info_span!("file", name = %file_name);
            match self
                .process_file(&mut ledger, &file_name)
                .instrument(span)
                .await
            {
                Ok(renamed) => {
                    info!("Renamed: {} -> {}", renamed.from, renamed.to);
                    report.renamed.push(renamed);
                }
                Err(e) => {
                    if e.is_content_error() {
                        warn!("Keeping original name for {}: {}", file_name, e);
                    } else {
                        error!("Failed to process {}: {}", file_name, e);
                    }
                    report.skipped.push(SkippedFile {
                        file_name,
                        error: e,
                    });
                }
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!("Sweep complete: {}", report);
        Ok(report)
    }

    /// Rename a single file and record it in `ledger`.
    pub async fn process_file(
        &self,
        ledger: &mut Ledger,
        file_name: &str,
    ) -> Result<RenamedFile, FileError> {
        let path = self.folder.path().join(file_name);

        let content = self.extract(&path).await?;
        if content.is_empty() {
            return Err(FileError::NoContentFound { path });
        }

        let candidate = match self.synthesizer.synthesize(&content.text).await {
            Some(c) if !c.is_empty() => c,
            _ => return Err(FileError::NoContentFound { path }),
        };
        debug!("{}: candidate {:?} ({:?})", file_name, candidate.name, candidate.origin);

        let base = sanitize::clean_filename(&candidate.name);
        let new_name = unique_filename(self.folder.as_ref(), &base, PDF_EXTENSION);

        if let Some(ref dir) = self.config.backup_dir {
            backup::backup_file(&path, dir)?;
        }

        self.folder.rename(file_name, &new_name)?;
        ledger.append(&new_name)?;

        Ok(RenamedFile {
            from: file_name.to_string(),
            to: new_name,
            source: content.source,
        })
    }

    async fn extract(&self, path: &Path) -> Result<PageContent, FileError> {
        let reader = Arc::clone(&self.reader);
        let ocr = Arc::clone(&self.ocr);
        let path_buf = path.to_path_buf();
        let scratch_dir = self.config.scratch_dir.clone();
        let language = self.config.ocr_language.clone();

        tokio::task::spawn_blocking(move || {
            extract_page_content(
                reader.as_ref(),
                ocr.as_ref(),
                &path_buf,
                OcrSettings {
                    scratch_dir: &scratch_dir,
                    language: &language,
                },
            )
        })
        .await
        .map_err(|e| FileError::DocumentUnreadable {
            path: path.to_path_buf(),
            detail: format!("extraction task panicked: {e}"),
        })?
    }
}
