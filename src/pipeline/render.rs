//! pdfium-backed [`PageReader`]: first-page text layer and rasterisation.
//!
//! ## Why bind per call?
//!
//! Each call opens and closes its own document handle so no PDF stays open
//! between processing steps; the bound library is cheap to re-acquire once
//! loaded. Construction binds once up front so a missing pdfium is a fatal
//! startup error instead of one `DocumentUnreadable` per file.

use crate::error::{FileError, RenamerError};
use crate::pipeline::extract::PageReader;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads PDFs through the pdfium library.
#[derive(Debug, Clone)]
pub struct PdfiumReader {
    lib_dir: Option<PathBuf>,
}

impl PdfiumReader {
    /// Bind pdfium from `lib_dir`, or from the working directory and then the
    /// system library search path when `None`.
    pub fn new(lib_dir: Option<PathBuf>) -> Result<Self, RenamerError> {
        let reader = Self { lib_dir };
        reader.bind()?;
        Ok(reader)
    }

    fn bind(&self) -> Result<Pdfium, RenamerError> {
        let bindings = match &self.lib_dir {
            Some(dir) => {
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
            }
            None => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                .or_else(|_| Pdfium::bind_to_system_library()),
        }
        .map_err(|e| RenamerError::PdfiumBindingFailed(format!("{:?}", e)))?;

        Ok(Pdfium::new(bindings))
    }

    fn open<'a>(&self, pdfium: &'a Pdfium, path: &Path) -> Result<PdfDocument<'a>, FileError> {
        pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| unreadable(path, format!("{:?}", e)))
    }
}

impl PageReader for PdfiumReader {
    fn first_page_text(&self, path: &Path) -> Result<Option<String>, FileError> {
        let pdfium = self.bind().map_err(|e| unreadable(path, e.to_string()))?;
        let document = self.open(&pdfium, path)?;
        let pages = document.pages();

        if pages.len() == 0 {
            warn!("PDF {} has no pages", path.display());
            return Ok(None);
        }

        let page = pages
            .get(0)
            .map_err(|e| unreadable(path, format!("{:?}", e)))?;
        let text = page
            .text()
            .map_err(|e| unreadable(path, format!("{:?}", e)))?
            .all();

        debug!("{}: {} chars in text layer", path.display(), text.chars().count());
        Ok(Some(text))
    }

    fn render_first_page(&self, path: &Path, scale: f32) -> Result<DynamicImage, FileError> {
        let pdfium = self.bind().map_err(|e| unreadable(path, e.to_string()))?;
        let document = self.open(&pdfium, path)?;
        let pages = document.pages();

        if pages.len() == 0 {
            return Err(unreadable(path, "document has no pages".into()));
        }

        let page = pages
            .get(0)
            .map_err(|e| unreadable(path, format!("{:?}", e)))?;
        let render_config = PdfRenderConfig::new().scale_page_by_factor(scale);
        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|e| unreadable(path, format!("rasterisation failed: {:?}", e)))?;

        let image = bitmap.as_image();
        debug!(
            "Rendered {} page 1 at {}x → {}x{} px",
            path.display(),
            scale,
            image.width(),
            image.height()
        );
        Ok(image)
    }
}

fn unreadable(path: &Path, detail: String) -> FileError {
    FileError::DocumentUnreadable {
        path: path.to_path_buf(),
        detail,
    }
}
