//! First-page text extraction with the OCR fallback branch.
//!
//! The embedded text layer is tried first. Only when it is blank is page one
//! rasterised and OCR'd; an OCR failure of any kind degrades to empty text so
//! the caller sees "no content" rather than an error.

use crate::error::FileError;
use crate::output::{PageContent, TextSource};
use crate::pipeline::ocr::{ocr_first_page, OcrEngine};
use image::DynamicImage;
use std::path::Path;
use tracing::{debug, info, warn};

/// Read access to page one of a PDF.
///
/// Each call opens and closes the document; implementations keep no handle
/// between calls.
pub trait PageReader: Send + Sync {
    /// Embedded text of page one, empty when there is no text layer.
    /// `None` when the document has no pages at all.
    ///
    /// Fails with [`FileError::DocumentUnreadable`] for corrupt or
    /// unsupported files.
    fn first_page_text(&self, path: &Path) -> Result<Option<String>, FileError>;

    /// Rasterise page one at `scale`× its native size.
    fn render_first_page(&self, path: &Path, scale: f32) -> Result<DynamicImage, FileError>;
}

/// Settings the OCR branch needs.
#[derive(Debug, Clone, Copy)]
pub struct OcrSettings<'a> {
    pub scratch_dir: &'a Path,
    pub language: &'a str,
}

/// Extract page-one text, falling back to OCR when the text layer is blank.
///
/// Only [`FileError::DocumentUnreadable`] from the text layer is returned as
/// an error; every OCR problem yields an empty [`PageContent`].
pub fn extract_page_content(
    reader: &dyn PageReader,
    ocr: &dyn OcrEngine,
    path: &Path,
    settings: OcrSettings<'_>,
) -> Result<PageContent, FileError> {
    let Some(text) = reader.first_page_text(path)? else {
        debug!("{}: no pages, nothing to OCR", path.display());
        return Ok(PageContent::empty());
    };
    if !text.trim().is_empty() {
        debug!("{}: using embedded text", path.display());
        return Ok(PageContent {
            text: text.trim().to_string(),
            source: TextSource::Embedded,
        });
    }

    info!("{} may be an image PDF, trying OCR", path.display());
    match ocr_first_page(reader, ocr, path, settings.scratch_dir, settings.language) {
        Ok(text) if !text.is_empty() => Ok(PageContent {
            text,
            source: TextSource::Ocr,
        }),
        Ok(_) => {
            debug!("{}: OCR found no text", path.display());
            Ok(PageContent::empty())
        }
        Err(e) => {
            warn!("{}: OCR fallback failed: {}", path.display(), e);
            Ok(PageContent::empty())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct StubReader {
        text: Result<Option<String>, FileError>,
        renders: AtomicUsize,
    }

    impl StubReader {
        fn new(text: Result<String, FileError>) -> Self {
            Self {
                text: text.map(Some),
                renders: AtomicUsize::new(0),
            }
        }
    }

    impl PageReader for StubReader {
        fn first_page_text(&self, _path: &Path) -> Result<Option<String>, FileError> {
            self.text.clone()
        }

        fn render_first_page(&self, _path: &Path, _scale: f32) -> Result<DynamicImage, FileError> {
            self.renders.fetch_add(1, Ordering::SeqCst);
            Ok(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
                4,
                4,
                Rgba([0, 0, 0, 255]),
            )))
        }
    }

    struct StubOcr(Result<String, FileError>);

    impl OcrEngine for StubOcr {
        fn extract(&self, _image: &Path, _language: &str) -> Result<String, FileError> {
            self.0.clone()
        }
    }

    fn settings(dir: &TempDir) -> OcrSettings<'_> {
        OcrSettings {
            scratch_dir: dir.path(),
            language: "chi_sim",
        }
    }

    #[test]
    fn embedded_text_skips_ocr() {
        let dir = TempDir::new().unwrap();
        let reader = StubReader::new(Ok("\n  采购合同\n第二行".into()));
        let content = extract_page_content(
            &reader,
            &StubOcr(Ok("unused".into())),
            Path::new("a.pdf"),
            settings(&dir),
        )
        .unwrap();

        assert_eq!(content.source, TextSource::Embedded);
        assert_eq!(content.text, "采购合同\n第二行");
        assert_eq!(reader.renders.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn blank_text_uses_ocr() {
        let dir = TempDir::new().unwrap();
        let reader = StubReader::new(Ok(" \n\t".into()));
        let content = extract_page_content(
            &reader,
            &StubOcr(Ok("个体户机读档案".into())),
            Path::new("scan.pdf"),
            settings(&dir),
        )
        .unwrap();

        assert_eq!(content.source, TextSource::Ocr);
        assert_eq!(content.text, "个体户机读档案");
        assert_eq!(reader.renders.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn ocr_unavailable_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let reader = StubReader::new(Ok(String::new()));
        let content = extract_page_content(
            &reader,
            &StubOcr(Err(FileError::OcrUnavailable {
                detail: "missing".into(),
            })),
            Path::new("scan.pdf"),
            settings(&dir),
        )
        .unwrap();

        assert!(content.is_empty());
        assert_eq!(content.source, TextSource::None);
    }

    #[test]
    fn unreadable_document_is_an_error() {
        let dir = TempDir::new().unwrap();
        let reader = StubReader::new(Err(FileError::DocumentUnreadable {
            path: "bad.pdf".into(),
            detail: "xref".into(),
        }));
        let err = extract_page_content(
            &reader,
            &StubOcr(Ok("x".into())),
            Path::new("bad.pdf"),
            settings(&dir),
        )
        .unwrap_err();

        assert!(matches!(err, FileError::DocumentUnreadable { .. }));
    }

    #[test]
    fn zero_page_document_is_empty_without_render() {
        let dir = TempDir::new().unwrap();
        let reader = StubReader {
            text: Ok(None),
            renders: AtomicUsize::new(0),
        };
        let content = extract_page_content(
            &reader,
            &StubOcr(Ok("should not be used".into())),
            Path::new("empty.pdf"),
            settings(&dir),
        )
        .unwrap();

        assert!(content.is_empty());
        assert_eq!(content.source, TextSource::None);
        assert_eq!(reader.renders.load(Ordering::SeqCst), 0);
    }
}
