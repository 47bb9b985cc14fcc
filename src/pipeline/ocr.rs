//! OCR fallback for image-only PDFs.
//!
//! Page one is rendered at [`OCR_RENDER_SCALE`]× native size, written to a
//! uniquely named PNG in the scratch directory, and handed to an
//! [`OcrEngine`]. The PNG is owned by a [`ScratchImage`] guard that deletes
//! it on every exit path, including errors and panics.
//!
//! ## Known gap
//!
//! If the process is killed (SIGKILL, power loss) between rendering and the
//! guard's drop, the PNG stays in the scratch directory. The ledger is not
//! affected because nothing is appended before a rename completes. Stale
//! `ocr_*.png` files can be deleted at any time.

use crate::error::FileError;
use crate::pipeline::extract::PageReader;
use chrono::Utc;
use image::{DynamicImage, ImageFormat};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Upscale applied before OCR. A floor chosen for recognition accuracy, not
/// a per-call knob.
pub const OCR_RENDER_SCALE: f32 = 2.0;

/// Text recognition over an image file.
pub trait OcrEngine: Send + Sync {
    /// Recognise text in `image` using the `language` pack.
    ///
    /// Fails with [`FileError::OcrUnavailable`] when the engine or the
    /// language pack is missing.
    fn extract(&self, image: &Path, language: &str) -> Result<String, FileError>;
}

/// The `tesseract` command-line engine.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    cmd: PathBuf,
}

impl TesseractCli {
    pub fn new(cmd: impl Into<PathBuf>) -> Self {
        Self { cmd: cmd.into() }
    }

    /// Confirm the binary runs and lists `language` among its packs.
    pub fn check_available(&self, language: &str) -> Result<(), FileError> {
        let output = Command::new(&self.cmd)
            .arg("--list-langs")
            .output()
            .map_err(|e| FileError::OcrUnavailable {
                detail: format!("cannot run '{}': {}", self.cmd.display(), e),
            })?;

        // Older releases print the list on stderr.
        let listing = format!(
            "{}\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        if listing.lines().any(|l| l.trim() == language) {
            Ok(())
        } else {
            Err(FileError::OcrUnavailable {
                detail: format!("language pack '{language}' is not installed"),
            })
        }
    }
}

impl OcrEngine for TesseractCli {
    fn extract(&self, image: &Path, language: &str) -> Result<String, FileError> {
        self.check_available(language)?;

        let output = Command::new(&self.cmd)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(language)
            .output()
            .map_err(|e| FileError::OcrUnavailable {
                detail: format!("cannot run '{}': {}", self.cmd.display(), e),
            })?;

        if !output.status.success() {
            return Err(FileError::OcrFailed {
                detail: format!(
                    "tesseract exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// A PNG in the scratch directory that is deleted when the guard goes away.
#[derive(Debug)]
pub struct ScratchImage {
    file: NamedTempFile,
}

impl ScratchImage {
    /// Write `image` to `ocr_<unix-ts>_<random>.png` inside `dir`, creating
    /// the directory if needed.
    pub fn create(dir: &Path, image: &DynamicImage) -> Result<Self, FileError> {
        let failed = |e: String| FileError::OcrFailed {
            detail: format!("scratch image in '{}': {}", dir.display(), e),
        };

        std::fs::create_dir_all(dir).map_err(|e| failed(e.to_string()))?;

        let prefix = format!("ocr_{}_", Utc::now().timestamp());
        let mut file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".png")
            .rand_bytes(10)
            .tempfile_in(dir)
            .map_err(|e| failed(e.to_string()))?;

        image
            .write_to(file.as_file_mut(), ImageFormat::Png)
            .map_err(|e| failed(e.to_string()))?;

        debug!("Scratch image {}", file.path().display());
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Delete now and log a failure instead of dropping it silently.
    pub fn release(self) {
        let path = self.file.path().to_path_buf();
        if let Err(e) = self.file.close() {
            warn!("Could not delete scratch image {}: {}", path.display(), e);
        }
    }
}

/// Render page one of `pdf`, OCR it, and return the trimmed text.
pub fn ocr_first_page(
    reader: &dyn PageReader,
    engine: &dyn OcrEngine,
    pdf: &Path,
    scratch_dir: &Path,
    language: &str,
) -> Result<String, FileError> {
    let image = reader.render_first_page(pdf, OCR_RENDER_SCALE)?;
    let scratch = ScratchImage::create(scratch_dir, &image)?;
    let result = engine.extract(scratch.path(), language);
    scratch.release();
    result.map(|text| text.trim().to_string())
}
