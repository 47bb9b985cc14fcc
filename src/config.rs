//! Configuration types for the PDF renamer.
//!
//! All renaming behaviour is controlled through [`RenamerConfig`], built via
//! its [`RenamerConfigBuilder`] or read from the environment with
//! [`RenamerConfig::from_env`]. The summarization endpoint, key and prompt
//! live in [`SummarizerConfig`] and are handed to the synthesizer at
//! construction instead of being read from globals.

use crate::error::RenamerError;
use std::fmt;
use std::path::PathBuf;

/// Default target folder when no path is given on the command line.
pub const DEFAULT_FOLDER: &str = "共享文件";

/// Default ledger file name, created inside the target folder.
pub const DEFAULT_LEDGER_FILE: &str = "更名存档.txt";

/// Default chat-completions endpoint of the summarization service.
pub const DEFAULT_ENDPOINT: &str = "https://api.deepseek.com/v1/chat/completions";

/// Default model requested from the summarization service.
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Configuration for the folder processor.
///
/// # Example
/// ```rust
/// use edgequake_pdf_renamer::RenamerConfig;
///
/// let config = RenamerConfig::builder()
///     .folder("/srv/scans")
///     .ocr_language("eng")
///     .poll_interval_secs(30)
///     .build()
///     .unwrap();
/// assert_eq!(config.ocr_language, "eng");
/// ```
#[derive(Clone)]
pub struct RenamerConfig {
    /// Folder whose immediate `*.pdf` entries are renamed. Default: `共享文件`.
    pub folder: PathBuf,

    /// Ledger file name inside [`Self::folder`]. Default: `更名存档.txt`.
    pub ledger_file_name: String,

    /// Tesseract language pack used by the OCR fallback. Default: `chi_sim`.
    pub ocr_language: String,

    /// Tesseract executable. Default: `tesseract` (resolved via `PATH`).
    pub tesseract_cmd: PathBuf,

    /// Directory for transient OCR raster files, created on demand. Default: `temp`.
    pub scratch_dir: PathBuf,

    /// When set, each file is copied here before it is renamed. Default: None.
    pub backup_dir: Option<PathBuf>,

    /// Directory containing the pdfium shared library. None = system library.
    pub pdfium_lib_path: Option<PathBuf>,

    /// Idle time between two sweeps in seconds. Default: 10.
    pub poll_interval_secs: u64,

    /// Directory for the binary's log files. Default: `logs`.
    pub log_dir: PathBuf,

    /// Remote summarization settings.
    pub summarizer: SummarizerConfig,
}

impl Default for RenamerConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from(DEFAULT_FOLDER),
            ledger_file_name: DEFAULT_LEDGER_FILE.to_string(),
            ocr_language: "chi_sim".to_string(),
            tesseract_cmd: PathBuf::from("tesseract"),
            scratch_dir: PathBuf::from("temp"),
            backup_dir: None,
            pdfium_lib_path: None,
            poll_interval_secs: 10,
            log_dir: PathBuf::from("logs"),
            summarizer: SummarizerConfig::default(),
        }
    }
}

impl fmt::Debug for RenamerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenamerConfig")
            .field("folder", &self.folder)
            .field("ledger_file_name", &self.ledger_file_name)
            .field("ocr_language", &self.ocr_language)
            .field("tesseract_cmd", &self.tesseract_cmd)
            .field("scratch_dir", &self.scratch_dir)
            .field("backup_dir", &self.backup_dir)
            .field("pdfium_lib_path", &self.pdfium_lib_path)
            .field("poll_interval_secs", &self.poll_interval_secs)
            .field("summarizer", &self.summarizer)
            .finish()
    }
}

impl RenamerConfig {
    /// Create a new builder for `RenamerConfig`.
    pub fn builder() -> RenamerConfigBuilder {
        RenamerConfigBuilder {
            config: Self::default(),
        }
    }

    /// Full path of the ledger file.
    pub fn ledger_path(&self) -> PathBuf {
        self.folder.join(&self.ledger_file_name)
    }

    /// Read the configuration from `PDF_RENAMER_*` environment variables.
    ///
    /// Unset or empty variables keep their defaults. Numeric variables that
    /// fail to parse are reported as [`RenamerError::InvalidConfig`].
    pub fn from_env() -> Result<Self, RenamerError> {
        let mut builder = Self::builder();

        if let Some(v) = env_var("PDF_RENAMER_FOLDER") {
            builder = builder.folder(v);
        }
        if let Some(v) = env_var("PDF_RENAMER_LEDGER") {
            builder = builder.ledger_file_name(v);
        }
        if let Some(v) = env_var("PDF_RENAMER_OCR_LANG") {
            builder = builder.ocr_language(v);
        }
        if let Some(v) = env_var("PDF_RENAMER_TESSERACT") {
            builder = builder.tesseract_cmd(v);
        }
        if let Some(v) = env_var("PDF_RENAMER_SCRATCH_DIR") {
            builder = builder.scratch_dir(v);
        }
        if let Some(v) = env_var("PDF_RENAMER_BACKUP_DIR") {
            builder = builder.backup_dir(v);
        }
        if let Some(v) = env_var("PDFIUM_LIB_PATH") {
            builder = builder.pdfium_lib_path(v);
        }
        if let Some(v) = env_var("PDF_RENAMER_INTERVAL_SECS") {
            builder = builder.poll_interval_secs(parse_env("PDF_RENAMER_INTERVAL_SECS", &v)?);
        }
        if let Some(v) = env_var("PDF_RENAMER_LOG_DIR") {
            builder = builder.log_dir(v);
        }

        let mut summarizer = SummarizerConfig::default();
        summarizer.api_key = env_var("PDF_RENAMER_API_KEY").or_else(|| env_var("DEEPSEEK_API_KEY"));
        if let Some(v) = env_var("PDF_RENAMER_ENDPOINT") {
            summarizer.endpoint = v;
        }
        if let Some(v) = env_var("PDF_RENAMER_MODEL") {
            summarizer.model = Some(v);
        }
        if let Some(v) = env_var("PDF_RENAMER_TEMPERATURE") {
            let t: f32 = parse_env("PDF_RENAMER_TEMPERATURE", &v)?;
            summarizer.temperature = t.clamp(0.0, 2.0);
        }
        if let Some(v) = env_var("PDF_RENAMER_API_TIMEOUT") {
            summarizer.timeout_secs = parse_env("PDF_RENAMER_API_TIMEOUT", &v)?;
        }
        summarizer.provider_name = env_var("PDF_RENAMER_PROVIDER");
        if let Some(path) = env_var("PDF_RENAMER_PROMPT_FILE") {
            let template = std::fs::read_to_string(&path).map_err(|e| {
                RenamerError::InvalidConfig(format!("cannot read prompt file '{path}': {e}"))
            })?;
            summarizer.prompt_template = Some(template);
        }

        builder.summarizer(summarizer).build()
    }
}

/// Builder for [`RenamerConfig`].
#[derive(Debug)]
pub struct RenamerConfigBuilder {
    config: RenamerConfig,
}

impl RenamerConfigBuilder {
    pub fn folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.config.folder = folder.into();
        self
    }

    pub fn ledger_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.ledger_file_name = name.into();
        self
    }

    pub fn ocr_language(mut self, lang: impl Into<String>) -> Self {
        self.config.ocr_language = lang.into();
        self
    }

    pub fn tesseract_cmd(mut self, cmd: impl Into<PathBuf>) -> Self {
        self.config.tesseract_cmd = cmd.into();
        self
    }

    pub fn scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.scratch_dir = dir.into();
        self
    }

    pub fn backup_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.backup_dir = Some(dir.into());
        self
    }

    pub fn pdfium_lib_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.pdfium_lib_path = Some(dir.into());
        self
    }

    pub fn poll_interval_secs(mut self, secs: u64) -> Self {
        self.config.poll_interval_secs = secs.max(1);
        self
    }

    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.log_dir = dir.into();
        self
    }

    pub fn summarizer(mut self, summarizer: SummarizerConfig) -> Self {
        self.config.summarizer = summarizer;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<RenamerConfig, RenamerError> {
        let c = &self.config;
        if c.ledger_file_name.trim().is_empty() {
            return Err(RenamerError::InvalidConfig(
                "Ledger file name must not be empty".into(),
            ));
        }
        if c.ledger_file_name.contains(['/', '\\']) {
            return Err(RenamerError::InvalidConfig(format!(
                "Ledger file name must be a bare file name, got '{}'",
                c.ledger_file_name
            )));
        }
        if c.ledger_file_name.to_lowercase().ends_with(".pdf") {
            return Err(RenamerError::InvalidConfig(
                "Ledger file name must not end in .pdf".into(),
            ));
        }
        if c.ocr_language.trim().is_empty() {
            return Err(RenamerError::InvalidConfig(
                "OCR language must not be empty".into(),
            ));
        }
        if c.summarizer.endpoint.trim().is_empty() {
            return Err(RenamerError::InvalidConfig(
                "Summarizer endpoint must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

/// Settings for the remote summarization service.
///
/// Injected into [`crate::pipeline::synthesize::FilenameSynthesizer`] at
/// construction; nothing here is read from process-wide state afterwards.
#[derive(Clone)]
pub struct SummarizerConfig {
    /// Chat-completions URL. Default: DeepSeek.
    pub endpoint: String,

    /// Bearer token. When None every call fails and the first-line
    /// heuristic names the file.
    pub api_key: Option<String>,

    /// Model identifier. None = `deepseek-chat` for the raw endpoint, or
    /// `gpt-4.1-nano` when a named provider is used.
    pub model: Option<String>,

    /// Sampling temperature. Default: 0.3.
    pub temperature: f32,

    /// Per-request timeout in seconds. Default: 60.
    pub timeout_secs: u64,

    /// Name of an edgequake-llm provider (e.g. "openai", "ollama"). When set
    /// the provider-backed summarizer is used instead of the raw endpoint.
    pub provider_name: Option<String>,

    /// Instruction template override. Must contain `{content}`.
    pub prompt_template: Option<String>,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            model: None,
            temperature: 0.3,
            timeout_secs: 60,
            provider_name: None,
            prompt_template: None,
        }
    }
}

impl fmt::Debug for SummarizerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummarizerConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .field("provider_name", &self.provider_name)
            .field("prompt_template", &self.prompt_template.as_ref().map(|t| t.len()))
            .finish()
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, RenamerError> {
    value
        .trim()
        .parse()
        .map_err(|_| RenamerError::InvalidConfig(format!("{name}: cannot parse '{value}'")))
}
