//! CLI binary for edgequake-pdf-renamer.
//!
//! A thin shim over the library crate: resolves the target folder, installs
//! file logging, and runs a sweep every `PDF_RENAMER_INTERVAL_SECS` until
//! Ctrl-C. All other settings come from the environment (see
//! [`RenamerConfig::from_env`]).

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use edgequake_pdf_renamer::{FolderProcessor, RenamerConfig};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"ENVIRONMENT VARIABLES:
  PDF_RENAMER_FOLDER         Default folder when none is given (共享文件)
  PDF_RENAMER_INTERVAL_SECS  Idle time between sweeps (10)
  PDF_RENAMER_OCR_LANG       Tesseract language pack (chi_sim)
  PDF_RENAMER_TESSERACT      Tesseract executable (tesseract)
  PDF_RENAMER_SCRATCH_DIR    Directory for OCR scratch images (temp)
  PDF_RENAMER_BACKUP_DIR     Copy each file here before renaming (off)
  PDF_RENAMER_LEDGER         Ledger file name inside the folder (更名存档.txt)
  PDF_RENAMER_LOG_DIR        Log directory (logs)
  DEEPSEEK_API_KEY           API key for the summarization endpoint
  PDF_RENAMER_ENDPOINT       Chat-completions URL (DeepSeek)
  PDF_RENAMER_MODEL          Model ID (deepseek-chat)
  PDF_RENAMER_PROVIDER       Use an edgequake-llm provider instead (openai, anthropic, …)
  PDF_RENAMER_PROMPT_FILE    File with a custom naming prompt containing {content}
  PDFIUM_LIB_PATH            Directory containing libpdfium
  RUST_LOG                   Log filter (info)
"#;

/// Watch a folder and rename PDFs from their first-page content.
#[derive(Parser, Debug)]
#[command(
    name = "pdf-renamer",
    version,
    about = "Watch a folder and rename PDFs from their first-page content",
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Folder to watch. Defaults to PDF_RENAMER_FOLDER or ./共享文件.
    folder: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = RenamerConfig::from_env().context("Invalid configuration")?;
    if let Some(folder) = cli.folder {
        config.folder = folder;
    }

    init_logging(&config.log_dir)?;

    // Create the folder on first run; anything that is still not a
    // directory afterwards is the only exit-code-worthy failure.
    let _ = std::fs::create_dir_all(&config.folder);
    if !config.folder.is_dir() {
        eprintln!("Error: {} is not a valid folder path", config.folder.display());
        std::process::exit(1);
    }

    if config.summarizer.api_key.is_none() && config.summarizer.provider_name.is_none() {
        warn!("No API key configured; names will come from the first line of text");
    }

    let interval = Duration::from_secs(config.poll_interval_secs);
    let processor = FolderProcessor::from_config(config).context("Failed to start")?;
    info!("Watching folder: {}", processor.folder().display());

    tokio::select! {
        _ = run(&processor, interval) => {}
        _ = tokio::signal::ctrl_c() => info!("Interrupted, exiting"),
    }
    Ok(())
}

/// Sweep, idle, repeat.
async fn run(processor: &FolderProcessor, interval: Duration) {
    loop {
        if let Err(e) = processor.sweep().await {
            error!("Sweep failed: {}", e);
        }
        info!("Waiting for new files...");
        tokio::time::sleep(interval).await;
    }
}

/// Log to `<log_dir>/pdf_renamer_<timestamp>.log`.
fn init_logging(log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    let path = log_dir.join(format!(
        "pdf_renamer_{}.log",
        Local::now().format("%Y%m%d_%H%M%S")
    ));
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
