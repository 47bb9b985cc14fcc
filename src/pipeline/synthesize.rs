//! Filename synthesis: page text → best-effort name.
//!
//! The remote summarizer gets the text inside the instruction template. Any
//! failure (network, auth, malformed body, empty answer) falls through to the
//! first non-blank line of the text. There is no retry; one call per
//! document.

use crate::error::FileError;
use crate::prompts::DEFAULT_NAMING_PROMPT;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Remote summarization capability.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Ask for a concise name for `text`, using `template` as instructions.
    ///
    /// Fails with [`FileError::RequestError`] on any transport, status or
    /// decoding problem.
    async fn summarize(&self, template: &str, text: &str) -> Result<String, FileError>;
}

/// How a candidate name was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameOrigin {
    Summarizer,
    FirstLine,
}

/// Raw, unsanitized name proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateName {
    pub name: String,
    pub origin: NameOrigin,
}

impl CandidateName {
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
    }
}

/// Wraps a [`Summarizer`] with the instruction template and the first-line
/// fallback.
#[derive(Clone)]
pub struct FilenameSynthesizer {
    summarizer: Arc<dyn Summarizer>,
    template: String,
}

impl fmt::Debug for FilenameSynthesizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilenameSynthesizer")
            .field("summarizer", &"<dyn Summarizer>")
            .field("template_len", &self.template.len())
            .finish()
    }
}

impl FilenameSynthesizer {
    /// `template` = None uses [`DEFAULT_NAMING_PROMPT`].
    pub fn new(summarizer: Arc<dyn Summarizer>, template: Option<String>) -> Self {
        Self {
            summarizer,
            template: template.unwrap_or_else(|| DEFAULT_NAMING_PROMPT.to_string()),
        }
    }

    /// Produce a name for `text`. Empty text yields `None`.
    pub async fn synthesize(&self, text: &str) -> Option<CandidateName> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        match self.summarizer.summarize(&self.template, text).await {
            Ok(name) if !name.trim().is_empty() => {
                let name = name.trim().to_string();
                info!("Summarizer proposed: {}", name);
                return Some(CandidateName {
                    name,
                    origin: NameOrigin::Summarizer,
                });
            }
            Ok(_) => warn!("Summarizer returned an empty name"),
            Err(e) => error!("Summarizer failed: {}", e),
        }

        warn!("Using the first line of text as the file name");
        Some(CandidateName {
            name: first_nonblank_line(text),
            origin: NameOrigin::FirstLine,
        })
    }
}

/// First line of `text` that is not blank, trimmed. Empty if none.
pub fn first_nonblank_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or_default()
        .to_string()
}
