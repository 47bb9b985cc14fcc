//! Summarizer backends: a raw chat-completions endpoint and edgequake-llm.
//!
//! [`ChatCompletionsClient`] speaks the OpenAI-compatible wire format
//! directly (DeepSeek by default): one POST per document, bearer token,
//! single user message, answer read from `choices[0].message.content`.
//!
//! [`ProviderSummarizer`] routes the same prompt through an
//! [`edgequake_llm::LLMProvider`] so any provider the factory knows
//! (OpenAI, Anthropic, Gemini, Ollama, …) can name files.
//!
//! Neither retries: a failed call is reported as
//! [`FileError::RequestError`] and the synthesizer falls back to the first
//! line of text.

use crate::config::{SummarizerConfig, DEFAULT_MODEL};
use crate::error::{FileError, RenamerError};
use crate::pipeline::synthesize::Summarizer;
use crate::prompts::render_naming_prompt;
use async_trait::async_trait;
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider, ProviderFactory};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Model used with a named provider when none is configured.
pub const DEFAULT_PROVIDER_MODEL: &str = "gpt-4.1-nano";

/// Upper bound on the name the model may generate.
const MAX_NAME_TOKENS: usize = 100;

// ── Raw chat-completions client ──────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatTurn<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatTurn<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Summarizer that POSTs to an OpenAI-compatible `/chat/completions` URL.
#[derive(Clone)]
pub struct ChatCompletionsClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
}

impl fmt::Debug for ChatCompletionsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatCompletionsClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl ChatCompletionsClient {
    pub fn new(config: &SummarizerConfig) -> Result<Self, RenamerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RenamerError::Internal(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: config.temperature,
        })
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![ChatTurn {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl Summarizer for ChatCompletionsClient {
    async fn summarize(&self, template: &str, text: &str) -> Result<String, FileError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| FileError::RequestError {
            detail: "no API key configured".into(),
        })?;

        let prompt = render_naming_prompt(template, text);
        let start = Instant::now();

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&self.request_body(&prompt))
            .send()
            .await
            .map_err(|e| FileError::RequestError {
                detail: if e.is_timeout() {
                    format!("timed out: {e}")
                } else {
                    e.to_string()
                },
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| FileError::RequestError {
            detail: format!("reading body: {e}"),
        })?;

        if !status.is_success() {
            return Err(FileError::RequestError {
                detail: format!("HTTP {status}: {}", truncate(&body, 200)),
            });
        }

        debug!("Summarizer answered in {:?}", start.elapsed());
        parse_completion(&body)
    }
}

/// Pull the trimmed answer out of a chat-completions response body.
pub fn parse_completion(body: &str) -> Result<String, FileError> {
    let parsed: ChatResponse = serde_json::from_str(body).map_err(|e| FileError::RequestError {
        detail: format!("malformed response: {e}"),
    })?;

    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|c| c.trim().to_string())
        .unwrap_or_default();

    if content.is_empty() {
        return Err(FileError::RequestError {
            detail: "response contained no answer".into(),
        });
    }
    Ok(content)
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}\u{2026}", &s[..idx]),
        None => s.to_string(),
    }
}

// ── edgequake-llm provider ───────────────────────────────────────────────

/// Summarizer backed by an edgequake-llm provider.
pub struct ProviderSummarizer {
    provider: Arc<dyn LLMProvider>,
    temperature: f32,
}

impl fmt::Debug for ProviderSummarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSummarizer")
            .field("provider", &"<dyn LLMProvider>")
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl ProviderSummarizer {
    pub fn new(provider: Arc<dyn LLMProvider>, temperature: f32) -> Self {
        Self {
            provider,
            temperature,
        }
    }

    fn options(&self) -> CompletionOptions {
        CompletionOptions {
            temperature: Some(self.temperature),
            max_tokens: Some(MAX_NAME_TOKENS),
            ..Default::default()
        }
    }
}

#[async_trait]
impl Summarizer for ProviderSummarizer {
    async fn summarize(&self, template: &str, text: &str) -> Result<String, FileError> {
        let messages = vec![ChatMessage::user(render_naming_prompt(template, text))];
        let response = self
            .provider
            .chat(&messages, Some(&self.options()))
            .await
            .map_err(|e| FileError::RequestError {
                detail: e.to_string(),
            })?;

        debug!(
            "Provider answered: {} input tokens, {} output tokens",
            response.prompt_tokens, response.completion_tokens
        );
        Ok(response.content.trim().to_string())
    }
}

/// Pick the summarizer backend from the configuration.
///
/// A configured provider name selects [`ProviderSummarizer`]; otherwise the
/// raw endpoint client is used. A missing API key for the raw endpoint is
/// not fatal: every call fails and names come from the first-line fallback.
pub fn resolve_summarizer(config: &SummarizerConfig) -> Result<Arc<dyn Summarizer>, RenamerError> {
    if let Some(ref name) = config.provider_name {
        let model = config.model.as_deref().unwrap_or(DEFAULT_PROVIDER_MODEL);
        let provider = ProviderFactory::create_llm_provider(name, model).map_err(|e| {
            RenamerError::ProviderNotConfigured {
                provider: name.clone(),
                hint: format!("{e}"),
            }
        })?;
        return Ok(Arc::new(ProviderSummarizer::new(provider, config.temperature)));
    }

    Ok(Arc::new(ChatCompletionsClient::new(config)?))
}
