//! Gemini draft writer: non-streaming `generateContent` call.
//!
//! Differences from a plain REST client:
//! - API key travels in the URL query param, not a header
//! - Sampling is fixed (see `prompts`), callers only pick topic and tone
//! - Every failure collapses into `DraftOutcome::Fallback`; the cause is
//!   logged here and never returned

use super::prompts::{self, MODEL, TEMPERATURE, TOP_P};
use super::provider;
use super::types::{DraftOutcome, MessageTone};
use serde::Deserialize;
use thiserror::Error;

/// Why a draft could not be generated. Internal to this module.
#[derive(Debug, Error)]
enum DraftError {
    #[error("no {} configured", provider::ENV_KEY)]
    MissingKey,

    #[error("HTTP request failed: {0}")]
    Transport(reqwest::Error),

    #[error("Gemini API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("response contained no text")]
    Empty,
}

// The request URL carries the key; it must not reach the log.
impl From<reqwest::Error> for DraftError {
    fn from(e: reqwest::Error) -> Self {
        DraftError::Transport(e.without_url())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Part {
    text: Option<String>,
    /// Thinking models mark reasoning parts; those are not the answer.
    thought: bool,
}

/// Client for generating message drafts.
///
/// Cheap to share: holds a pooled `reqwest::Client`. Registered as managed
/// state by the app shell.
#[derive(Clone)]
pub struct DraftWriter {
    client: reqwest::Client,
    base_url: Option<String>,
    api_key: Option<String>,
}

impl Default for DraftWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftWriter {
    /// Writer that resolves key and endpoint on every call, so a key saved
    /// from the settings panel takes effect without a restart.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: None,
            api_key: None,
        }
    }

    /// Writer pinned to an endpoint and key.
    pub fn with_endpoint(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: Some(base_url.into()),
            api_key: Some(api_key.into()),
        }
    }

    /// Generate a draft about `topic` in `tone`.
    ///
    /// Never fails: any error yields `DraftOutcome::Fallback`.
    pub async fn generate(&self, topic: &str, tone: MessageTone) -> DraftOutcome {
        let prompt = prompts::build_draft_prompt(topic, tone);
        log::info!("[LLM] Model: {}, tone: {}", MODEL, tone);

        let start = std::time::Instant::now();
        match self.request_text(&prompt).await {
            Ok(text) => {
                log::info!(
                    "[LLM] Draft generated in {}ms ({} chars)",
                    start.elapsed().as_millis(),
                    text.chars().count()
                );
                DraftOutcome::Generated(text)
            }
            Err(e) => {
                log::error!("[LLM] Draft generation failed: {}", e);
                DraftOutcome::Fallback
            }
        }
    }

    /// Send a minimal request and report whether the API accepted it.
    pub async fn check_connection(&self) -> Result<bool, String> {
        let key = self.api_key().ok_or_else(|| format!("No {} set", provider::ENV_KEY))?;
        let resp = self
            .client
            .post(self.endpoint(&key))
            .json(&serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "Reply with just: ok"}]}],
                "generationConfig": {"maxOutputTokens": 50}
            }))
            .send()
            .await
            .map_err(|e| e.without_url().to_string())?;

        log::info!("[SETTINGS] Test gemini, status: {}", resp.status());
        Ok(resp.status().is_success())
    }

    fn api_key(&self) -> Option<String> {
        match &self.api_key {
            Some(key) if key.is_empty() => None,
            Some(key) => Some(key.clone()),
            None => provider::resolve_api_key(),
        }
    }

    fn endpoint(&self, api_key: &str) -> String {
        let base = self.base_url.clone().unwrap_or_else(provider::base_url);
        format!(
            "{}/models/{}:generateContent?key={}",
            base.trim_end_matches('/'),
            MODEL,
            api_key
        )
    }

    async fn request_text(&self, prompt: &str) -> Result<String, DraftError> {
        let key = self.api_key().ok_or(DraftError::MissingKey)?;

        let resp = self
            .client
            .post(self.endpoint(&key))
            .header("content-type", "application/json")
            .json(&serde_json::json!({
                "contents": [
                    {
                        "role": "user",
                        "parts": [{ "text": prompt }]
                    }
                ],
                "generationConfig": {
                    "temperature": TEMPERATURE,
                    "topP": TOP_P
                }
            }))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(DraftError::Status {
                status,
                body: body.chars().take(200).collect(),
            });
        }
        extract_text(&body)
    }
}

/// Pull the answer text out of a `generateContent` response body.
///
/// Joins the non-thought parts of the first candidate. Any non-empty text is
/// returned as-is, whitespace included.
fn extract_text(body: &str) -> Result<String, DraftError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)?;
    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter(|p| !p.thought)
                .filter_map(|p| p.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(DraftError::Empty);
    }
    Ok(text)
}
