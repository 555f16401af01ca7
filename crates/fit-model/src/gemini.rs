//! Gemini `generateContent` client.

use std::time::Duration;

use fit_config::ModelConfig;
use serde::{Deserialize, Serialize};

use crate::{GenerativeModel, error::ModelError, http::check_response};

// ── Wire types ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for a Gemini-compatible `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Build a client from the `model` config section.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Http`] if the underlying `reqwest::Client` fails
    /// to build.
    pub fn new(config: &ModelConfig) -> Result<Self, ModelError> {
        let http = reqwest::Client::builder()
            .user_agent("fitgen/0.1")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url,
            urlencoding::encode(&self.model)
        )
    }
}

impl GenerativeModel for GeminiClient {
    async fn generate_content(&self, prompt: &str) -> Result<String, ModelError> {
        let body = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [RequestPart { text: prompt }],
            }],
        };

        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "calling generateContent");
        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| {
                if e.is_timeout() {
                    tracing::warn!(model = %self.model, "generateContent timed out");
                }
            })?;
        let resp = check_response(resp).await?;

        let data: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| ModelError::Parse(e.to_string()))?;
        extract_text(data)
    }
}

/// Concatenate the text parts of the first candidate.
///
/// A candidate with no text yields an empty string; judging that is the
/// caller's job. No candidate at all is an error.
fn extract_text(data: GenerateResponse) -> Result<String, ModelError> {
    let Some(candidate) = data.candidates.into_iter().next() else {
        return Err(ModelError::NoCandidates {
            block_reason: data.prompt_feedback.and_then(|f| f.block_reason),
        });
    };
    Ok(candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default())
}
