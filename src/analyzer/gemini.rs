//! Gemini `generateContent` implementation of [`JournalAnalyzer`].
//!
//! API documentation: <https://ai.google.dev/api/generate-content>

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::{Duration, Instant};

use super::prompt::{document_prompt, text_prompt, PromptLanguage};
use super::schema::response_schema;
use super::{AnalysisError, JournalAnalyzer};
use crate::config::Config;
use crate::models::{AnalysisRequest, AnalysisResult};
use crate::utils::{encode_document, HttpClient};

const MISSING_KEY: &str =
    "API key not found. Set GEMINI_API_KEY (or API_KEY) or add api.gemini_api_key to the config file.";

/// Analyzer backed by the Gemini structured-output API.
///
/// Holds only immutable settings and a shared HTTP client, so one instance
/// can serve any number of concurrent analyses.
#[derive(Clone)]
pub struct GeminiAnalyzer {
    client: HttpClient,
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f32,
    language: PromptLanguage,
}

impl fmt::Debug for GeminiAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiAnalyzer")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("language", &self.language)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

impl GeminiAnalyzer {
    /// Create an analyzer from configuration. The API key is captured here;
    /// a missing key is only reported when an analysis is attempted.
    pub fn new(config: &Config) -> Result<Self, AnalysisError> {
        let client = HttpClient::with_timeouts(
            Duration::from_secs(config.api.timeout_secs),
            Duration::from_secs(config.api.connect_timeout_secs),
        )
        .map_err(|e| {
            AnalysisError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self::with_client(config, client))
    }

    /// Create an analyzer that reuses an existing HTTP client
    pub fn with_client(config: &Config, client: HttpClient) -> Self {
        let model = config.api.model.trim();
        Self {
            client,
            api_key: config.api.api_key().map(str::to_string),
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            model: model.strip_prefix("models/").unwrap_or(model).to_string(),
            temperature: config.analysis.temperature.clamp(0.0, 2.0),
            language: config.analysis.language,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full `generateContent` URL for the configured model
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url,
            urlencoding::encode(&self.model)
        )
    }

    /// Build the request body, encoding any attached document.
    pub async fn build_request(
        &self,
        request: &AnalysisRequest,
    ) -> Result<GeminiRequest, AnalysisError> {
        let parts = match request {
            AnalysisRequest::Text(query) => vec![Part::Text(text_prompt(query, self.language))],
            AnalysisRequest::Document(document) => {
                let data = encode_document(document.shared_content())
                    .await
                    .map_err(|e| {
                        AnalysisError::Service(format!("Failed to encode document: {}", e))
                    })?;
                vec![
                    Part::Text(document_prompt(self.language)),
                    Part::InlineData(Blob {
                        mime_type: document.media_type().to_string(),
                        data,
                    }),
                ]
            }
        };

        Ok(GeminiRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(self.language),
                temperature: self.temperature,
            },
        })
    }
}

#[async_trait]
impl JournalAnalyzer for GeminiAnalyzer {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AnalysisError::Configuration(MISSING_KEY.to_string()))?;

        let body = self.build_request(request).await?;
        let url = self.endpoint();
        let started = Instant::now();

        tracing::debug!(
            model = %self.model,
            request = %request.describe(),
            "Sending analysis request"
        );

        let response = self
            .client
            .client()
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Analysis request failed");
                AnalysisError::from(e)
            })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                %status,
                body = truncate_for_log(&text, 500),
                "Analysis service rejected the request"
            );
            return Err(AnalysisError::Service(format!(
                "The analysis service returned status {}. The journal might not be found or there was an API issue.",
                status
            )));
        }

        let envelope: GeminiResponse = serde_json::from_str(&text).map_err(|e| {
            tracing::warn!(
                error = %e,
                body = truncate_for_log(&text, 500),
                "Unexpected response envelope"
            );
            AnalysisError::Service(
                "The analysis service returned an unexpected response".to_string(),
            )
        })?;

        let content = envelope.into_text()?;
        let result = parse_analysis(&content)?;

        tracing::info!(
            journal = %result.journal_name,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Analysis complete"
        );

        Ok(result)
    }
}

/// Parse the model's JSON text into an assessment. No defaults are filled in:
/// a missing field, wrapper text or truncated output is an error.
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, AnalysisError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::Service(
            "The analysis service returned an empty response".to_string(),
        ));
    }

    serde_json::from_str(trimmed).map_err(|e| {
        tracing::debug!(
            error = %e,
            text = truncate_for_log(trimmed, 1500),
            "Unparseable assessment"
        );
        AnalysisError::from(e)
    })
}

fn truncate_for_log(s: &str, max: usize) -> &str {
    if s.len() <= max {
        s
    } else {
        let mut i = max;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        &s[..i]
    }
}

/// `generateContent` request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

/// A single content part: instruction text or an inline document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Part {
    Text(String),
    InlineData(Blob),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: String,
    /// Base64-encoded payload
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GeminiResponse {
    /// Concatenated text of the first candidate.
    fn into_text(self) -> Result<String, AnalysisError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            tracing::warn!(%reason, "Prompt was blocked");
            return Err(AnalysisError::Service(
                "The analysis service declined to answer this request".to_string(),
            ));
        }

        let candidate = self.candidates.into_iter().next().ok_or_else(|| {
            AnalysisError::Service("The analysis service returned no answer".to_string())
        })?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            tracing::warn!(finish_reason = ?candidate.finish_reason, "Candidate has no text");
            return Err(AnalysisError::Service(
                "The analysis service returned an empty response".to_string(),
            ));
        }

        if candidate.finish_reason.as_deref() == Some("MAX_TOKENS") {
            tracing::debug!("Candidate stopped at the token limit; output may be truncated");
        }

        Ok(text)
    }
}
