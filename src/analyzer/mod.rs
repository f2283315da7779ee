//! Journal analysis through a structured-output generative service.
//!
//! This module defines the [`JournalAnalyzer`] trait. [`GeminiAnalyzer`] is
//! the production implementation; [`MockAnalyzer`] returns canned results
//! for tests and offline runs.
//!
//! An analysis is a single attempt: no caching, no retry. It either returns a
//! fully populated [`AnalysisResult`] (fields may hold sentinel strings) or
//! fails with one of the two [`AnalysisError`] kinds.
//!
//! ```rust,no_run
//! use journal_analyzer::analyzer::{GeminiAnalyzer, JournalAnalyzer};
//! use journal_analyzer::config::get_config;
//! use journal_analyzer::models::AnalysisRequest;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = GeminiAnalyzer::new(&get_config()?)?;
//! let request = AnalysisRequest::text("Journal of Example Studies")?;
//! let result = analyzer.analyze(&request).await?;
//! println!("{} ({})", result.journal_name, result.rank);
//! # Ok(())
//! # }
//! ```

mod gemini;
pub mod mock;
mod prompt;
mod schema;

pub use gemini::{
    parse_analysis, Blob, Content, GeminiAnalyzer, GeminiRequest, GenerationConfig, Part,
};
pub use mock::MockAnalyzer;
pub use prompt::{document_prompt, text_prompt, PromptLanguage, PRIMARY_SOURCES};
pub use schema::{response_schema, METRIC_FIELDS, REQUIRED_FIELDS};

use async_trait::async_trait;

use crate::models::{AnalysisRequest, AnalysisResult};

/// Turns one analysis request into one journal assessment.
#[async_trait]
pub trait JournalAnalyzer: Send + Sync + std::fmt::Debug {
    /// Human-readable name of the backing service
    fn name(&self) -> &str;

    /// Analyze a journal identifier or document
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError>;
}

/// Errors surfaced by an analysis
#[derive(Debug, Clone, thiserror::Error)]
pub enum AnalysisError {
    /// The runtime is missing something needed to call the service, usually the API key
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The call failed, was rejected, or returned something that is not a valid assessment
    #[error("Service error: {0}")]
    Service(String),
}

impl AnalysisError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, AnalysisError::Configuration(_))
    }

    pub fn is_service(&self) -> bool {
        matches!(self, AnalysisError::Service(_))
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        tracing::debug!(error = %err, "HTTP transport error");
        let msg = if err.is_timeout() {
            "The analysis service did not respond in time"
        } else if err.is_connect() {
            "Could not reach the analysis service"
        } else {
            "The request to the analysis service failed"
        };
        AnalysisError::Service(msg.to_string())
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::Service(format!(
            "The analysis service returned an invalid assessment: {}",
            err
        ))
    }
}
