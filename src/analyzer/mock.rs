//! Mock analyzer for testing purposes.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::analyzer::{AnalysisError, JournalAnalyzer};
use crate::models::{
    AnalysisRequest, AnalysisResult, Metrics, NOT_APPLICABLE, NOT_FOUND_ID, UNRANKED_ID,
};

/// An analyzer that returns a predefined outcome and counts its calls.
#[derive(Debug)]
pub struct MockAnalyzer {
    outcome: Mutex<Result<AnalysisResult, AnalysisError>>,
    calls: AtomicUsize,
}

impl Default for MockAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAnalyzer {
    /// Create a mock that answers every request with [`unknown_journal`].
    pub fn new() -> Self {
        Self::with_result(unknown_journal("Unknown"))
    }

    /// Create a mock that always returns `result`.
    pub fn with_result(result: AnalysisResult) -> Self {
        Self {
            outcome: Mutex::new(Ok(result)),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock that always fails with `error`.
    pub fn with_error(error: AnalysisError) -> Self {
        Self {
            outcome: Mutex::new(Err(error)),
            calls: AtomicUsize::new(0),
        }
    }

    /// Replace the configured outcome.
    pub fn set_outcome(&self, outcome: Result<AnalysisResult, AnalysisError>) {
        let mut guard = self.outcome.lock().unwrap_or_else(|e| e.into_inner());
        *guard = outcome;
    }

    /// Number of times `analyze` was called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JournalAnalyzer for MockAnalyzer {
    fn name(&self) -> &str {
        "Mock Analyzer"
    }

    async fn analyze(&self, _request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let guard = self.outcome.lock().unwrap_or_else(|e| e.into_inner());
        guard.clone()
    }
}

/// Helper to build an assessment where every datum is a sentinel.
pub fn unknown_journal(name: &str) -> AnalysisResult {
    AnalysisResult {
        journal_name: name.to_string(),
        issn: NOT_FOUND_ID.to_string(),
        indexing: NOT_FOUND_ID.to_string(),
        rank: UNRANKED_ID.to_string(),
        metrics: Metrics {
            sjr: Some(NOT_APPLICABLE.to_string()),
            cite_score: Some(NOT_APPLICABLE.to_string()),
            impact_factor: Some(NOT_APPLICABLE.to_string()),
            h_index: Some(NOT_APPLICABLE.to_string()),
        },
        reputation_summary: NOT_FOUND_ID.to_string(),
        review_time_estimation: NOT_FOUND_ID.to_string(),
        tips_for_authors: NOT_FOUND_ID.to_string(),
    }
}
