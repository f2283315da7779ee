//! Core data models for journal analysis requests and results.

mod analysis;
mod request;

pub use analysis::{
    classify_rank, is_sentinel, AnalysisResult, Metric, Metrics, RankTier, NOT_APPLICABLE,
    NOT_FOUND_EN, NOT_FOUND_ID, UNRANKED_EN, UNRANKED_ID,
};
pub use request::{
    media_type_for_path, AnalysisRequest, DocumentQuery, TextQuery, DEFAULT_MAX_DOCUMENT_BYTES,
};
