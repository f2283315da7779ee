//! # Journal Analyzer
//!
//! Assess the quality of a scientific journal (indexing, rank, bibliometric
//! indicators and narrative advice) from a name, ISSN, DOI, URL or an
//! attached PDF, using a generative AI service constrained to a fixed JSON
//! schema.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Request and result types (AnalysisRequest, AnalysisResult, etc.)
//! - [`analyzer`]: The [`JournalAnalyzer`] trait and its Gemini implementation
//! - [`utils`]: HTTP client, transport encoding, and identifier validation
//! - [`config`]: Configuration management
//! - [`ui`]: Terminal rendering for the command-line tool

pub mod analyzer;
pub mod config;
pub mod models;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use analyzer::{AnalysisError, GeminiAnalyzer, JournalAnalyzer};
pub use models::{AnalysisRequest, AnalysisResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
