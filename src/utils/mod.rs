//! Utility modules supporting journal analysis.
//!
//! - [`HttpClient`]: HTTP client with configurable timeouts
//! - [`encode_document`]: Awaitable base64 transport encoding for inline documents
//! - [`classify_identifier`]: Guess whether a query is an ISSN, DOI, URL or name
//! - [`validate_issn`], [`validate_doi`], [`validate_url`]: Identifier validation
//! - [`ValidationError`]: Errors raised while building a request
//!
//! # Identifier classification
//!
//! ```rust
//! use journal_analyzer::utils::{classify_identifier, IdentifierKind};
//!
//! assert_eq!(classify_identifier("0317-8471"), IdentifierKind::Issn);
//! assert_eq!(classify_identifier("10.1038/nature12345"), IdentifierKind::Doi);
//! assert_eq!(classify_identifier("Journal of Example Studies"), IdentifierKind::Name);
//! ```

mod encoding;
mod http;
mod validate;

pub use encoding::{decode_document, encode_document};
pub use http::{HttpClient, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};
pub use validate::{
    classify_identifier, validate_doi, validate_issn, validate_url, IdentifierKind,
    ValidationError,
};
