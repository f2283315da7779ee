//! Input validation for analysis requests and journal identifiers.
//!
//! Identifier classification is a hint for the prompt only; any non-blank
//! text is a valid query.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Validation error types
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Query is empty: enter a journal name, ISSN, DOI or URL")]
    EmptyQuery,

    #[error("Document is empty")]
    EmptyDocument,

    #[error("Invalid media type: {0:?}")]
    InvalidMediaType(String),

    #[error("Unsupported document type: {0}")]
    UnsupportedDocument(String),

    #[error("Document is {size} bytes, larger than the {max} byte limit")]
    DocumentTooLarge { size: u64, max: u64 },

    #[error("Failed to read document: {0}")]
    DocumentRead(String),

    #[error("Invalid ISSN: {0}")]
    InvalidIssn(String),

    #[error("Invalid DOI format: {0}")]
    InvalidDoi(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// The kind of journal identifier a text query looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    Issn,
    Doi,
    Url,
    Name,
}

impl IdentifierKind {
    pub fn label(&self) -> &'static str {
        match self {
            IdentifierKind::Issn => "ISSN",
            IdentifierKind::Doi => "DOI",
            IdentifierKind::Url => "URL",
            IdentifierKind::Name => "journal name",
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn issn_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?i)(?:e-?issn|p-?issn|issn)?[:\s]*(\d{4})-?(\d{3}[\dX])$")
            .expect("ISSN pattern is valid")
    })
}

/// Guess what kind of identifier `input` is.
///
/// DOIs are checked before URLs so `https://doi.org/...` counts as a DOI.
pub fn classify_identifier(input: &str) -> IdentifierKind {
    let input = input.trim();
    if validate_doi(input).is_ok() {
        return IdentifierKind::Doi;
    }
    if validate_url(input).is_ok() {
        return IdentifierKind::Url;
    }
    if issn_regex().is_match(input) {
        return IdentifierKind::Issn;
    }
    IdentifierKind::Name
}

/// Validate an ISSN and return it in canonical `NNNN-NNNC` form.
///
/// Accepts an optional `ISSN`/`e-ISSN` prefix, a missing hyphen and a
/// lowercase check character. The mod-11 check digit must match.
pub fn validate_issn(issn: &str) -> Result<String, ValidationError> {
    let trimmed = issn.trim();
    let caps = issn_regex()
        .captures(trimmed)
        .ok_or_else(|| ValidationError::InvalidIssn(trimmed.to_string()))?;

    let digits = format!("{}{}", &caps[1], &caps[2]).to_ascii_uppercase();
    let sum: u32 = digits
        .chars()
        .take(7)
        .zip((2..=8).rev())
        .map(|(c, weight)| c.to_digit(10).unwrap_or(0) * weight)
        .sum();
    let expected = match (11 - sum % 11) % 11 {
        10 => 'X',
        n => char::from_digit(n, 10).unwrap_or('0'),
    };

    let check = digits.chars().last().unwrap_or(' ');
    if check != expected {
        return Err(ValidationError::InvalidIssn(format!(
            "{}: check digit should be {}",
            trimmed, expected
        )));
    }

    Ok(format!("{}-{}", &digits[..4], &digits[4..]))
}

/// Validate and normalize a DOI.
///
/// DOIs have the format "10.xxxx/xxxxxx" where xxxx is a registrant code
/// and xxxxxx is an item ID.
pub fn validate_doi(doi: &str) -> Result<String, ValidationError> {
    let doi = doi.trim().to_lowercase();

    if doi.is_empty() {
        return Err(ValidationError::InvalidDoi("empty DOI".to_string()));
    }

    let doi = doi.strip_prefix("doi:").unwrap_or(&doi).trim_start();
    let doi = doi
        .strip_prefix("https://doi.org/")
        .or_else(|| doi.strip_prefix("http://doi.org/"))
        .or_else(|| doi.strip_prefix("https://dx.doi.org/"))
        .or_else(|| doi.strip_prefix("http://dx.doi.org/"))
        .unwrap_or(doi);

    if !doi.starts_with("10.") {
        return Err(ValidationError::InvalidDoi(
            "DOI must start with '10.'".to_string(),
        ));
    }

    match doi.split_once('/') {
        Some((prefix, suffix)) if prefix.len() > 3 && !suffix.is_empty() => {}
        _ => {
            return Err(ValidationError::InvalidDoi(
                "DOI must contain a registrant and an item ID".to_string(),
            ))
        }
    }

    if doi.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidDoi(
            "DOI must not contain whitespace".to_string(),
        ));
    }

    Ok(doi.to_string())
}

/// Validate an HTTP(S) URL.
pub fn validate_url(url: &str) -> Result<String, ValidationError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(ValidationError::InvalidUrl("empty URL".to_string()));
    }

    let parsed = url::Url::parse(url).map_err(|e| ValidationError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ValidationError::InvalidUrl(format!(
                "invalid scheme: {}",
                other
            )))
        }
    }

    if parsed.host_str().is_none() {
        return Err(ValidationError::InvalidUrl("missing host".to_string()));
    }

    Ok(url.to_string())
}
