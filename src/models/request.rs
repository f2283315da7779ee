//! Analysis request variants: a text identifier or an attached document.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::utils::{classify_identifier, IdentifierKind, ValidationError};

/// Largest document the service accepts as inline data (20 MiB).
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 20 * 1024 * 1024;

/// A single analysis request. Exactly one variant is active per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    /// Journal name, ISSN, DOI or URL
    Text(TextQuery),
    /// Uploaded document, typically a PDF article
    Document(DocumentQuery),
}

impl AnalysisRequest {
    /// Build a text request, rejecting blank input.
    pub fn text(query: impl Into<String>) -> Result<Self, ValidationError> {
        TextQuery::new(query).map(AnalysisRequest::Text)
    }

    /// Build a document request from in-memory bytes.
    pub fn document(
        content: impl Into<Vec<u8>>,
        media_type: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        DocumentQuery::new(content, media_type).map(AnalysisRequest::Document)
    }

    /// Short description for logs; never includes document bytes.
    pub fn describe(&self) -> String {
        match self {
            AnalysisRequest::Text(q) => format!("text query ({}) {:?}", q.kind(), q.as_str()),
            AnalysisRequest::Document(d) => {
                format!("document {} ({} bytes)", d.media_type(), d.len())
            }
        }
    }
}

/// Non-blank journal identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextQuery {
    raw: String,
}

impl TextQuery {
    /// Create a query. The input is trimmed; blank input is rejected.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyQuery);
        }
        Ok(Self {
            raw: trimmed.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// What kind of identifier the query looks like.
    pub fn kind(&self) -> IdentifierKind {
        classify_identifier(&self.raw)
    }
}

impl fmt::Display for TextQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Binary document with its declared media type.
///
/// The payload is shared, so cloning a query does not copy the bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentQuery {
    content: Arc<[u8]>,
    media_type: String,
}

impl DocumentQuery {
    /// Create a document query from bytes and a `type/subtype` media type.
    pub fn new(
        content: impl Into<Vec<u8>>,
        media_type: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let content: Vec<u8> = content.into();
        if content.is_empty() {
            return Err(ValidationError::EmptyDocument);
        }

        let media_type = media_type.into().trim().to_ascii_lowercase();
        if !is_media_type(&media_type) {
            return Err(ValidationError::InvalidMediaType(media_type));
        }

        Ok(Self {
            content: Arc::from(content),
            media_type,
        })
    }

    /// Read a document from disk, inferring the media type from the extension.
    ///
    /// Files larger than `max_bytes` are rejected before they are read.
    pub async fn from_path(path: &Path, max_bytes: usize) -> Result<Self, ValidationError> {
        let media_type = media_type_for_path(path).ok_or_else(|| {
            ValidationError::UnsupportedDocument(path.display().to_string())
        })?;

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| ValidationError::DocumentRead(format!("{}: {}", path.display(), e)))?;
        if metadata.len() > max_bytes as u64 {
            return Err(ValidationError::DocumentTooLarge {
                size: metadata.len(),
                max: max_bytes as u64,
            });
        }

        let content = tokio::fs::read(path)
            .await
            .map_err(|e| ValidationError::DocumentRead(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(
            path = %path.display(),
            media_type,
            bytes = content.len(),
            "Loaded document"
        );

        Self::new(content, media_type)
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Shared handle to the payload, for moving onto a blocking task.
    pub fn shared_content(&self) -> Arc<[u8]> {
        Arc::clone(&self.content)
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl fmt::Debug for DocumentQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentQuery")
            .field("media_type", &self.media_type)
            .field("len", &self.content.len())
            .finish()
    }
}

/// Media type for the document extensions the service can read inline.
pub fn media_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some("application/pdf"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "txt" => Some("text/plain"),
        _ => None,
    }
}

fn is_media_type(value: &str) -> bool {
    let mut parts = value.splitn(2, '/');
    let valid = |s: &str| {
        !s.is_empty()
            && s
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '.'))
    };
    match (parts.next(), parts.next()) {
        (Some(kind), Some(subtype)) => valid(kind) && valid(subtype),
        _ => false,
    }
}
