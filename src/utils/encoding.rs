//! Transport encoding for inline document payloads.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Encode a document payload as standard, padded base64.
///
/// Runs on the blocking pool so large PDFs do not stall the async runtime.
pub async fn encode_document(content: Arc<[u8]>) -> Result<String, tokio::task::JoinError> {
    tokio::task::spawn_blocking(move || STANDARD.encode(&content[..])).await
}

/// Decode a base64 payload produced by [`encode_document`].
pub fn decode_document(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(encoded)
}
