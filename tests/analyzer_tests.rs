//! Integration tests for the Gemini analyzer
//!
//! These tests run the analyzer against a local mock of the generateContent
//! endpoint, so no API key or network access is needed.

use journal_analyzer::analyzer::{AnalysisError, GeminiAnalyzer, JournalAnalyzer};
use journal_analyzer::config::Config;
use journal_analyzer::models::{AnalysisRequest, AnalysisResult, RankTier};
use journal_analyzer::utils::ValidationError;
use mockito::{Matcher, Server};
use serde_json::json;

const ENDPOINT: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

const EXAMPLE_ANALYSIS: &str = r#"{"journalName":"Journal of Example Studies","issn":"1234-5678","indexing":"Scopus","rank":"Q2","metrics":{"sjr":"0.45","citeScore":"1.2","impactFactor":"N/A","hIndex":"N/A"},"reputationSummary":"...","reviewTimeEstimation":"3-6 months","tipsForAuthors":"..."}"#;

fn test_config(base_url: &str, api_key: Option<&str>) -> Config {
    let mut config = Config::default();
    config.api.base_url = base_url.to_string();
    config.api.gemini_api_key = api_key.map(str::to_string);
    config.api.timeout_secs = 10;
    config
}

/// Wrap model output in a generateContent response envelope
fn envelope(text: &str) -> String {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "modelVersion": "gemini-2.5-flash"
    })
    .to_string()
}

#[tokio::test]
async fn test_text_query_returns_result_unchanged() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", ENDPOINT)
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": { "type": "OBJECT" }
                }
            })),
            Matcher::Regex("Journal of Example Studies".to_string()),
            Matcher::Regex("Scopus".to_string()),
            Matcher::Regex("SINTA".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(EXAMPLE_ANALYSIS))
        .expect(1)
        .create_async()
        .await;

    let analyzer = GeminiAnalyzer::new(&test_config(&server.url(), Some("test-key"))).unwrap();
    let request = AnalysisRequest::text("Journal of Example Studies").unwrap();
    let result = analyzer.analyze(&request).await.unwrap();

    let expected: AnalysisResult = serde_json::from_str(EXAMPLE_ANALYSIS).unwrap();
    assert_eq!(result, expected);
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        serde_json::from_str::<serde_json::Value>(EXAMPLE_ANALYSIS).unwrap()
    );
    assert_eq!(result.rank_tier(), RankTier::Q2);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_document_query_embeds_encoded_payload() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", ENDPOINT)
        .match_body(Matcher::Regex(
            r#""inlineData":\{"mimeType":"application/pdf","data":"JVA="\}"#.to_string(),
        ))
        .with_status(200)
        .with_body(envelope(EXAMPLE_ANALYSIS))
        .expect(1)
        .create_async()
        .await;

    let analyzer = GeminiAnalyzer::new(&test_config(&server.url(), Some("test-key"))).unwrap();
    let request = AnalysisRequest::document(vec![0x25, 0x50], "application/pdf").unwrap();
    let result = analyzer.analyze(&request).await.unwrap();
    assert_eq!(result.journal_name, "Journal of Example Studies");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_credential_makes_no_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let analyzer = GeminiAnalyzer::new(&test_config(&server.url(), None)).unwrap();
    let request = AnalysisRequest::text("Journal of Example Studies").unwrap();
    let err = analyzer.analyze(&request).await.unwrap_err();

    assert!(matches!(err, AnalysisError::Configuration(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_json_is_service_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", ENDPOINT)
        .with_status(200)
        .with_body(envelope("not json"))
        .create_async()
        .await;

    let analyzer = GeminiAnalyzer::new(&test_config(&server.url(), Some("test-key"))).unwrap();
    let request = AnalysisRequest::text("Journal of Example Studies").unwrap();
    let err = analyzer.analyze(&request).await.unwrap_err();
    assert!(matches!(err, AnalysisError::Service(_)));
}

#[tokio::test]
async fn test_missing_field_is_service_error() {
    let mut server = Server::new_async().await;
    let partial = r#"{"journalName":"Journal of Example Studies","issn":"1234-5678","indexing":"Scopus","rank":"Q2","reputationSummary":"...","reviewTimeEstimation":"3-6 months","tipsForAuthors":"..."}"#;
    let _mock = server
        .mock("POST", ENDPOINT)
        .with_status(200)
        .with_body(envelope(partial))
        .create_async()
        .await;

    let analyzer = GeminiAnalyzer::new(&test_config(&server.url(), Some("test-key"))).unwrap();
    let request = AnalysisRequest::text("Journal of Example Studies").unwrap();
    let err = analyzer.analyze(&request).await.unwrap_err();
    assert!(err.is_service());
}

#[tokio::test]
async fn test_http_error_is_service_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", ENDPOINT)
        .with_status(500)
        .with_body(r#"{"error":{"code":500,"message":"internal","status":"INTERNAL"}}"#)
        .create_async()
        .await;

    let analyzer = GeminiAnalyzer::new(&test_config(&server.url(), Some("test-key"))).unwrap();
    let request = AnalysisRequest::text("Journal of Example Studies").unwrap();
    let err = analyzer.analyze(&request).await.unwrap_err();

    assert!(err.is_service());
    let message = err.to_string();
    assert!(message.contains("500"));
    assert!(!message.contains("INTERNAL"), "provider details stay in the logs");
}

#[tokio::test]
async fn test_blocked_prompt_is_service_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", ENDPOINT)
        .with_status(200)
        .with_body(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#)
        .create_async()
        .await;

    let analyzer = GeminiAnalyzer::new(&test_config(&server.url(), Some("test-key"))).unwrap();
    let request = AnalysisRequest::text("Journal of Example Studies").unwrap();
    assert!(analyzer.analyze(&request).await.unwrap_err().is_service());
}

#[tokio::test]
async fn test_no_retry_on_failure() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", ENDPOINT)
        .with_status(503)
        .expect(1)
        .create_async()
        .await;

    let analyzer = GeminiAnalyzer::new(&test_config(&server.url(), Some("test-key"))).unwrap();
    let request = AnalysisRequest::text("Journal of Example Studies").unwrap();
    assert!(analyzer.analyze(&request).await.is_err());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_concurrent_analyses_do_not_interfere() {
    let mut server = Server::new_async().await;
    let other = EXAMPLE_ANALYSIS.replace("Journal of Example Studies", "Another Journal");

    let first = server
        .mock("POST", ENDPOINT)
        .match_body(Matcher::Regex("Journal of Example Studies".to_string()))
        .with_status(200)
        .with_body(envelope(EXAMPLE_ANALYSIS))
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("POST", ENDPOINT)
        .match_body(Matcher::Regex("Another Journal".to_string()))
        .with_status(200)
        .with_body(envelope(&other))
        .expect(1)
        .create_async()
        .await;

    let analyzer = GeminiAnalyzer::new(&test_config(&server.url(), Some("test-key"))).unwrap();
    let a = AnalysisRequest::text("Journal of Example Studies").unwrap();
    let b = AnalysisRequest::text("Another Journal").unwrap();

    let (ra, rb) = tokio::join!(analyzer.analyze(&a), analyzer.analyze(&b));
    assert_eq!(ra.unwrap().journal_name, "Journal of Example Studies");
    assert_eq!(rb.unwrap().journal_name, "Another Journal");

    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_service_hides_endpoint() {
    // Nothing listens on port 1, so the connection is refused.
    let config = test_config("http://127.0.0.1:1", Some("test-key"));
    let analyzer = GeminiAnalyzer::new(&config).unwrap();
    let request = AnalysisRequest::text("Journal of Example Studies").unwrap();
    let err = analyzer.analyze(&request).await.unwrap_err();

    assert!(err.is_service());
    let message = err.to_string();
    assert!(!message.contains("127.0.0.1"), "got: {message}");
    assert!(!message.contains("generateContent"), "got: {message}");
}

#[test]
fn test_blank_query_rejected_before_analysis() {
    assert_eq!(
        AnalysisRequest::text("   ").unwrap_err(),
        ValidationError::EmptyQuery
    );
}
