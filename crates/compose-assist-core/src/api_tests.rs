use super::*;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(content: &str, tone: &str) -> GenerationRequest {
    GenerationRequest::new(content, tone)
}

#[test]
fn test_request_uses_camel_case() {
    let json = serde_json::to_value(request("Hi team", "friendly")).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"emailContent": "Hi team", "tone": "friendly"})
    );
}

#[test]
fn test_companion_request_validation() {
    let ok = GenerationRequest::companion("Can we meet on Friday?", "casual").unwrap();
    assert_eq!(ok, request("Can we meet on Friday?", "casual"));

    assert!(GenerationRequest::companion("0123456789", "professional").is_ok());
    assert!(matches!(
        GenerationRequest::companion("too short", "professional"),
        Err(GenerationError::InvalidRequest(_))
    ));
    assert!(matches!(
        GenerationRequest::companion("", "professional"),
        Err(GenerationError::InvalidRequest(_))
    ));
    assert!(matches!(
        GenerationRequest::companion("Can we meet on Friday?", "assertive"),
        Err(GenerationError::InvalidRequest(_))
    ));
}

#[test]
fn test_endpoint_joins_generate() {
    let generator = HttpReplyGenerator::new("http://localhost:8080/api/email/").unwrap();
    assert_eq!(
        generator.endpoint().as_str(),
        "http://localhost:8080/api/email/generate"
    );
}

#[test]
fn test_endpoint_rejects_bad_urls() {
    assert!(matches!(
        HttpReplyGenerator::new("not a url"),
        Err(GenerationError::InvalidEndpoint(_))
    ));
    assert!(matches!(
        HttpReplyGenerator::new("ftp://example.com/api"),
        Err(GenerationError::InvalidEndpoint(_))
    ));
}

#[tokio::test]
async fn test_generate_posts_json_and_returns_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/email/generate"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "emailContent": "Hi team, can we meet?",
            "tone": "polite"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("Of course, happy to."))
        .expect(1)
        .mount(&server)
        .await;

    let generator = HttpReplyGenerator::new(&format!("{}/api/email", server.uri())).unwrap();
    let reply = generator
        .generate(&request("Hi team, can we meet?", "polite"))
        .await
        .unwrap();
    assert_eq!(reply, "Of course, happy to.");
}

#[tokio::test]
async fn test_generate_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/email/generate"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let generator = HttpReplyGenerator::new(&format!("{}/api/email", server.uri())).unwrap();
    let err = generator.generate(&request("x", "formal")).await.unwrap_err();
    match err {
        GenerationError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "overloaded");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_generate_connection_refused() {
    let generator = HttpReplyGenerator::new("http://127.0.0.1:1/api/email").unwrap();
    let err = generator.generate(&request("x", "formal")).await.unwrap_err();
    assert!(matches!(err, GenerationError::Network(_)));
}
