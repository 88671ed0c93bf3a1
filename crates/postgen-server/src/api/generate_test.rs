use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::super::tests::{body_json, test_app};
use super::*;
use crate::middleware::AuthState;

const TOKEN: &str = "session-token";

fn auth() -> AuthState {
    AuthState::from_tokens([TOKEN])
}

fn valid_body(platform: &str) -> String {
    serde_json::json!({
        "platform": platform,
        "knowledgeBase": {
            "topics": ["rust", "async"],
            "tone": "friendly",
            "target_audience": "developers",
            "hashtags": []
        }
    })
    .to_string()
}

fn generate_request(body: impl Into<String>, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/v1/generate")
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.into())).expect("request")
}

async fn provider_replying(content: &str, expected_calls: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        })))
        .expect(expected_calls)
        .mount(&server)
        .await;
    server
}

// -------------------------------------------------------------------------
// parse_request, no HTTP
// -------------------------------------------------------------------------

#[test]
fn parse_request_accepts_valid_body() {
    let request = parse_request(valid_body("reddit").as_bytes()).expect("valid request");
    assert_eq!(request.platform, Platform::Reddit);
    assert_eq!(request.knowledge_base.topics, vec!["rust", "async"]);
}

#[test]
fn parse_request_missing_knowledge_base_is_missing_fields() {
    let result = parse_request(br#"{"platform":"linkedin"}"#);
    assert!(matches!(result, Err(GenerateError::MissingFields)));
}

#[test]
fn parse_request_empty_platform_is_missing_fields() {
    let body = valid_body("");
    assert!(matches!(
        parse_request(body.as_bytes()),
        Err(GenerateError::MissingFields)
    ));
}

#[test]
fn parse_request_null_knowledge_base_is_missing_fields() {
    let result = parse_request(br#"{"platform":"twitter","knowledgeBase":null}"#);
    assert!(matches!(result, Err(GenerateError::MissingFields)));
}

#[test]
fn parse_request_checks_platform_before_knowledge_base_shape() {
    let result = parse_request(br#"{"platform":"facebook","knowledgeBase":{"topics":"oops"}}"#);
    assert!(matches!(result, Err(GenerateError::InvalidPlatform(ref p)) if p == "facebook"));
}

#[test]
fn parse_request_wrong_knowledge_base_shape_is_malformed() {
    let result = parse_request(br#"{"platform":"twitter","knowledgeBase":{"topics":"oops"}}"#);
    assert!(matches!(result, Err(GenerateError::MalformedRequest(_))));
}

#[test]
fn parse_request_empty_topics_is_invalid_knowledge_base() {
    let result = parse_request(
        br#"{"platform":"twitter","knowledgeBase":{"topics":[],"tone":"t","target_audience":"a","hashtags":[]}}"#,
    );
    assert!(matches!(
        result,
        Err(GenerateError::InvalidKnowledgeBase(CoreError::EmptyTopics))
    ));
}

#[test]
fn parse_request_non_json_is_malformed() {
    assert!(matches!(
        parse_request(b"platform=linkedin"),
        Err(GenerateError::MalformedRequest(_))
    ));
}

// -------------------------------------------------------------------------
// Route tests against a wiremock provider
// -------------------------------------------------------------------------

#[tokio::test]
async fn unauthenticated_request_is_rejected_before_body_or_provider() {
    let provider = provider_replying(r#"{"posts":["a"]}"#, 0).await;
    let app = test_app(&provider.uri(), auth());

    // Not even JSON: a 401 here proves the body was never parsed.
    let response = app
        .oneshot(generate_request("definitely not json", None))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": "Unauthorized" })
    );
}

#[tokio::test]
async fn wrong_token_is_rejected() {
    let provider = provider_replying(r#"{"posts":["a"]}"#, 0).await;
    let app = test_app(&provider.uri(), auth());

    let response = app
        .oneshot(generate_request(valid_body("linkedin"), Some("stolen")))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_platform_is_client_error_without_provider_call() {
    let provider = provider_replying(r#"{"posts":["a"]}"#, 0).await;
    let app = test_app(&provider.uri(), auth());

    let response = app
        .oneshot(generate_request(valid_body("facebook"), Some(TOKEN)))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": "Invalid platform" })
    );
}

#[tokio::test]
async fn missing_knowledge_base_is_client_error() {
    let provider = provider_replying(r#"{"posts":["a"]}"#, 0).await;
    let app = test_app(&provider.uri(), auth());

    let response = app
        .oneshot(generate_request(r#"{"platform":"linkedin"}"#, Some(TOKEN)))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": "Missing required fields" })
    );
}

#[tokio::test]
async fn well_formed_provider_output_is_returned_unchanged() {
    let provider = provider_replying(r#"{"posts":["a","b"]}"#, 1).await;
    let app = test_app(&provider.uri(), auth());

    let response = app
        .oneshot(generate_request(valid_body("twitter"), Some(TOKEN)))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "posts": ["a", "b"] })
    );
}

#[tokio::test]
async fn prose_provider_output_is_salvaged_as_single_post() {
    let provider = provider_replying("sorry, I cannot comply", 1).await;
    let app = test_app(&provider.uri(), auth());

    let response = app
        .oneshot(generate_request(valid_body("reddit"), Some(TOKEN)))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Failed to parse AI response");
    assert_eq!(json["posts"], serde_json::json!(["sorry, I cannot comply"]));
}

#[tokio::test]
async fn provider_failure_is_server_error() {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .expect(1)
        .mount(&provider)
        .await;
    let app = test_app(&provider.uri(), auth());

    let response = app
        .oneshot(generate_request(valid_body("linkedin"), Some(TOKEN)))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": "Failed to generate posts" })
    );
}

#[tokio::test]
async fn disabled_auth_serves_anonymous_session() {
    let provider = provider_replying(r#"{"posts":[]}"#, 1).await;
    let app = test_app(&provider.uri(), AuthState::disabled());

    let response = app
        .oneshot(generate_request(valid_body("linkedin"), None))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!({ "posts": [] }));
}
