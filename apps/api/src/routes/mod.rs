pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::outreach::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/outreach", post(handlers::handle_personalize))
        .route("/api/outreach/follow-up", post(handlers::handle_follow_up))
        .route("/api/outreach/analyze", post(handlers::handle_analyze))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::llm_client::LlmClient;

    fn completion(content: &str) -> Value {
        json!({"choices": [{"message": {"role": "assistant", "content": content}}]})
    }

    fn state_for(server: &MockServer) -> AppState {
        AppState {
            llm: Some(
                LlmClient::new("test-key", "http://localhost:8000")
                    .unwrap()
                    .with_endpoint(server.uri()),
            ),
        }
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        post_raw(app, uri, body.to_string()).await
    }

    async fn post_raw(app: Router, uri: &str, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(AppState { llm: None });
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_personalize_endpoint_returns_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(
                r#"{"personalizedMessage":"Hi Jane","subject":"Quick idea","confidence":0.9}"#,
            )))
            .mount(&server)
            .await;

        let (status, body) = post_json(
            build_router(state_for(&server)),
            "/api/outreach",
            json!({
                "name": "Jane Smith",
                "email": "jane@company.com",
                "message": "Hi there",
                "type": "email",
                "companyName": "Acme"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["originalMessage"], "Hi there");
        assert_eq!(body["data"]["personalizedMessage"], "Hi Jane");
        assert_eq!(body["data"]["subject"], "Quick idea");
        assert_eq!(body["data"]["confidence"], 0.9);
        assert_eq!(body["data"]["outreachType"], "email");
        assert!(body["data"]["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn test_personalize_endpoint_rejects_missing_fields() {
        let (status, body) = post_json(
            build_router(AppState { llm: None }),
            "/api/outreach",
            json!({"name": "Jane", "email": "jane@company.com"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["error"]["message"],
            "Missing required fields: name, email, message, type"
        );
    }

    #[tokio::test]
    async fn test_malformed_body_gets_json_error() {
        let (status, body) = post_raw(
            build_router(AppState { llm: None }),
            "/api/outreach",
            "{not json".to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].as_str().unwrap().contains("JSON"));
    }

    #[tokio::test]
    async fn test_mistyped_body_gets_json_error() {
        let (status, body) = post_json(
            build_router(AppState { llm: None }),
            "/api/outreach/analyze",
            json!({"responseText": 42}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_personalize_endpoint_without_key_is_configuration_error() {
        let (status, body) = post_json(
            build_router(AppState { llm: None }),
            "/api/outreach",
            json!({
                "name": "Jane",
                "email": "jane@company.com",
                "message": "Hi",
                "type": "call"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "CONFIGURATION_ERROR");
    }

    #[tokio::test]
    async fn test_upstream_failure_surfaces_as_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (status, body) = post_json(
            build_router(state_for(&server)),
            "/api/outreach/analyze",
            json!({"responseText": "Not interested"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "LLM_ERROR");
    }

    #[tokio::test]
    async fn test_follow_up_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion("Glad to hear it, Jane.")),
            )
            .mount(&server)
            .await;

        let (status, body) = post_json(
            build_router(state_for(&server)),
            "/api/outreach/follow-up",
            json!({"originalMessage": "Intro", "responseReceived": "Tell me more"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["followUp"], "Glad to hear it, Jane.");
    }

    #[tokio::test]
    async fn test_follow_up_endpoint_rejects_blank_fields() {
        let (status, _) = post_json(
            build_router(AppState { llm: None }),
            "/api/outreach/follow-up",
            json!({"originalMessage": "Intro", "responseReceived": " "}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
