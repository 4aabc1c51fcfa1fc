use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use base64::{Engine as _, engine::general_purpose};
use tower::ServiceExt;

use voicetasks::application::ports::{
    TaskExtractionError, TaskExtractionProvider, TranscriptionError, TranscriptionProvider,
};
use voicetasks::application::services::{
    TaskExtractionService, TranscriptionService, split_into_tasks,
};
use voicetasks::domain::{AudioPayload, Transcript};
use voicetasks::presentation::{AppState, create_router};

struct FixedTranscriber(&'static str);

#[async_trait::async_trait]
impl TranscriptionProvider for FixedTranscriber {
    async fn transcribe(&self, _audio: &AudioPayload) -> Result<Transcript, TranscriptionError> {
        Ok(Transcript::new(self.0).expect("test transcript is non-empty"))
    }
}

struct FailingTranscriber;

#[async_trait::async_trait]
impl TranscriptionProvider for FailingTranscriber {
    async fn transcribe(&self, _audio: &AudioPayload) -> Result<Transcript, TranscriptionError> {
        Err(TranscriptionError::Provider("upstream exploded".to_string()))
    }
}

struct FixedExtractor(Vec<&'static str>);

#[async_trait::async_trait]
impl TaskExtractionProvider for FixedExtractor {
    async fn extract(
        &self,
        _transcript: &Transcript,
    ) -> Result<Vec<String>, TaskExtractionError> {
        Ok(self.0.iter().map(|t| t.to_string()).collect())
    }
}

struct FailingExtractor;

#[async_trait::async_trait]
impl TaskExtractionProvider for FailingExtractor {
    async fn extract(
        &self,
        _transcript: &Transcript,
    ) -> Result<Vec<String>, TaskExtractionError> {
        Err(TaskExtractionError::Provider("backend down".to_string()))
    }
}

fn create_test_app<T, X>(transcriber: T, extractor: X) -> axum::Router
where
    T: TranscriptionProvider + 'static,
    X: TaskExtractionProvider + 'static,
{
    let state = AppState {
        transcription_service: Arc::new(TranscriptionService::new(Arc::new(transcriber))),
        task_extraction_service: Arc::new(TaskExtractionService::new(Arc::new(extractor))),
    };
    create_router(state)
}

fn default_app() -> axum::Router {
    create_test_app(
        FixedTranscriber("Buy milk and walk the dog"),
        FixedExtractor(vec!["Buy milk", "Walk the dog"]),
    )
}

fn json_post(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn sample_audio_body() -> String {
    let encoded = general_purpose::STANDARD.encode(b"fake audio bytes");
    format!(r#"{{"audioBase64": "{}"}}"#, encoded)
}

#[tokio::test]
async fn given_running_server_when_health_check_then_returns_ok() {
    let app = default_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_valid_audio_when_transcribe_then_returns_text() {
    let app = default_app();

    let response = app
        .oneshot(json_post("/transcribe", sample_audio_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["text"], "Buy milk and walk the dog");
}

#[tokio::test]
async fn given_missing_audio_field_when_transcribe_then_returns_bad_request() {
    let app = default_app();

    let response = app
        .oneshot(json_post("/transcribe", "{}".to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_undecodable_audio_when_transcribe_then_returns_bad_request() {
    let app = default_app();

    let response = app
        .oneshot(json_post(
            "/transcribe",
            r#"{"audioBase64": "!!!not base64!!!"}"#.to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_get_method_when_transcribe_then_returns_method_not_allowed() {
    let app = default_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/transcribe")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn given_provider_failure_when_transcribe_then_returns_server_error_with_detail() {
    let app = create_test_app(FailingTranscriber, FixedExtractor(vec![]));

    let response = app
        .oneshot(json_post("/transcribe", sample_audio_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = response_json(response).await;
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("upstream exploded")
    );
}

#[tokio::test]
async fn given_transcript_when_split_tasks_then_returns_remote_tasks() {
    let app = default_app();

    let response = app
        .oneshot(json_post(
            "/split-tasks",
            r#"{"transcript": "buy milk and walk the dog"}"#.to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["tasks"], serde_json::json!(["Buy milk", "Walk the dog"]));
}

#[tokio::test]
async fn given_missing_transcript_when_split_tasks_then_returns_bad_request() {
    let app = default_app();

    let response = app
        .oneshot(json_post("/split-tasks", "{}".to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_extractor_failure_when_split_tasks_then_degrades_to_fallback_split() {
    let transcript = "call mom, then email the report";
    let app = create_test_app(FixedTranscriber("unused"), FailingExtractor);

    let response = app
        .oneshot(json_post(
            "/split-tasks",
            format!(r#"{{"transcript": "{}"}}"#, transcript),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    let expected = split_into_tasks(transcript).into_vec();
    assert_eq!(json["tasks"], serde_json::json!(expected));
}

#[tokio::test]
async fn given_get_method_when_split_tasks_then_returns_method_not_allowed() {
    let app = default_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/split-tasks")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn given_request_without_id_when_any_endpoint_then_response_contains_request_id() {
    let app = default_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn given_request_with_id_when_any_endpoint_then_response_echoes_request_id() {
    let app = default_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "test-request-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "test-request-123"
    );
}
