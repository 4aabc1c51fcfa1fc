use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::routing::{get, post};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use voicetasks::application::ports::{TaskExtractionError, TaskExtractionProvider};
use voicetasks::domain::Transcript;
use voicetasks::infrastructure::extraction::AssemblyAiTaskExtractor;
use voicetasks::infrastructure::jobs::JobPoller;

const POLL_INTERVAL: Duration = Duration::from_millis(10);
const MAX_WAIT: Duration = Duration::from_secs(5);

async fn start_mock_server(job_body: serde_json::Value) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new()
        .route(
            "/v2/analysis",
            post(|| async { Json(json!({"id": "analysis-7", "status": "queued"})) }),
        )
        .route(
            "/v2/analysis/{id}",
            get(move || {
                let job_body = job_body.clone();
                async move { Json(job_body) }
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

fn extractor(base_url: String) -> AssemblyAiTaskExtractor {
    AssemblyAiTaskExtractor::new(
        "test-key".to_string(),
        Some(base_url),
        JobPoller::new(POLL_INTERVAL, MAX_WAIT),
        CancellationToken::new(),
    )
}

fn transcript() -> Transcript {
    Transcript::new("plan the offsite with Alice and Bob").expect("non-empty")
}

#[tokio::test]
async fn given_entities_and_chapters_when_extracting_then_derives_union_in_first_seen_order() {
    let (base_url, shutdown_tx) = start_mock_server(json!({
        "status": "completed",
        "entities": [
            { "text": "Email Bob" },
            { "text": "the dog" },
            { "text": "Email Bob" },
        ],
        "chapters": [
            { "summary": "Book flights for the conference" },
        ],
    }))
    .await;

    let result = extractor(base_url).extract(&transcript()).await;

    assert_eq!(
        result.unwrap(),
        ["Email Bob", "Book flights for the conference"]
    );
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_lowercase_entities_only_when_extracting_then_returns_empty_list() {
    let (base_url, shutdown_tx) = start_mock_server(json!({
        "status": "completed",
        "entities": [
            { "text": "the kitchen" },
            { "text": "a reminder" },
        ],
        "chapters": [],
    }))
    .await;

    let result = extractor(base_url).extract(&transcript()).await;

    assert!(result.unwrap().is_empty());
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_more_candidates_than_cap_when_extracting_then_truncates_to_fifteen() {
    let entities: Vec<serde_json::Value> = (1..=20)
        .map(|i| json!({"text": format!("Task number {}", i)}))
        .collect();
    let (base_url, shutdown_tx) = start_mock_server(json!({
        "status": "completed",
        "entities": entities,
        "chapters": [],
    }))
    .await;

    let result = extractor(base_url).extract(&transcript()).await;

    let tasks = result.unwrap();
    assert_eq!(tasks.len(), 15);
    assert_eq!(tasks[0], "Task number 1");
    assert_eq!(tasks[14], "Task number 15");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_job_reports_error_when_extracting_then_fails_with_provider_detail() {
    let (base_url, shutdown_tx) = start_mock_server(json!({
        "status": "error",
        "error": "enrichment model unavailable",
    }))
    .await;

    let result = extractor(base_url).extract(&transcript()).await;

    assert!(matches!(
        result,
        Err(TaskExtractionError::Provider(message))
            if message.contains("enrichment model unavailable")
    ));
    shutdown_tx.send(()).ok();
}
