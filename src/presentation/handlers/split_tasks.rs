use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::{TaskExtractionProvider, TranscriptionProvider};
use crate::infrastructure::observability::sanitize_transcript;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct SplitTasksRequest {
    #[serde(default)]
    pub transcript: String,
}

#[derive(Serialize)]
pub struct SplitTasksResponse {
    pub tasks: Vec<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Best-effort by contract: once the transcript passes validation the
/// response is always 200 with a task list, degraded or not.
#[tracing::instrument(skip(state, request))]
pub async fn split_tasks_handler<T, X>(
    State(state): State<AppState<T, X>>,
    Json(request): Json<SplitTasksRequest>,
) -> impl IntoResponse
where
    T: TranscriptionProvider + 'static + ?Sized,
    X: TaskExtractionProvider + 'static + ?Sized,
{
    if request.transcript.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Missing transcript".to_string(),
            }),
        )
            .into_response();
    }

    tracing::debug!(
        transcript = %sanitize_transcript(&request.transcript),
        "Splitting transcript into tasks"
    );

    let tasks = state
        .task_extraction_service
        .extract_tasks(&request.transcript)
        .await;

    (
        StatusCode::OK,
        Json(SplitTasksResponse {
            tasks: tasks.into_vec(),
        }),
    )
        .into_response()
}
