use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};

use crate::application::ports::{
    TaskExtractionProvider, TranscriptionError, TranscriptionProvider,
};
use crate::domain::AudioPayload;
use crate::infrastructure::observability::sanitize_transcript;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct TranscribeRequest {
    #[serde(rename = "audioBase64", default)]
    pub audio_base64: String,
}

#[derive(Serialize)]
pub struct TranscribeResponse {
    pub text: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn transcribe_handler<T, X>(
    State(state): State<AppState<T, X>>,
    Json(request): Json<TranscribeRequest>,
) -> impl IntoResponse
where
    T: TranscriptionProvider + 'static + ?Sized,
    X: TaskExtractionProvider + 'static + ?Sized,
{
    if request.audio_base64.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Missing audioBase64".to_string(),
            }),
        )
            .into_response();
    }

    let data = match general_purpose::STANDARD.decode(request.audio_base64.trim()) {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!(error = %e, "Rejecting undecodable audio payload");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Invalid base64 audio: {}", e),
                }),
            )
                .into_response();
        }
    };

    tracing::debug!(bytes = data.len(), "Audio payload decoded");

    let audio = AudioPayload::new(data, AudioPayload::DEFAULT_MIME_TYPE);

    match state.transcription_service.transcribe(&audio).await {
        Ok(transcript) => {
            tracing::debug!(
                transcript = %sanitize_transcript(transcript.as_str()),
                "Returning transcript"
            );
            (
                StatusCode::OK,
                Json(TranscribeResponse {
                    text: transcript.into_string(),
                }),
            )
                .into_response()
        }
        Err(e @ TranscriptionError::MissingInput) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Transcription failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
