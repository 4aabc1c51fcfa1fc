use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{TaskExtractionProvider, TranscriptionProvider};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{health_handler, split_tasks_handler, transcribe_handler};
use crate::presentation::state::AppState;

pub fn create_router<T, X>(state: AppState<T, X>) -> Router
where
    T: TranscriptionProvider + 'static + ?Sized,
    X: TaskExtractionProvider + 'static + ?Sized,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/transcribe", post(transcribe_handler::<T, X>))
        .route("/split-tasks", post(split_tasks_handler::<T, X>))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
