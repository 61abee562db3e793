use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{LlmClient, MediaConverter, TranscriptionEngine};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    health_handler, index_handler, notes_handler, upload_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<C, T, L>(state: AppState<C, T, L>) -> Router
where
    C: MediaConverter + 'static,
    T: TranscriptionEngine + 'static,
    L: LlmClient + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/v1/uploads", post(upload_handler::<C, T, L>))
        .route(
            "/api/v1/uploads/{upload_id}/notes",
            post(notes_handler::<C, T, L>),
        )
        // Lecture recordings are large; no local size limit is enforced.
        .layer(DefaultBodyLimit::disable())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
