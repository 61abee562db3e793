use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::application::ports::{LlmClient, LlmClientError, MediaConverter, TranscriptionEngine};
use crate::application::services::NotesError;
use crate::domain::UploadId;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct NotesResponse {
    pub upload_id: String,
    pub transcript: String,
    pub summary: String,
    pub quiz: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// The user's explicit generate action: transcribe the staged audio and
/// produce both artifacts. Blocks until all three texts are ready.
#[tracing::instrument(skip(state))]
pub async fn notes_handler<C, T, L>(
    State(state): State<AppState<C, T, L>>,
    Path(upload_id): Path<String>,
) -> impl IntoResponse
where
    C: MediaConverter + 'static,
    T: TranscriptionEngine + 'static,
    L: LlmClient + 'static,
{
    let uuid = match Uuid::parse_str(&upload_id) {
        Ok(u) => u,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Invalid upload ID: {}", upload_id),
                }),
            )
                .into_response();
        }
    };

    let upload = match state.upload_registry.get(UploadId::from_uuid(uuid)).await {
        Some(u) => u,
        None => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Upload not found: {}", upload_id),
                }),
            )
                .into_response();
        }
    };

    let notes = match state.notes_service.generate_notes(&upload).await {
        Ok(n) => n,
        Err(e) => {
            tracing::error!(error = %e, upload_id = %upload_id, "Notes generation failed");
            return (
                status_for(&e),
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
    };

    state.upload_registry.mark_completed(upload.id).await;

    tracing::info!(
        upload_id = %upload_id,
        transcript_chars = notes.transcript.as_str().len(),
        "Lecture notes generated"
    );

    (
        StatusCode::OK,
        Json(NotesResponse {
            upload_id,
            transcript: notes.transcript.into_inner(),
            summary: notes.summary.text,
            quiz: notes.quiz.text,
        }),
    )
        .into_response()
}

/// Distinguishable statuses for the three failure classes: local asset
/// problems, transcription problems, and remote-service problems.
fn status_for(error: &NotesError) -> StatusCode {
    match error {
        NotesError::Storage(_) | NotesError::Transcription(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        NotesError::Generation(LlmClientError::RateLimited) => StatusCode::TOO_MANY_REQUESTS,
        NotesError::Generation(_) => StatusCode::BAD_GATEWAY,
    }
}
