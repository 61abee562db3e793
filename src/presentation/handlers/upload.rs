use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::application::ports::{LlmClient, MediaConverter, TranscriptionEngine};
use crate::domain::{sanitize_filename, MediaKind, Upload, UploadId, UploadPath};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct UploadResponse {
    pub upload_id: String,
    pub filename: String,
    pub state: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Accepts one multipart file, stages it, normalizes video to audio, and
/// leaves the upload awaiting the user's generate action.
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler<C, T, L>(
    State(state): State<AppState<C, T, L>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    C: MediaConverter + 'static,
    T: TranscriptionEngine + 'static,
    L: LlmClient + 'static,
{
    let field = match multipart.next_field().await {
        Ok(Some(f)) => f,
        Ok(None) => {
            tracing::warn!("Upload request with no file");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "No file uploaded".to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read multipart");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read multipart: {}", e),
                }),
            )
                .into_response();
        }
    };

    let filename = match field.file_name() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Uploaded file has no filename".to_string(),
                }),
            )
                .into_response();
        }
    };

    let kind = match MediaKind::from_filename(&filename) {
        Some(k) => k,
        None => {
            tracing::warn!(filename = %filename, "Disallowed file type");
            return (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                Json(ErrorResponse {
                    error: format!(
                        "Unsupported file type: {}. Accepted: mp3, wav, m4a, mp4",
                        filename
                    ),
                }),
            )
                .into_response();
        }
    };

    let data = match field.bytes().await {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read file bytes");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read file: {}", e),
                }),
            )
                .into_response();
        }
    };

    tracing::debug!(filename = %filename, bytes = data.len(), "File data received");

    let upload_id = UploadId::new();
    // Stored under the sanitized name so the store path and the converter's
    // host path never disagree on encoding.
    let filename = sanitize_filename(&filename);
    let raw_path = UploadPath::new(&upload_id, &filename);

    let byte_stream = Box::pin(futures::stream::once(async move {
        Ok::<_, std::io::Error>(data)
    }));
    let size_bytes = match state.upload_store.store(&raw_path, byte_stream).await {
        Ok(size) => size,
        Err(e) => {
            tracing::error!(error = %e, "Failed to stage upload");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to store upload: {}", e),
                }),
            )
                .into_response();
        }
    };

    // Normalization: video gets its audio stream extracted next to the
    // original; audio is an identity pass-through.
    let audio_path = if kind.is_video() {
        let input = state.settings.uploads.directory.join(raw_path.as_str());
        let output = match state.media_converter.convert_to_audio(&input).await {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(error = %e, "Media normalization failed");
                return (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorResponse {
                        error: format!("Audio extraction failed: {}", e),
                    }),
                )
                    .into_response();
            }
        };
        let audio_filename = output
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(filename.as_str())
            .to_string();
        UploadPath::new(&upload_id, &audio_filename)
    } else {
        raw_path.clone()
    };

    // The audio asset must exist and be readable before transcription can
    // ever be requested.
    if let Err(e) = state.upload_store.head(&audio_path).await {
        tracing::error!(error = %e, audio_path = %audio_path, "Audio asset missing after normalization");
        return (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: format!("Audio asset unavailable: {}", e),
            }),
        )
            .into_response();
    }

    let upload = Upload::new(upload_id, filename, kind, raw_path, audio_path, size_bytes);
    let response = UploadResponse {
        upload_id: upload.id.as_uuid().to_string(),
        filename: upload.filename.clone(),
        state: upload.state.as_str().to_string(),
        message: "File uploaded successfully".to_string(),
    };

    state.upload_registry.register(upload).await;

    tracing::info!(
        upload_id = %response.upload_id,
        filename = %response.filename,
        "Upload staged and awaiting generate action"
    );

    (StatusCode::CREATED, Json(response)).into_response()
}
