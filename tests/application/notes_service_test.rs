use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;

use lectern::application::ports::{
    LlmClient, LlmClientError, TranscriptionEngine, TranscriptionError, UploadStore,
};
use lectern::application::services::{NotesError, NotesService};
use lectern::domain::{MediaKind, Upload, UploadId, UploadPath};
use lectern::infrastructure::storage::LocalUploadStore;

struct FixedTranscriber(&'static str);

#[async_trait]
impl TranscriptionEngine for FixedTranscriber {
    async fn transcribe(&self, _audio_data: &[u8]) -> Result<String, TranscriptionError> {
        Ok(self.0.to_string())
    }
}

/// Echoes the prompt back as the completion, exposing the exact prompt text.
struct EchoLlm;

#[async_trait]
impl LlmClient for EchoLlm {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        Ok(prompt.to_string())
    }
}

struct RefusingLlm;

#[async_trait]
impl LlmClient for RefusingLlm {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmClientError> {
        Err(LlmClientError::Unauthorized("bad key".to_string()))
    }
}

async fn staged_upload(store: &dyn UploadStore) -> Upload {
    let id = UploadId::new();
    let path = UploadPath::new(&id, "lecture.mp3");
    let byte_stream = Box::pin(stream::iter(vec![Ok(Bytes::from_static(b"audio"))]));
    store.store(&path, byte_stream).await.unwrap();
    Upload::new(
        id,
        "lecture.mp3".to_string(),
        MediaKind::Mp3,
        path.clone(),
        path,
        5,
    )
}

fn service<T, L>(
    store: Arc<dyn UploadStore>,
    transcriber: T,
    llm: L,
) -> NotesService<T, L>
where
    T: TranscriptionEngine,
    L: LlmClient,
{
    NotesService::new(store, Arc::new(transcriber), Arc::new(llm))
}

#[tokio::test]
async fn given_transcribed_lecture_when_generating_then_prompts_interpolate_transcript() {
    let dir = tempfile::TempDir::new().unwrap();
    let store: Arc<dyn UploadStore> =
        Arc::new(LocalUploadStore::new(dir.path().to_path_buf()).unwrap());
    let upload = staged_upload(store.as_ref()).await;

    let svc = service(store, FixedTranscriber("hello world"), EchoLlm);
    let notes = svc.generate_notes(&upload).await.unwrap();

    assert_eq!(notes.transcript.as_str(), "hello world");
    assert_eq!(
        notes.summary.text,
        "Summarize the following lecture notes:\nhello world"
    );
    assert_eq!(
        notes.quiz.text,
        "Create 5 quiz questions from this lecture:\nhello world"
    );
}

#[tokio::test]
async fn given_missing_audio_asset_when_generating_then_storage_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let store: Arc<dyn UploadStore> =
        Arc::new(LocalUploadStore::new(dir.path().to_path_buf()).unwrap());

    let id = UploadId::new();
    let path = UploadPath::new(&id, "never-stored.mp3");
    let upload = Upload::new(
        id,
        "never-stored.mp3".to_string(),
        MediaKind::Mp3,
        path.clone(),
        path,
        0,
    );

    let svc = service(store, FixedTranscriber("unused"), EchoLlm);
    let error = svc.generate_notes(&upload).await.unwrap_err();

    assert!(matches!(error, NotesError::Storage(_)));
}

#[tokio::test]
async fn given_rejected_credential_when_generating_then_generation_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let store: Arc<dyn UploadStore> =
        Arc::new(LocalUploadStore::new(dir.path().to_path_buf()).unwrap());
    let upload = staged_upload(store.as_ref()).await;

    let svc = service(store, FixedTranscriber("hello"), RefusingLlm);
    let error = svc.generate_notes(&upload).await.unwrap_err();

    assert!(matches!(
        error,
        NotesError::Generation(LlmClientError::Unauthorized(_))
    ));
}
