use std::sync::Arc;

use crate::application::ports::{
    LlmClient, LlmClientError, TranscriptionEngine, TranscriptionError, UploadStore,
    UploadStoreError,
};
use crate::domain::{ArtifactKind, GeneratedArtifact, LectureNotes, Transcript, Upload};

use super::prompts;

/// Pipeline orchestrator for one generate-notes action: fetch the audio
/// asset, transcribe it, then run the two generation calls. The calls share
/// only the transcript, so they run concurrently; both must complete before
/// anything is returned.
pub struct NotesService<T, L>
where
    T: TranscriptionEngine,
    L: LlmClient,
{
    upload_store: Arc<dyn UploadStore>,
    transcription_engine: Arc<T>,
    llm_client: Arc<L>,
}

impl<T, L> NotesService<T, L>
where
    T: TranscriptionEngine,
    L: LlmClient,
{
    pub fn new(
        upload_store: Arc<dyn UploadStore>,
        transcription_engine: Arc<T>,
        llm_client: Arc<L>,
    ) -> Self {
        Self {
            upload_store,
            transcription_engine,
            llm_client,
        }
    }

    pub async fn generate_notes(&self, upload: &Upload) -> Result<LectureNotes, NotesError> {
        let audio = self.upload_store.fetch(&upload.audio_path).await?;

        let text = self.transcription_engine.transcribe(&audio).await?;
        let transcript = Transcript::new(text);

        if transcript.is_empty() {
            tracing::warn!(
                upload_id = %upload.id.as_uuid(),
                "Transcript is empty; generation will run on an empty lecture"
            );
        }

        let (summary, quiz) = tokio::join!(
            self.generate(ArtifactKind::Summary, transcript.as_str()),
            self.generate(ArtifactKind::Quiz, transcript.as_str()),
        );

        Ok(LectureNotes {
            transcript,
            summary: summary?,
            quiz: quiz?,
        })
    }

    async fn generate(
        &self,
        kind: ArtifactKind,
        transcript: &str,
    ) -> Result<GeneratedArtifact, NotesError> {
        let prompt = match kind {
            ArtifactKind::Summary => prompts::summary_prompt(transcript),
            ArtifactKind::Quiz => prompts::quiz_prompt(transcript),
        };

        let text = self.llm_client.complete(&prompt).await?;

        tracing::debug!(kind = kind.as_str(), chars = text.len(), "Artifact generated");

        Ok(GeneratedArtifact::new(kind, text))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotesError {
    #[error("audio asset: {0}")]
    Storage(#[from] UploadStoreError),
    #[error("transcription: {0}")]
    Transcription(#[from] TranscriptionError),
    #[error("generation: {0}")]
    Generation(#[from] LlmClientError),
}
