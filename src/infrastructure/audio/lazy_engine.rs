use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

use super::WhisperEngine;

/// Defers the expensive Whisper model load to the first transcription call
/// and guarantees it happens exactly once, even under concurrent first
/// requests. The handle is written once and read-only afterwards.
pub struct LazyWhisperEngine {
    model: String,
    engine: OnceCell<WhisperEngine>,
}

impl LazyWhisperEngine {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            engine: OnceCell::new(),
        }
    }

    async fn engine(&self) -> Result<&WhisperEngine, TranscriptionError> {
        self.engine
            .get_or_try_init(|| async {
                let model = self.model.clone();
                tokio::task::spawn_blocking(move || WhisperEngine::load(&model))
                    .await
                    .map_err(|e| {
                        TranscriptionError::ModelLoadFailed(format!("load task: {}", e))
                    })?
            })
            .await
    }
}

#[async_trait]
impl TranscriptionEngine for LazyWhisperEngine {
    async fn transcribe(&self, audio_data: &[u8]) -> Result<String, TranscriptionError> {
        self.engine().await?.transcribe(audio_data).await
    }
}
