use std::sync::Arc;

use crate::application::ports::{LlmClient, MediaConverter, TranscriptionEngine, UploadStore};
use crate::application::services::{NotesService, UploadRegistry};
use crate::presentation::config::Settings;

pub struct AppState<C, T, L>
where
    C: MediaConverter,
    T: TranscriptionEngine,
    L: LlmClient,
{
    pub notes_service: Arc<NotesService<T, L>>,
    pub media_converter: Arc<C>,
    pub upload_store: Arc<dyn UploadStore>,
    pub upload_registry: Arc<UploadRegistry>,
    pub settings: Settings,
}

impl<C, T, L> Clone for AppState<C, T, L>
where
    C: MediaConverter,
    T: TranscriptionEngine,
    L: LlmClient,
{
    fn clone(&self) -> Self {
        Self {
            notes_service: Arc::clone(&self.notes_service),
            media_converter: Arc::clone(&self.media_converter),
            upload_store: Arc::clone(&self.upload_store),
            upload_registry: Arc::clone(&self.upload_registry),
            settings: self.settings.clone(),
        }
    }
}
