mod llm_client;
mod media_converter;
mod transcription_engine;
mod upload_store;

pub use llm_client::{LlmClient, LlmClientError};
pub use media_converter::{ConversionError, MediaConverter};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
pub use upload_store::{UploadStore, UploadStoreError};
