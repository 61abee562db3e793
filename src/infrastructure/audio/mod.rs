pub mod audio_decoder;
mod lazy_engine;
mod whisper_engine;

pub use lazy_engine::LazyWhisperEngine;
pub use whisper_engine::{mel_filters_asset, resolve_model_repo, WhisperEngine};
