use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Derives an audio-only asset from a possibly-video input file.
/// Non-video inputs pass through unchanged.
#[async_trait]
pub trait MediaConverter: Send + Sync {
    async fn convert_to_audio(&self, input: &Path) -> Result<PathBuf, ConversionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("input file not found: {0}")]
    InputMissing(String),
    #[error("media tool unavailable: {0}")]
    ToolUnavailable(String),
    #[error("conversion failed ({status}): {stderr}")]
    Failed { status: String, stderr: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
