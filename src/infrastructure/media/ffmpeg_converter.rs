//! ffmpeg-backed media normalization.
//!
//! Strips the video stream from an uploaded container and re-encodes the
//! audio to mp3. Audio inputs pass through untouched.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{ConversionError, MediaConverter};

const VIDEO_EXTENSION: &str = "mp4";
const AUDIO_EXTENSION: &str = "mp3";
const STDERR_LIMIT: usize = 2048;

/// Output location for a normalized input: the `mp4` extension replaced by
/// `mp3`. Anything that is not the video container maps to itself.
pub fn derived_audio_path(input: &Path) -> PathBuf {
    let is_video = input
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(VIDEO_EXTENSION))
        .unwrap_or(false);

    if is_video {
        input.with_extension(AUDIO_EXTENSION)
    } else {
        input.to_path_buf()
    }
}

pub struct FfmpegConverter {
    binary: String,
}

impl FfmpegConverter {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for FfmpegConverter {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

#[async_trait]
impl MediaConverter for FfmpegConverter {
    async fn convert_to_audio(&self, input: &Path) -> Result<PathBuf, ConversionError> {
        if !input.exists() {
            return Err(ConversionError::InputMissing(input.display().to_string()));
        }

        let output = derived_audio_path(input);
        if output == input {
            // Already audio, identity pass-through.
            return Ok(output);
        }

        let mut cmd = Command::new(&self.binary);
        cmd.arg("-y")
            .arg("-i")
            .arg(input)
            .arg("-vn")
            .arg("-acodec")
            .arg(AUDIO_EXTENSION)
            .arg(&output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        tracing::debug!(
            input = %input.display(),
            output = %output.display(),
            "Extracting audio stream with ffmpeg"
        );

        let result = cmd
            .output()
            .await
            .map_err(|e| ConversionError::ToolUnavailable(format!("{}: {}", self.binary, e)))?;

        if !result.status.success() {
            let stderr: String = String::from_utf8_lossy(&result.stderr)
                .chars()
                .take(STDERR_LIMIT)
                .collect();
            let status = result
                .status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "killed by signal".to_string());

            tracing::error!(
                input = %input.display(),
                status = %status,
                "ffmpeg conversion failed"
            );

            return Err(ConversionError::Failed { status, stderr });
        }

        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            "Audio stream extracted"
        );

        Ok(output)
    }
}
