use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::UploadPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UploadId(Uuid);

impl UploadId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for UploadId {
    fn default() -> Self {
        Self::new()
    }
}

/// Media container accepted by the upload surface. `Mp4` is the only
/// video container; everything else is passed to transcription as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Mp3,
    Wav,
    M4a,
    Mp4,
}

impl MediaKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "mp3" => Some(Self::Mp3),
            "wav" => Some(Self::Wav),
            "m4a" => Some(Self::M4a),
            "mp4" => Some(Self::Mp4),
            _ => None,
        }
    }

    pub fn from_filename(filename: &str) -> Option<Self> {
        filename.rsplit_once('.').and_then(|(stem, ext)| {
            if stem.is_empty() {
                None
            } else {
                Self::from_extension(ext)
            }
        })
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::M4a => "m4a",
            Self::Mp4 => "mp4",
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, Self::Mp4)
    }
}

/// Lifecycle of one upload as observed by the registry. The transitions
/// between the two states happen inside a single notes request; the pause
/// at `AwaitingAction` is the user deciding when to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadState {
    AwaitingAction,
    Completed,
}

impl UploadState {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadState::AwaitingAction => "AWAITING_ACTION",
            UploadState::Completed => "COMPLETED",
        }
    }
}

impl FromStr for UploadState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AWAITING_ACTION" => Ok(UploadState::AwaitingAction),
            "COMPLETED" => Ok(UploadState::Completed),
            _ => Err(format!("Invalid upload state: {}", s)),
        }
    }
}

impl fmt::Display for UploadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One registered lecture upload. `raw_path` is the bytes as received;
/// `audio_path` is the normalized audio asset (equal to `raw_path` unless
/// the upload was video).
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub id: UploadId,
    pub filename: String,
    pub kind: MediaKind,
    pub raw_path: UploadPath,
    pub audio_path: UploadPath,
    pub size_bytes: u64,
    pub state: UploadState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Upload {
    pub fn new(
        id: UploadId,
        filename: String,
        kind: MediaKind,
        raw_path: UploadPath,
        audio_path: UploadPath,
        size_bytes: u64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            filename,
            kind,
            raw_path,
            audio_path,
            size_bytes,
            state: UploadState::AwaitingAction,
            created_at: now,
            updated_at: now,
        }
    }
}
