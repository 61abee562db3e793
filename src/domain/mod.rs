mod artifact;
mod media;
mod transcript;
mod upload_path;

pub use artifact::{ArtifactKind, GeneratedArtifact, LectureNotes};
pub use media::{MediaKind, Upload, UploadId, UploadState};
pub use transcript::Transcript;
pub use upload_path::{sanitize_filename, UploadPath};
