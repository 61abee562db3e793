use super::Transcript;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Summary,
    Quiz,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Summary => "summary",
            ArtifactKind::Quiz => "quiz",
        }
    }
}

/// Text produced by the remote generation service from one templated prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    pub text: String,
}

impl GeneratedArtifact {
    pub fn new(kind: ArtifactKind, text: String) -> Self {
        Self { kind, text }
    }
}

/// The three artifacts of one pipeline run, rendered together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LectureNotes {
    pub transcript: Transcript,
    pub summary: GeneratedArtifact,
    pub quiz: GeneratedArtifact,
}
