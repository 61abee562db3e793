use std::path::Path;

use lectern::application::ports::{ConversionError, MediaConverter};
use lectern::infrastructure::media::{derived_audio_path, FfmpegConverter};

#[test]
fn given_audio_extensions_when_deriving_then_path_is_unchanged() {
    for name in ["lecture.mp3", "lecture.wav", "lecture.m4a"] {
        let input = Path::new(name);
        assert_eq!(derived_audio_path(input), input);
    }
}

#[test]
fn given_video_extension_when_deriving_then_replaced_with_mp3() {
    assert_eq!(
        derived_audio_path(Path::new("uploads/abc/lecture.mp4")),
        Path::new("uploads/abc/lecture.mp3")
    );
}

#[test]
fn given_uppercase_video_extension_when_deriving_then_replaced() {
    assert_eq!(
        derived_audio_path(Path::new("Lecture.MP4")),
        Path::new("Lecture.mp3")
    );
}

#[test]
fn given_extensionless_path_when_deriving_then_unchanged() {
    let input = Path::new("lecture");
    assert_eq!(derived_audio_path(input), input);
}

#[tokio::test]
async fn given_missing_input_when_converting_then_input_missing_error() {
    let converter = FfmpegConverter::default();
    let error = converter
        .convert_to_audio(Path::new("/nonexistent/lecture.mp4"))
        .await
        .unwrap_err();

    assert!(matches!(error, ConversionError::InputMissing(_)));
}

#[tokio::test]
async fn given_audio_input_when_converting_then_identity_without_spawning_tool() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = dir.path().join("lecture.mp3");
    std::fs::write(&input, b"fake mp3").unwrap();

    // Binary does not exist; identity pass-through must not try to run it.
    let converter = FfmpegConverter::new("definitely-not-a-real-binary");
    let output = converter.convert_to_audio(&input).await.unwrap();

    assert_eq!(output, input);
}

#[tokio::test]
async fn given_unavailable_tool_when_converting_video_then_tool_error_surfaces() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = dir.path().join("lecture.mp4");
    std::fs::write(&input, b"not really a video").unwrap();

    let converter = FfmpegConverter::new("definitely-not-a-real-binary");
    let error = converter.convert_to_audio(&input).await.unwrap_err();

    assert!(matches!(error, ConversionError::ToolUnavailable(_)));
}
