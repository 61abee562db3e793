use std::str::FromStr;

use lectern::domain::{sanitize_filename, MediaKind, Upload, UploadId, UploadPath, UploadState};

#[test]
fn given_allowed_extensions_when_parsing_then_all_are_recognized() {
    assert_eq!(MediaKind::from_extension("mp3"), Some(MediaKind::Mp3));
    assert_eq!(MediaKind::from_extension("wav"), Some(MediaKind::Wav));
    assert_eq!(MediaKind::from_extension("m4a"), Some(MediaKind::M4a));
    assert_eq!(MediaKind::from_extension("mp4"), Some(MediaKind::Mp4));
}

#[test]
fn given_uppercase_extension_when_parsing_then_recognized() {
    assert_eq!(MediaKind::from_extension("MP4"), Some(MediaKind::Mp4));
    assert_eq!(MediaKind::from_extension("Wav"), Some(MediaKind::Wav));
}

#[test]
fn given_disallowed_extension_when_parsing_then_rejected() {
    assert_eq!(MediaKind::from_extension("pdf"), None);
    assert_eq!(MediaKind::from_extension("mkv"), None);
    assert_eq!(MediaKind::from_extension(""), None);
}

#[test]
fn given_filename_when_parsing_then_last_extension_wins() {
    assert_eq!(
        MediaKind::from_filename("lecture.backup.mp3"),
        Some(MediaKind::Mp3)
    );
    assert_eq!(MediaKind::from_filename("lecture.mp4"), Some(MediaKind::Mp4));
}

#[test]
fn given_filename_without_extension_when_parsing_then_rejected() {
    assert_eq!(MediaKind::from_filename("lecture"), None);
    assert_eq!(MediaKind::from_filename(".mp3"), None);
}

#[test]
fn given_media_kinds_when_checking_video_then_only_mp4_is_video() {
    assert!(MediaKind::Mp4.is_video());
    assert!(!MediaKind::Mp3.is_video());
    assert!(!MediaKind::Wav.is_video());
    assert!(!MediaKind::M4a.is_video());
}

#[test]
fn given_upload_id_when_building_path_then_uses_uuid_prefix() {
    let id = UploadId::new();
    let path = UploadPath::new(&id, "lecture.mp3");
    assert_eq!(path.as_str(), format!("{}/lecture.mp3", id.as_uuid()));
}

#[test]
fn given_plain_filename_when_sanitizing_then_unchanged() {
    assert_eq!(sanitize_filename("lecture-01_v2.mp3"), "lecture-01_v2.mp3");
}

#[test]
fn given_special_characters_when_sanitizing_then_replaced_with_underscores() {
    assert_eq!(sanitize_filename("week #2 recap?.mp4"), "week__2_recap_.mp4");
}

#[test]
fn given_path_components_when_sanitizing_then_only_basename_survives() {
    assert_eq!(sanitize_filename("../../etc/lecture.mp4"), "lecture.mp4");
    assert_eq!(sanitize_filename("C:\\talks\\lecture.wav"), "lecture.wav");
}

#[test]
fn given_nothing_usable_when_sanitizing_then_falls_back_to_placeholder() {
    assert_eq!(sanitize_filename(".."), "upload");
    assert_eq!(sanitize_filename("###"), "upload");
}

#[test]
fn given_special_characters_when_building_path_then_stored_name_is_sanitized() {
    let id = UploadId::new();
    let path = UploadPath::new(&id, "week #2 recap.mp4");
    assert_eq!(
        path.as_str(),
        format!("{}/week__2_recap.mp4", id.as_uuid())
    );
}

#[test]
fn given_upload_state_when_round_tripping_then_preserved() {
    for state in [UploadState::AwaitingAction, UploadState::Completed] {
        assert_eq!(UploadState::from_str(state.as_str()).unwrap(), state);
    }
    assert!(UploadState::from_str("IN_LIMBO").is_err());
}

#[test]
fn given_new_upload_when_created_then_awaits_action() {
    let id = UploadId::new();
    let raw = UploadPath::new(&id, "lecture.mp4");
    let audio = UploadPath::new(&id, "lecture.mp3");
    let upload = Upload::new(id, "lecture.mp4".to_string(), MediaKind::Mp4, raw, audio, 42);

    assert_eq!(upload.state, UploadState::AwaitingAction);
    assert_eq!(upload.size_bytes, 42);
    assert_eq!(upload.created_at, upload.updated_at);
}
