use lectern::infrastructure::audio::{mel_filters_asset, resolve_model_repo};

#[test]
fn given_bare_tier_when_resolving_then_expands_to_openai_repo() {
    assert_eq!(resolve_model_repo("base"), "openai/whisper-base");
    assert_eq!(resolve_model_repo("medium"), "openai/whisper-medium");
}

#[test]
fn given_full_repo_id_when_resolving_then_passed_through() {
    assert_eq!(
        resolve_model_repo("distil-whisper/distil-large-v3"),
        "distil-whisper/distil-large-v3"
    );
}

#[test]
fn given_80_mel_bins_when_selecting_filter_asset_then_uses_base_banks() {
    assert_eq!(mel_filters_asset(80).unwrap(), "melfilters.bytes");
}

#[test]
fn given_128_mel_bins_when_selecting_filter_asset_then_uses_large_banks() {
    assert_eq!(mel_filters_asset(128).unwrap(), "melfilters128.bytes");
}

#[test]
fn given_unknown_mel_bin_count_when_selecting_filter_asset_then_fails() {
    assert!(mel_filters_asset(96).is_err());
}
