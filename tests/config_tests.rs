// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use camera_widget::Config;
use camera_widget::config::PhotoOutputFormat;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.storage_key, "camera-gallery");
    assert_eq!(config.zoom_step, 0.5);
    assert_eq!(config.photo_format, PhotoOutputFormat::Jpeg);
    assert!(
        !config.start_facing_front,
        "Back camera should open first by default"
    );
}

#[test]
fn test_config_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/config.json");

    let config = Config {
        storage_key: "other-slot".to_string(),
        photo_format: PhotoOutputFormat::Png,
        jpeg_quality: 70,
        ..Config::default()
    };
    config.save_to(&path).unwrap();

    assert_eq!(Config::load_from(&path), config);
}

#[test]
fn test_missing_or_invalid_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    assert_eq!(Config::load_from(&missing), Config::default());

    let invalid = dir.path().join("invalid.json");
    std::fs::write(&invalid, "{ not json").unwrap();
    assert_eq!(Config::load_from(&invalid), Config::default());
}

#[test]
fn test_partial_config_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "zoom_step": 0.25 }"#).unwrap();

    let config = Config::load_from(&path);
    assert_eq!(config.zoom_step, 0.25);
    assert_eq!(config.storage_key, "camera-gallery");
}

#[test]
fn test_explicit_download_dir() {
    let config = Config {
        download_dir: Some("/tmp/photos".into()),
        ..Config::default()
    };
    assert_eq!(config.download_dir(), std::path::PathBuf::from("/tmp/photos"));
}
