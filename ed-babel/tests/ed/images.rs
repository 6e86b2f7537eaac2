//! Image upload during Markdown → Ed-XML.

use crate::common::{doc, FailingStore};
use ed_babel::assets::MemoryAssetStore;
use ed_babel::error::FormatError;
use ed_babel::transforms::{markdown_to_ed, MarkdownToEdOptions};
use tempfile::TempDir;

fn options_in(dir: &TempDir) -> MarkdownToEdOptions {
    MarkdownToEdOptions {
        base_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    }
}

#[test]
fn test_local_image_is_uploaded_with_dimensions() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("fig.png"), b"\x89PNG fake").unwrap();
    let store = MemoryAssetStore::new();

    let ed = markdown_to_ed(
        "{width=\"300\"}\n![Figure](fig.png)\n",
        &options_in(&dir),
        &store,
    )
    .unwrap();

    assert_eq!(
        ed,
        doc(concat!(
            "<figure>",
            r#"<image src="https://static.au.edusercontent.com/files/asset-1" alt="Figure" width="300"/>"#,
            "</figure>"
        ))
    );
    assert_eq!(
        store.uploads(),
        vec![("asset-1".to_string(), "fig.png".to_string())]
    );
}

#[test]
fn test_same_image_twice_uploads_twice() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.png"), b"a").unwrap();
    let store = MemoryAssetStore::new();

    markdown_to_ed(
        "![one](a.png)\n\n![two](a.png)\n",
        &options_in(&dir),
        &store,
    )
    .unwrap();
    assert_eq!(store.uploads().len(), 2);
}

#[test]
fn test_paragraph_with_image_loses_its_wrapper() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.png"), b"a").unwrap();

    let ed = markdown_to_ed(
        "See ![pic](a.png)",
        &options_in(&dir),
        &MemoryAssetStore::new(),
    )
    .unwrap();
    assert!(!ed.contains("<paragraph>"));
    assert!(ed.starts_with(r#"<document version="2.0">See <figure>"#));
}

#[test]
fn test_remote_image_is_kept() {
    let store = MemoryAssetStore::new();
    let ed = markdown_to_ed(
        "![logo](https://example.org/logo.png)",
        &MarkdownToEdOptions::default(),
        &store,
    )
    .unwrap();
    assert!(ed.contains(r#"<image src="https://example.org/logo.png" alt="logo"/>"#));
    assert!(store.uploads().is_empty());
}

#[test]
fn test_custom_asset_base_url() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.png"), b"a").unwrap();
    let options = MarkdownToEdOptions {
        asset_base_url: "https://static.us.edusercontent.com/".to_string(),
        base_dir: Some(dir.path().to_path_buf()),
    };

    let ed = markdown_to_ed("![a](a.png)", &options, &MemoryAssetStore::new()).unwrap();
    assert!(ed.contains(r#"src="https://static.us.edusercontent.com/files/asset-1""#));
}

#[test]
fn test_missing_file_aborts_render() {
    let dir = TempDir::new().unwrap();
    let err = markdown_to_ed(
        "Intro\n\n![gone](missing.png)\n",
        &options_in(&dir),
        &MemoryAssetStore::new(),
    )
    .unwrap_err();

    match err {
        FormatError::ImageRead { path, .. } => assert_eq!(path, dir.path().join("missing.png")),
        other => panic!("Expected ImageRead, got {other:?}"),
    }
}

#[test]
fn test_failed_upload_aborts_render() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.png"), b"a").unwrap();

    let err = markdown_to_ed("![a](a.png)", &options_in(&dir), &FailingStore).unwrap_err();
    assert!(matches!(err, FormatError::AssetUpload { ref path, .. } if path == "a.png"));
    assert_eq!(
        err.to_string(),
        "Failed to upload image 'a.png': Server error (503): unavailable"
    );
}
