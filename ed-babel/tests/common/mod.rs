//! Shared helpers for the conversion tests.

#![allow(dead_code)]

use ed_babel::assets::{AssetStore, MemoryAssetStore};
use ed_babel::error::AssetError;
use ed_babel::transforms::{ed_to_markdown, markdown_to_ed, EdToMarkdownOptions, MarkdownToEdOptions};
use std::path::PathBuf;

/// Markdown → Ed-XML with an in-memory store.
pub fn md_to_ed(md: &str) -> String {
    markdown_to_ed(md, &MarkdownToEdOptions::default(), &MemoryAssetStore::new())
        .expect("Should convert markdown")
}

/// Ed-XML → Markdown without touching images.
pub fn ed_to_md(ed: &str) -> String {
    let options = EdToMarkdownOptions {
        download_images: false,
        ..Default::default()
    };
    ed_to_markdown(ed, &options, &MemoryAssetStore::new()).expect("Should convert Ed-XML")
}

/// Wrap a body in the Ed document element.
pub fn doc(body: &str) -> String {
    format!("<document version=\"2.0\">{body}</document>")
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture(name: &str) -> String {
    let path = fixture_path(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

/// Store whose every operation fails, like a platform that is down.
pub struct FailingStore;

impl AssetStore for FailingStore {
    fn upload(&self, _bytes: &[u8], _filename: &str) -> Result<String, AssetError> {
        Err(AssetError::Server {
            status: 503,
            message: "unavailable".to_string(),
        })
    }

    fn fetch(&self, _asset_id: &str) -> Result<Vec<u8>, AssetError> {
        Err(AssetError::Server {
            status: 503,
            message: "unavailable".to_string(),
        })
    }
}
