//! Image download during Ed-XML → Markdown.

use crate::common::{doc, FailingStore};
use ed_babel::assets::MemoryAssetStore;
use ed_babel::transforms::{
    ed_to_markdown, ed_to_markdown_with_images, EdToMarkdownOptions, ImageAllocator,
};
use tempfile::TempDir;

fn figure(id: &str, alt: &str) -> String {
    format!(
        r#"<figure><image src="https://static.au.edusercontent.com/files/{id}" alt="{alt}" width="300"/></figure>"#
    )
}

fn options_into(dir: &TempDir) -> EdToMarkdownOptions {
    EdToMarkdownOptions {
        asset_folder: dir.path().to_path_buf(),
        ..Default::default()
    }
}

#[test]
fn test_image_is_downloaded_and_linked() {
    let dir = TempDir::new().unwrap();
    let store = MemoryAssetStore::new();
    store.insert("abc", b"png bytes".to_vec());

    let md = ed_to_markdown(&doc(&figure("abc", "diagram")), &options_into(&dir), &store).unwrap();

    assert_eq!(md, "![diagram](image0.png)");
    assert_eq!(
        std::fs::read(dir.path().join("image0.png")).unwrap(),
        b"png bytes"
    );
}

#[test]
fn test_failed_download_renders_empty() {
    let dir = TempDir::new().unwrap();
    let ed = doc(&format!(
        "<paragraph>Before</paragraph>{}<paragraph>After</paragraph>",
        figure("missing", "x")
    ));

    let md = ed_to_markdown(&ed, &options_into(&dir), &MemoryAssetStore::new()).unwrap();
    assert_eq!(md, "Before\n\n\n\nAfter");

    let md = ed_to_markdown(&ed, &options_into(&dir), &FailingStore).unwrap();
    assert_eq!(md, "Before\n\n\n\nAfter");
}

#[test]
fn test_unwritable_folder_renders_empty() {
    let dir = TempDir::new().unwrap();
    let store = MemoryAssetStore::new();
    store.insert("abc", b"x".to_vec());
    let options = EdToMarkdownOptions {
        asset_folder: dir.path().join("does-not-exist"),
        ..Default::default()
    };

    let md = ed_to_markdown(&doc(&figure("abc", "x")), &options, &store).unwrap();
    assert_eq!(md, "");
}

#[test]
fn test_downloads_disabled_skips_store() {
    let dir = TempDir::new().unwrap();
    let options = EdToMarkdownOptions {
        download_images: false,
        ..options_into(&dir)
    };

    let md = ed_to_markdown(&doc(&figure("abc", "x")), &options, &FailingStore).unwrap();
    assert_eq!(md, "");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_numbering_is_scoped_per_call() {
    let dir = TempDir::new().unwrap();
    let store = MemoryAssetStore::new();
    store.insert("a", b"a".to_vec());
    store.insert("b", b"b".to_vec());
    let ed = doc(&format!("{}{}", figure("a", "first"), figure("b", "second")));

    let md = ed_to_markdown(&ed, &options_into(&dir), &store).unwrap();
    assert_eq!(md, "![first](image0.png)\n\n![second](image1.png)");

    let again = ed_to_markdown(&ed, &options_into(&dir), &store).unwrap();
    assert_eq!(again, md);
}

#[test]
fn test_shared_allocator_avoids_collisions() {
    let dir = TempDir::new().unwrap();
    let store = MemoryAssetStore::new();
    store.insert("a", b"a".to_vec());
    let ed = doc(&figure("a", "pic"));
    let mut images = ImageAllocator::new();

    let first = ed_to_markdown_with_images(&ed, &options_into(&dir), &store, &mut images).unwrap();
    let second = ed_to_markdown_with_images(&ed, &options_into(&dir), &store, &mut images).unwrap();

    assert_eq!(first, "![pic](image0.png)");
    assert_eq!(second, "![pic](image1.png)");
    assert_eq!(images.allocated(), 2);
}

#[test]
fn test_links_are_relative_to_document_dir() {
    let dir = TempDir::new().unwrap();
    let assets = dir.path().join("assets");
    std::fs::create_dir(&assets).unwrap();
    let store = MemoryAssetStore::new();
    store.insert("abc", b"x".to_vec());
    let options = EdToMarkdownOptions {
        asset_folder: assets,
        document_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    };

    let md = ed_to_markdown(&doc(&figure("abc", "x")), &options, &store).unwrap();
    assert_eq!(md, "![x](assets/image0.png)");
}

#[test]
fn test_src_extension_is_kept() {
    let dir = TempDir::new().unwrap();
    let store = MemoryAssetStore::new();
    store.insert("photo.jpg", b"x".to_vec());
    let ed = doc(r#"<figure><image src="https://static.au.edusercontent.com/files/photo.jpg" alt="p"/></figure>"#);

    let md = ed_to_markdown(&ed, &options_into(&dir), &store).unwrap();
    assert_eq!(md, "![p](image0.jpg)");
}
