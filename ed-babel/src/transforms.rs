//! Top-level conversions
//!
//! These chain a parser and a serializer from [`crate::formats`] and are what the CLI calls.
//!
//! ```ignore
//! use ed_babel::assets::MemoryAssetStore;
//! use ed_babel::transforms::{markdown_to_ed, MarkdownToEdOptions};
//!
//! let ed = markdown_to_ed("# Title", &MarkdownToEdOptions::default(), &MemoryAssetStore::new())?;
//! assert_eq!(ed, r#"<document version="2.0"><heading level="1">Title</heading></document>"#);
//! ```

use crate::assets::AssetStore;
use crate::error::FormatError;
use crate::formats::ed::{parse_from_ed, serialize_to_ed};
use crate::formats::markdown::{parse_from_markdown, serialize_to_markdown};
use crate::ir::tree::tree_to_string;

pub use crate::formats::markdown::{EdToMarkdownOptions, ImageAllocator, MarkdownToEdOptions};

/// Convert Markdown to Ed-XML, uploading referenced images to `store`.
///
/// Any image that cannot be read or uploaded fails the whole conversion.
pub fn markdown_to_ed(
    source: &str,
    options: &MarkdownToEdOptions,
    store: &dyn AssetStore,
) -> Result<String, FormatError> {
    let doc = parse_from_markdown(source, options, store)?;
    Ok(serialize_to_ed(&doc))
}

/// Convert Ed-XML to Markdown, downloading images into the configured folder.
///
/// Image numbering starts at `image0` for every call; use [`ed_to_markdown_with_images`] to
/// share numbering between conversions writing into the same folder.
pub fn ed_to_markdown(
    source: &str,
    options: &EdToMarkdownOptions,
    store: &dyn AssetStore,
) -> Result<String, FormatError> {
    let mut images = ImageAllocator::new();
    ed_to_markdown_with_images(source, options, store, &mut images)
}

/// [`ed_to_markdown`] with caller-owned image numbering.
pub fn ed_to_markdown_with_images(
    source: &str,
    options: &EdToMarkdownOptions,
    store: &dyn AssetStore,
    images: &mut ImageAllocator,
) -> Result<String, FormatError> {
    let doc = parse_from_ed(source)?;
    Ok(serialize_to_markdown(&doc, options, store, images))
}

/// Parse Ed-XML and render its tree visualization.
pub fn ed_to_tree(source: &str) -> Result<String, FormatError> {
    let doc = parse_from_ed(source)?;
    Ok(tree_to_string(&doc))
}
