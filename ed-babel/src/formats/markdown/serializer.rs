//! Markdown serialization (Ed tree → Markdown)
//!
//! Every element renders as `open + children.join(join) + close`, with the three fragments
//! looked up in [`crate::ir::layout`]. Links, breaks and images are the exceptions and are
//! rendered directly. Images are optionally downloaded next to the document; a failed download
//! degrades to an empty string instead of failing the conversion.

use std::path::{Path, PathBuf};

use pathdiff::diff_paths;
use tracing::{debug, warn};

use crate::assets::{asset_id_from_src, AssetStore};
use crate::ir::layout::{layout, open_marker, separator_row};
use crate::ir::nodes::{EdElement, EdNode, EdTag, ImageRef};

/// Extensions kept when the image `src` carries one.
const KNOWN_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp"];

/// Options for converting Ed-XML to Markdown.
#[derive(Debug, Clone)]
pub struct EdToMarkdownOptions {
    /// Folder downloaded images are written to
    pub asset_folder: PathBuf,
    /// Download images; when false every image renders as an empty string
    pub download_images: bool,
    /// Extension given to downloaded images whose `src` does not reveal one
    pub image_extension: String,
    /// Directory of the Markdown document, for relative image links
    pub document_dir: Option<PathBuf>,
}

impl Default for EdToMarkdownOptions {
    fn default() -> Self {
        Self {
            asset_folder: PathBuf::from("."),
            download_images: true,
            image_extension: "png".to_string(),
            document_dir: None,
        }
    }
}

/// Hands out local image file names, `image0.png`, `image1.png`, …
///
/// One allocator covers one output folder. Pass the same allocator to several conversions that
/// write into the same folder so their file names do not collide.
#[derive(Debug, Default, Clone)]
pub struct ImageAllocator {
    next: usize,
}

impl ImageAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue numbering at `next`.
    pub fn starting_at(next: usize) -> Self {
        Self { next }
    }

    /// Number of names handed out so far (plus the starting offset).
    pub fn allocated(&self) -> usize {
        self.next
    }

    pub fn next_file_name(&mut self, extension: &str) -> String {
        let name = format!("image{}.{}", self.next, extension);
        self.next += 1;
        name
    }
}

/// Render an Ed tree as Markdown.
pub fn serialize_to_markdown(
    root: &EdNode,
    options: &EdToMarkdownOptions,
    store: &dyn AssetStore,
    images: &mut ImageAllocator,
) -> String {
    let mut renderer = Renderer {
        options,
        store,
        images,
    };
    renderer.render(root, "")
}

struct Renderer<'r> {
    options: &'r EdToMarkdownOptions,
    store: &'r dyn AssetStore,
    images: &'r mut ImageAllocator,
}

impl Renderer<'_> {
    fn render(&mut self, node: &EdNode, parent: &str) -> String {
        match node {
            EdNode::Text(text) => text.clone(),
            EdNode::Raw(markup) => markup.clone(),
            EdNode::Element(element) => self.render_element(element, parent),
        }
    }

    fn render_element(&mut self, element: &EdElement, parent: &str) -> String {
        let tag = &element.tag;
        match tag {
            EdTag::Link { href } => return format!("[{}]({})", link_text(element), href),
            EdTag::Break => return "\n".to_string(),
            EdTag::Image(image) => return self.render_image(image),
            EdTag::Unknown { name } => {
                warn!(tag = %name, parent = %parent, "Unhandled Ed element, rendering its children");
            }
            _ => {}
        }

        let mut blocks: Vec<String> = element
            .children
            .iter()
            .map(|child| self.render(child, tag.name()))
            .collect();

        let layout = layout(tag.kind());
        let mut parts = Vec::with_capacity(blocks.len() + 2);
        if matches!(tag, EdTag::Table) {
            if !blocks.is_empty() {
                let header = blocks.remove(0);
                let separator = separator_row(&header);
                parts.push(header);
                parts.push(separator);
            }
        } else if let Some(open) = open_marker(tag) {
            parts.push(open.into_owned());
        }
        parts.extend(blocks);
        if let Some(close) = layout.close {
            parts.push(close.to_string());
        }
        parts.join(layout.join)
    }

    fn render_image(&mut self, image: &ImageRef) -> String {
        if !self.options.download_images {
            return String::new();
        }

        let extension = extension_of(&image.src)
            .unwrap_or_else(|| self.options.image_extension.clone());
        let file_name = self.images.next_file_name(&extension);

        let Some(asset_id) = asset_id_from_src(&image.src) else {
            warn!(src = %image.src, "Image source has no asset id, skipping");
            return String::new();
        };

        let bytes = match self.store.fetch(&asset_id) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(src = %image.src, error = %e, "Failed to download image, skipping");
                return String::new();
            }
        };

        let path = self.options.asset_folder.join(&file_name);
        if let Err(e) = std::fs::write(&path, &bytes) {
            warn!(path = %path.display(), error = %e, "Failed to write image, skipping");
            return String::new();
        }
        debug!(src = %image.src, path = %path.display(), "Downloaded image");

        let link = match &self.options.document_dir {
            Some(dir) => relative_link(&path, dir),
            None => file_name,
        };
        format!("![{}]({})", image.alt, link)
    }
}

/// Text of a link: its first child's text, or all of its text when the first child is markup.
fn link_text(element: &EdElement) -> String {
    match element.children.first() {
        Some(EdNode::Text(text)) => text.clone(),
        Some(_) => element
            .children
            .iter()
            .map(EdNode::text_content)
            .collect::<String>(),
        None => String::new(),
    }
}

/// Known image extension at the end of `src`'s path, lowercased.
fn extension_of(src: &str) -> Option<String> {
    let path = src.split(['?', '#']).next()?;
    let name = path.rsplit('/').next()?;
    let (_, extension) = name.rsplit_once('.')?;
    let extension = extension.to_ascii_lowercase();
    KNOWN_IMAGE_EXTENSIONS
        .contains(&extension.as_str())
        .then_some(extension)
}

fn relative_link(path: &Path, document_dir: &Path) -> String {
    let relative = diff_paths(path, document_dir).unwrap_or_else(|| path.to_path_buf());
    relative.to_string_lossy().replace('\\', "/")
}
