//! Markdown parsing (Markdown → Ed tree)
//!
//! Pipeline: Markdown string → alias normalization → block attribute extraction → Comrak AST →
//! Ed tree. Images are uploaded through the [`AssetStore`] while the tree is built, and the
//! Ed tree refers to them by their remote URL.

use std::path::{Path, PathBuf};

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};
use tracing::debug;

use super::attributes::{extract_block_attributes, AttributeMap, BlockAttributes};
use crate::assets::{asset_url, AssetStore, DEFAULT_STATIC_URL};
use crate::common::aliases::normalize_for_markdown_input;
use crate::error::FormatError;
use crate::ir::nodes::{EdNode, EdTag, ImageRef, ListStyle};

/// Options for converting Markdown to Ed-XML.
#[derive(Debug, Clone)]
pub struct MarkdownToEdOptions {
    /// Base URL uploaded images are served from
    pub asset_base_url: String,
    /// Directory relative image paths are resolved against (the current directory if unset)
    pub base_dir: Option<PathBuf>,
}

impl Default for MarkdownToEdOptions {
    fn default() -> Self {
        Self {
            asset_base_url: DEFAULT_STATIC_URL.to_string(),
            base_dir: None,
        }
    }
}

/// Class marking a paragraph as a callout.
const CALLOUT_CLASS: &str = "callout";
const DEFAULT_CALLOUT_TYPE: &str = "info";
/// `id` of the single file inside a generated snippet.
const SNIPPET_FILE_ID: &str = "code";

/// Parse Markdown into an Ed tree, uploading every local image it references.
///
/// Fails if an image cannot be read or uploaded; nothing is returned for a partial document.
pub fn parse_from_markdown(
    source: &str,
    options: &MarkdownToEdOptions,
    store: &dyn AssetStore,
) -> Result<EdNode, FormatError> {
    let normalized = normalize_for_markdown_input(source);
    let (cleaned, attributes) = extract_block_attributes(&normalized);

    let arena = Arena::new();
    let comrak_options = default_comrak_options();
    let root = parse_document(&arena, &cleaned, &comrak_options);

    let mut importer = Importer {
        options,
        store,
        attributes,
        figure_attributes: None,
    };
    let children = importer.convert_children(root)?;
    Ok(EdNode::element(EdTag::Document, children))
}

fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.math_dollars = true;
    options
}

struct Importer<'o> {
    options: &'o MarkdownToEdOptions,
    store: &'o dyn AssetStore,
    attributes: AttributeMap,
    /// Attributes of the paragraph whose images are being converted
    figure_attributes: Option<BlockAttributes>,
}

impl Importer<'_> {
    fn convert_children<'a>(&mut self, node: &'a AstNode<'a>) -> Result<Vec<EdNode>, FormatError> {
        let mut out = Vec::new();
        for child in node.children() {
            self.convert_node(child, &mut out)?;
        }
        Ok(out)
    }

    fn convert_node<'a>(
        &mut self,
        node: &'a AstNode<'a>,
        out: &mut Vec<EdNode>,
    ) -> Result<(), FormatError> {
        let data = node.data.borrow();
        let line = data.sourcepos.start.line;

        match &data.value {
            NodeValue::Document => out.extend(self.convert_children(node)?),

            NodeValue::Paragraph => self.convert_paragraph(node, line, out)?,

            NodeValue::Heading(heading) => {
                let tag = EdTag::Heading {
                    level: heading.level as usize,
                };
                out.push(EdNode::element(tag, self.convert_children(node)?));
            }

            NodeValue::Strong => out.push(EdNode::element(EdTag::Bold, self.convert_children(node)?)),
            NodeValue::Emph => out.push(EdNode::element(EdTag::Italic, self.convert_children(node)?)),

            NodeValue::Link(link) => {
                let tag = EdTag::Link {
                    href: link.url.clone(),
                };
                out.push(EdNode::element(tag, self.convert_children(node)?));
            }

            NodeValue::List(list) => {
                let style = match list.list_type {
                    ListType::Ordered => ListStyle::Number,
                    ListType::Bullet => ListStyle::Bullet,
                };
                out.push(EdNode::element(
                    EdTag::List { style },
                    self.convert_children(node)?,
                ));
            }
            NodeValue::Item(_) => {
                out.push(EdNode::element(EdTag::ListItem, self.convert_children(node)?))
            }

            NodeValue::CodeBlock(code) => {
                out.push(code_block(&code.info, &code.literal));
            }

            NodeValue::Code(code) => {
                out.push(EdNode::element(
                    EdTag::Code,
                    vec![EdNode::text(code.literal.clone())],
                ));
            }

            NodeValue::Math(math) => {
                let text = if math.display_math {
                    format!("$${}$$", math.literal)
                } else {
                    format!("${}$", math.literal)
                };
                out.push(EdNode::text(text));
            }

            NodeValue::Image(link) => {
                let alt = collect_text(node);
                out.push(self.upload_image(&link.url, alt)?);
            }

            NodeValue::Text(text) => out.push(EdNode::text(text.clone())),
            NodeValue::SoftBreak => out.push(EdNode::text(" ")),
            NodeValue::LineBreak => out.push(EdNode::element(EdTag::Break, vec![])),

            NodeValue::HtmlInline(html) => out.push(EdNode::Raw(html.clone())),
            NodeValue::HtmlBlock(html) => out.push(EdNode::Raw(html.literal.clone())),

            NodeValue::Table(_) => out.push(self.convert_table(node)?),

            other => {
                debug!(node = ?other, line, "Unhandled Markdown node, rendering its children");
                out.extend(self.convert_children(node)?);
            }
        }
        Ok(())
    }

    fn convert_paragraph<'a>(
        &mut self,
        node: &'a AstNode<'a>,
        line: usize,
        out: &mut Vec<EdNode>,
    ) -> Result<(), FormatError> {
        let attributes = self.attributes.get(&line).cloned();

        // Ed does not allow images inside paragraphs: the wrapper is dropped.
        if node
            .children()
            .any(|child| matches!(child.data.borrow().value, NodeValue::Image(_)))
        {
            let previous = std::mem::replace(&mut self.figure_attributes, attributes);
            let children = self.convert_children(node);
            self.figure_attributes = previous;
            out.extend(children?);
            return Ok(());
        }

        if let Some(literal) = sole_display_math(node) {
            out.push(EdNode::element(EdTag::Paragraph, vec![EdNode::text("$$")]));
            out.push(EdNode::element(EdTag::Paragraph, vec![EdNode::text(literal)]));
            return Ok(());
        }

        let tag = match &attributes {
            Some(attrs) if attrs.has_class(CALLOUT_CLASS) => EdTag::Callout {
                kind: attrs.get("type").unwrap_or(DEFAULT_CALLOUT_TYPE).to_string(),
            },
            _ => EdTag::Paragraph,
        };
        out.push(EdNode::element(tag, self.convert_children(node)?));
        Ok(())
    }

    fn convert_table<'a>(&mut self, node: &'a AstNode<'a>) -> Result<EdNode, FormatError> {
        let mut head = Vec::new();
        let mut body = Vec::new();

        for row in node.children() {
            let header = matches!(row.data.borrow().value, NodeValue::TableRow(true));
            let mut cells = Vec::new();
            for cell in row.children() {
                cells.push(EdNode::element(
                    EdTag::TableCell { header },
                    self.convert_children(cell)?,
                ));
            }
            let row = EdNode::element(EdTag::TableRow, cells);
            if header {
                head.push(row);
            } else {
                body.push(row);
            }
        }

        let mut sections = vec![EdNode::element(EdTag::TableHead, head)];
        if !body.is_empty() {
            sections.push(EdNode::element(EdTag::TableBody, body));
        }
        Ok(EdNode::element(EdTag::Table, sections))
    }

    fn upload_image(&mut self, url: &str, alt: String) -> Result<EdNode, FormatError> {
        let src = if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            let path = self.resolve(url);
            let bytes = std::fs::read(&path).map_err(|source| FormatError::ImageRead {
                path: path.clone(),
                source,
            })?;
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| url.to_string());

            let id = self
                .store
                .upload(&bytes, &filename)
                .map_err(|source| FormatError::AssetUpload {
                    path: url.to_string(),
                    source,
                })?;
            debug!(path = %path.display(), id = %id, "Uploaded image");
            asset_url(&self.options.asset_base_url, &id)
        };

        let attrs = self.figure_attributes.as_ref();
        let image = ImageRef {
            src,
            alt,
            width: attrs.and_then(|a| a.get("width")).map(str::to_string),
            height: attrs.and_then(|a| a.get("height")).map(str::to_string),
        };
        Ok(EdNode::element(
            EdTag::Figure,
            vec![EdNode::element(EdTag::Image(image), vec![])],
        ))
    }

    fn resolve(&self, url: &str) -> PathBuf {
        let path = Path::new(url);
        match &self.options.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Build a `<pre>` (no info string) or a `<snippet>` (info string `lang.key="value"…`).
fn code_block(info: &str, literal: &str) -> EdNode {
    let info = info.trim();
    if info.is_empty() {
        let code = literal.trim_end_matches('\n');
        return EdNode::element(EdTag::Pre, vec![EdNode::text(code)]);
    }

    let mut fields = split_info(info).into_iter();
    let language = fields.next().unwrap_or_default();
    let extra = fields.filter_map(|field| parse_snippet_attribute(&field)).collect();

    let code = literal.trim_matches('\n');
    EdNode::element(
        EdTag::Snippet { language, extra },
        vec![EdNode::element(
            EdTag::SnippetFile {
                id: SNIPPET_FILE_ID.to_string(),
            },
            vec![EdNode::text(code)],
        )],
    )
}

/// Split an info string on `.` outside double quotes, dropping empty fields.
fn split_info(info: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in info.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            '.' if !in_quotes => {
                if !current.is_empty() {
                    fields.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        fields.push(current);
    }
    fields
}

/// `key="value"`, `key=value` or a bare `key` (meaning `key="true"`).
fn parse_snippet_attribute(field: &str) -> Option<(String, String)> {
    let field = field.trim();
    if field.is_empty() {
        return None;
    }
    match field.split_once('=') {
        Some((key, value)) => {
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            Some((key.trim().to_string(), value.to_string()))
        }
        None => Some((field.to_string(), "true".to_string())),
    }
}

/// Literal of a paragraph consisting of nothing but one display-math span.
fn sole_display_math<'a>(node: &'a AstNode<'a>) -> Option<String> {
    let mut children = node.children();
    let first = children.next()?;
    if children.next().is_some() {
        return None;
    }
    match &first.data.borrow().value {
        NodeValue::Math(math) if math.display_math => Some(math.literal.trim().to_string()),
        _ => None,
    }
}

fn collect_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut out = String::new();
    collect_text_into(node, &mut out);
    out
}

fn collect_text_into<'a>(node: &'a AstNode<'a>, out: &mut String) {
    for child in node.children() {
        match &child.data.borrow().value {
            NodeValue::Text(text) => out.push_str(text),
            NodeValue::Code(code) => out.push_str(&code.literal),
            NodeValue::SoftBreak | NodeValue::LineBreak => out.push(' '),
            _ => collect_text_into(child, out),
        }
    }
}
