//! Ed-XML parsing (Ed-XML → Ed tree)

use crate::common::aliases::normalize_for_ed_input;
use crate::common::escape::unescape_code_literal;
use crate::error::FormatError;
use crate::ir::nodes::{EdKind, EdNode, EdTag, ImageRef, ListStyle};
use roxmltree::{Node, NodeType};

/// Parse an Ed-XML document into an Ed tree rooted at its top-level element.
///
/// Link and break aliases are normalized first. Code text inside `<pre>` and `<snippet-file>`
/// has its `\n` escapes decoded, so the tree always holds real newlines.
pub fn parse_from_ed(source: &str) -> Result<EdNode, FormatError> {
    let normalized = normalize_for_ed_input(source);
    let doc = roxmltree::Document::parse(&normalized)
        .map_err(|e| FormatError::ParseError(format!("Ed-XML parsing error: {e}")))?;

    Ok(convert_element(doc.root_element(), false))
}

fn convert_element(node: Node, in_code: bool) -> EdNode {
    let tag = tag_for(node);
    let kind = tag.kind();
    let in_code = in_code || matches!(kind, EdKind::Pre | EdKind::SnippetFile);
    let structural = is_structural(kind);

    let mut children = Vec::new();
    for child in node.children() {
        match child.node_type() {
            NodeType::Element => children.push(convert_element(child, in_code)),
            NodeType::Text => {
                let text = child.text().unwrap_or_default();
                if structural && text.trim().is_empty() {
                    continue;
                }
                if in_code {
                    children.push(EdNode::text(unescape_code_literal(text)));
                } else {
                    children.push(EdNode::text(text));
                }
            }
            _ => {}
        }
    }

    EdNode::element(tag, children)
}

/// Kinds whose direct text children can only be formatting whitespace.
fn is_structural(kind: EdKind) -> bool {
    matches!(
        kind,
        EdKind::Document
            | EdKind::Html
            | EdKind::Head
            | EdKind::Body
            | EdKind::List
            | EdKind::Figure
            | EdKind::Snippet
            | EdKind::Table
            | EdKind::TableHead
            | EdKind::TableBody
            | EdKind::TableRow
    )
}

fn tag_for(node: Node) -> EdTag {
    let name = node.tag_name().name();
    let attr = |key: &str| node.attribute(key).map(str::to_string);

    match EdKind::from_tag_name(name) {
        EdKind::Document => EdTag::Document,
        EdKind::Paragraph => EdTag::Paragraph,
        EdKind::Callout => EdTag::Callout {
            kind: attr("type").unwrap_or_else(|| "info".to_string()),
        },
        EdKind::Bold => EdTag::Bold,
        EdKind::Italic => EdTag::Italic,
        EdKind::Underline => EdTag::Underline,
        EdKind::Code => EdTag::Code,
        EdKind::Pre => EdTag::Pre,
        EdKind::Snippet => EdTag::Snippet {
            language: attr("language").unwrap_or_default(),
            extra: node
                .attributes()
                .filter(|a| a.name() != "language")
                .map(|a| (a.name().to_string(), a.value().to_string()))
                .collect(),
        },
        EdKind::SnippetFile => EdTag::SnippetFile {
            id: attr("id").unwrap_or_else(|| "code".to_string()),
        },
        EdKind::Heading => EdTag::Heading {
            level: node
                .attribute("level")
                .and_then(|l| l.trim().parse::<usize>().ok())
                .unwrap_or(1)
                .clamp(1, 6),
        },
        EdKind::List => EdTag::List {
            style: ListStyle::from_attr(node.attribute("style")),
        },
        EdKind::ListItem => EdTag::ListItem,
        EdKind::Link => EdTag::Link {
            href: attr("href").unwrap_or_default(),
        },
        EdKind::Break => EdTag::Break,
        EdKind::Figure => EdTag::Figure,
        EdKind::Image => EdTag::Image(ImageRef {
            src: attr("src").unwrap_or_default(),
            alt: attr("alt").unwrap_or_default(),
            width: attr("width"),
            height: attr("height"),
        }),
        EdKind::Table => EdTag::Table,
        EdKind::TableHead => EdTag::TableHead,
        EdKind::TableBody => EdTag::TableBody,
        EdKind::TableRow => EdTag::TableRow,
        EdKind::TableCell => EdTag::TableCell {
            header: name == "th",
        },
        EdKind::Html => EdTag::Html,
        EdKind::Head => EdTag::Head,
        EdKind::Body => EdTag::Body,
        EdKind::Unknown => EdTag::Unknown {
            name: name.to_string(),
        },
    }
}
