//! Ed-XML serialization (Ed tree → Ed-XML)
//!
//! Output is a single physical line. Newlines inside `<pre>` and `<snippet-file>` are written as
//! the two-character escape `\n`; every other line break is dropped.

use crate::common::escape::{escape_attr, escape_code_literal, escape_text};
use crate::ir::nodes::{EdElement, EdKind, EdNode, EdTag};

/// Ed-XML document format version written on the root element.
pub const DOCUMENT_VERSION: &str = "2.0";

/// Serialize an Ed tree to Ed-XML.
///
/// The root's children are wrapped in `<document version="2.0">`; a root that is not a
/// document element is wrapped as the single child.
pub fn serialize_to_ed(root: &EdNode) -> String {
    let mut body = String::new();
    match root {
        EdNode::Element(EdElement {
            tag: EdTag::Document,
            children,
        }) => {
            for child in children {
                write_node(child, false, &mut body);
            }
        }
        other => write_node(other, false, &mut body),
    }

    let body: String = body.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    format!("<document version=\"{DOCUMENT_VERSION}\">{body}</document>")
}

fn write_node(node: &EdNode, in_code: bool, out: &mut String) {
    match node {
        EdNode::Text(text) if in_code => out.push_str(&escape_text(&escape_code_literal(text))),
        EdNode::Text(text) => out.push_str(&escape_text(text)),
        EdNode::Raw(markup) => out.push_str(markup),
        EdNode::Element(element) => write_element(element, in_code, out),
    }
}

fn write_element(element: &EdElement, in_code: bool, out: &mut String) {
    let tag = &element.tag;
    out.push('<');
    out.push_str(tag.name());
    for (key, value) in tag.attributes() {
        out.push_str(&format!(" {key}=\"{}\"", escape_attr(&value)));
    }

    if matches!(tag.kind(), EdKind::Break | EdKind::Image) && element.children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');

    let in_code = in_code || matches!(tag.kind(), EdKind::Pre | EdKind::SnippetFile);
    for child in &element.children {
        write_node(child, in_code, out);
    }

    out.push_str("</");
    out.push_str(tag.name());
    out.push('>');
}
