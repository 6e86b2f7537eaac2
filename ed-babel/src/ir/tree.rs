//! Tree visualization of an Ed document.
//!
//! One line per node, indented with box-drawing connectors, two columns per level:
//!
//! ```text
//! ⧉ document
//! ├─ ¶ paragraph
//! │  ├─ ◦ "Hello "
//! │  └─ 𝐁 bold
//! │     └─ ◦ "world"
//! └─ 𝒱 snippet language="python"
//!    └─ ○ snippet-file id="code"
//!       └─ ◦ "print(1)"
//! ```
//!
//! Text is shown quoted and truncated to 30 characters.

use super::nodes::{EdKind, EdNode};

const MAX_TEXT: usize = 30;

fn icon(kind: EdKind) -> &'static str {
    match kind {
        EdKind::Document => "⧉",
        EdKind::Paragraph => "¶",
        EdKind::Callout => "\"",
        EdKind::Heading => "§",
        EdKind::List => "☰",
        EdKind::ListItem => "•",
        EdKind::Bold => "𝐁",
        EdKind::Italic => "𝐼",
        EdKind::Code => "ƒ",
        EdKind::Pre | EdKind::Snippet => "𝒱",
        EdKind::Link => "⊕",
        EdKind::Break => "↵",
        EdKind::Image | EdKind::Figure => "▣",
        EdKind::Table | EdKind::TableHead | EdKind::TableBody | EdKind::TableRow => "▦",
        EdKind::Unknown => "∅",
        _ => "○",
    }
}

/// Render the tree rooted at `node`.
pub fn tree_to_string(node: &EdNode) -> String {
    let mut output = String::new();
    output.push_str(&label(node));
    output.push('\n');
    if let EdNode::Element(element) = node {
        format_children(&element.children, "", &mut output);
    }
    output
}

fn format_children(children: &[EdNode], prefix: &str, output: &mut String) {
    for (index, child) in children.iter().enumerate() {
        let is_last = index == children.len() - 1;
        let connector = if is_last { "└─" } else { "├─" };
        output.push_str(&format!("{prefix}{connector} {}\n", label(child)));

        if let EdNode::Element(element) = child {
            let child_prefix = format!("{}{}", prefix, if is_last { "   " } else { "│  " });
            format_children(&element.children, &child_prefix, output);
        }
    }
}

fn label(node: &EdNode) -> String {
    match node {
        EdNode::Text(text) => format!("◦ \"{}\"", truncate(text)),
        EdNode::Raw(markup) => format!("⟨⟩ raw \"{}\"", truncate(markup)),
        EdNode::Element(element) => {
            let mut line = format!("{} {}", icon(element.tag.kind()), element.tag.name());
            for (key, value) in element.tag.attributes() {
                line.push_str(&format!(" {key}=\"{}\"", truncate(&value)));
            }
            line
        }
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_TEXT {
        text.to_string()
    } else {
        let head: String = text.chars().take(MAX_TEXT - 1).collect();
        format!("{head}…")
    }
}
