//! Core data structures for the Ed document tree.
//!
//! An Ed tree is built once from parsed Ed-XML, walked once by the Markdown serializer and then
//! dropped. Every element kind the platform uses is a variant of [`EdTag`] carrying exactly the
//! attributes that kind declares; anything else lands in [`EdTag::Unknown`] so that new platform
//! tags never break conversion.

/// A node of an Ed document.
#[derive(Debug, Clone, PartialEq)]
pub enum EdNode {
    Text(String),
    Element(EdElement),
    /// Markup copied through verbatim, such as inline HTML from Markdown.
    Raw(String),
}

/// An element together with its ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct EdElement {
    pub tag: EdTag,
    pub children: Vec<EdNode>,
}

/// Bullet style of an Ed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    Bullet,
    Number,
}

impl ListStyle {
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("number") => ListStyle::Number,
            _ => ListStyle::Bullet,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ListStyle::Bullet => "bullet",
            ListStyle::Number => "number",
        }
    }
}

/// Attributes of an Ed `<image>`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageRef {
    pub src: String,
    pub alt: String,
    pub width: Option<String>,
    pub height: Option<String>,
}

/// Element kinds with their declared attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum EdTag {
    Document,
    Paragraph,
    Callout {
        kind: String,
    },
    Bold,
    Italic,
    Underline,
    Code,
    Pre,
    Snippet {
        language: String,
        /// Attributes beyond `language`, in document order.
        extra: Vec<(String, String)>,
    },
    SnippetFile {
        id: String,
    },
    Heading {
        level: usize,
    },
    List {
        style: ListStyle,
    },
    ListItem,
    Link {
        href: String,
    },
    Break,
    Figure,
    Image(ImageRef),
    Table,
    TableHead,
    TableBody,
    TableRow,
    TableCell {
        header: bool,
    },
    Html,
    Head,
    Body,
    Unknown {
        name: String,
    },
}

/// Fieldless discriminant of [`EdTag`], used as the key of the layout table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdKind {
    Document,
    Paragraph,
    Callout,
    Bold,
    Italic,
    Underline,
    Code,
    Pre,
    Snippet,
    SnippetFile,
    Heading,
    List,
    ListItem,
    Link,
    Break,
    Figure,
    Image,
    Table,
    TableHead,
    TableBody,
    TableRow,
    TableCell,
    Html,
    Head,
    Body,
    Unknown,
}

impl EdKind {
    /// Classify an element name. Accepts both spellings of aliased tags.
    pub fn from_tag_name(name: &str) -> Self {
        match name {
            "document" => EdKind::Document,
            "paragraph" => EdKind::Paragraph,
            "callout" => EdKind::Callout,
            "bold" => EdKind::Bold,
            "italic" => EdKind::Italic,
            "underline" => EdKind::Underline,
            "code" => EdKind::Code,
            "pre" => EdKind::Pre,
            "snippet" => EdKind::Snippet,
            "snippet-file" => EdKind::SnippetFile,
            "heading" => EdKind::Heading,
            "list" => EdKind::List,
            "list-item" => EdKind::ListItem,
            "a" | "link" => EdKind::Link,
            "break" => EdKind::Break,
            "figure" => EdKind::Figure,
            "img" | "image" => EdKind::Image,
            "table" => EdKind::Table,
            "thead" => EdKind::TableHead,
            "tbody" => EdKind::TableBody,
            "tr" => EdKind::TableRow,
            "td" | "th" => EdKind::TableCell,
            "html" => EdKind::Html,
            "head" => EdKind::Head,
            "body" => EdKind::Body,
            _ => EdKind::Unknown,
        }
    }
}

impl EdTag {
    pub fn kind(&self) -> EdKind {
        match self {
            EdTag::Document => EdKind::Document,
            EdTag::Paragraph => EdKind::Paragraph,
            EdTag::Callout { .. } => EdKind::Callout,
            EdTag::Bold => EdKind::Bold,
            EdTag::Italic => EdKind::Italic,
            EdTag::Underline => EdKind::Underline,
            EdTag::Code => EdKind::Code,
            EdTag::Pre => EdKind::Pre,
            EdTag::Snippet { .. } => EdKind::Snippet,
            EdTag::SnippetFile { .. } => EdKind::SnippetFile,
            EdTag::Heading { .. } => EdKind::Heading,
            EdTag::List { .. } => EdKind::List,
            EdTag::ListItem => EdKind::ListItem,
            EdTag::Link { .. } => EdKind::Link,
            EdTag::Break => EdKind::Break,
            EdTag::Figure => EdKind::Figure,
            EdTag::Image(_) => EdKind::Image,
            EdTag::Table => EdKind::Table,
            EdTag::TableHead => EdKind::TableHead,
            EdTag::TableBody => EdKind::TableBody,
            EdTag::TableRow => EdKind::TableRow,
            EdTag::TableCell { .. } => EdKind::TableCell,
            EdTag::Html => EdKind::Html,
            EdTag::Head => EdKind::Head,
            EdTag::Body => EdKind::Body,
            EdTag::Unknown { .. } => EdKind::Unknown,
        }
    }

    /// Ed-XML element name (the canonical spelling for aliased tags).
    pub fn name(&self) -> &str {
        match self {
            EdTag::Document => "document",
            EdTag::Paragraph => "paragraph",
            EdTag::Callout { .. } => "callout",
            EdTag::Bold => "bold",
            EdTag::Italic => "italic",
            EdTag::Underline => "underline",
            EdTag::Code => "code",
            EdTag::Pre => "pre",
            EdTag::Snippet { .. } => "snippet",
            EdTag::SnippetFile { .. } => "snippet-file",
            EdTag::Heading { .. } => "heading",
            EdTag::List { .. } => "list",
            EdTag::ListItem => "list-item",
            EdTag::Link { .. } => "link",
            EdTag::Break => "break",
            EdTag::Figure => "figure",
            EdTag::Image(_) => "image",
            EdTag::Table => "table",
            EdTag::TableHead => "thead",
            EdTag::TableBody => "tbody",
            EdTag::TableRow => "tr",
            EdTag::TableCell { header: true } => "th",
            EdTag::TableCell { header: false } => "td",
            EdTag::Html => "html",
            EdTag::Head => "head",
            EdTag::Body => "body",
            EdTag::Unknown { name } => name.as_str(),
        }
    }

    /// Declared attributes as key/value pairs, in the order Ed-XML writes them.
    pub fn attributes(&self) -> Vec<(&str, String)> {
        match self {
            EdTag::Callout { kind } => vec![("type", kind.clone())],
            EdTag::Snippet { language, extra } => {
                let mut attrs = vec![("language", language.clone())];
                attrs.extend(extra.iter().map(|(k, v)| (k.as_str(), v.clone())));
                attrs
            }
            EdTag::SnippetFile { id } => vec![("id", id.clone())],
            EdTag::Heading { level } => vec![("level", level.to_string())],
            EdTag::List { style } => vec![("style", style.as_str().to_string())],
            EdTag::Link { href } => vec![("href", href.clone())],
            EdTag::Image(image) => {
                let mut attrs = vec![("src", image.src.clone()), ("alt", image.alt.clone())];
                if let Some(width) = &image.width {
                    attrs.push(("width", width.clone()));
                }
                if let Some(height) = &image.height {
                    attrs.push(("height", height.clone()));
                }
                attrs
            }
            _ => Vec::new(),
        }
    }
}

impl EdNode {
    pub fn text(text: impl Into<String>) -> Self {
        EdNode::Text(text.into())
    }

    pub fn element(tag: EdTag, children: Vec<EdNode>) -> Self {
        EdNode::Element(EdElement { tag, children })
    }

    pub fn as_element(&self) -> Option<&EdElement> {
        match self {
            EdNode::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Concatenated text of this node and all its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            EdNode::Text(text) => out.push_str(text),
            EdNode::Raw(_) => {}
            EdNode::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }
}
