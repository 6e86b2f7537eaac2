//! Markdown layout of each Ed element kind.
//!
//! Rendering an element to Markdown is always the same three steps: an opening fragment, the
//! rendered children joined by a combinator, and a closing fragment. This table is the single
//! place that says what those are per kind.
//!
//! | Kind                                   | open               | join     | close            |
//! |----------------------------------------|--------------------|----------|------------------|
//! | html, paragraph                        | -                  | `""`     | -                |
//! | callout                                | `{.callout …}\n`   | `""`     | -                |
//! | list                                   | -                  | `"\n"`   | -                |
//! | list-item                              | `* `               | `""`     | -                |
//! | bold / italic / code                   | `**` / `*` / `` ` `` | `""`   | same as open     |
//! | underline                              | `<underline>`      | `""`     | `</underline>`   |
//! | heading                                | `#`×level + space  | `""`     | -                |
//! | pre                                    | ```` ```\n ````    | `""`     | ```` \n``` ````  |
//! | snippet                                | ```` ```lang.k="v" ```` | `"\n"` | ```` ``` ````  |
//! | table                                  | header row + separator | `"\n"` | -              |
//! | thead, tbody                           | -                  | `"\n"`   | -                |
//! | tr                                     | `""`               | `"\|"`   | `""`             |
//! | td, th                                 | -                  | `""`     | -                |
//! | document, head, body, snippet-file, figure, unknown | -     | `"\n\n"` | -                |
//!
//! Links, breaks and images short-circuit the walk and never consult the table.
//!
//! A `-` means "no fragment", which differs from an empty fragment: table rows carry empty
//! open/close fragments so the `|` join also produces the outer pipes (`|a|b|`).

use super::nodes::{EdKind, EdTag};
use std::borrow::Cow;

/// Separator between sibling blocks.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Opening fragment, child combinator and closing fragment of one element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub open: Option<&'static str>,
    pub join: &'static str,
    pub close: Option<&'static str>,
}

impl Layout {
    const fn joined(join: &'static str) -> Self {
        Layout {
            open: None,
            join,
            close: None,
        }
    }

    const fn wrapped(open: &'static str, join: &'static str, close: &'static str) -> Self {
        Layout {
            open: Some(open),
            join,
            close: Some(close),
        }
    }

    const fn opened(open: &'static str, join: &'static str) -> Self {
        Layout {
            open: Some(open),
            join,
            close: None,
        }
    }
}

/// Look up the layout of an element kind.
///
/// Callout, heading and snippet openers depend on attributes; their entry here carries only the
/// join and close, and [`open_marker`] computes the opener.
pub const fn layout(kind: EdKind) -> Layout {
    match kind {
        EdKind::Html | EdKind::Paragraph | EdKind::TableCell => Layout::joined(""),
        EdKind::Callout | EdKind::Heading => Layout::joined(""),
        EdKind::List | EdKind::TableHead | EdKind::TableBody | EdKind::Table => {
            Layout::joined("\n")
        }
        EdKind::ListItem => Layout::opened("* ", ""),
        EdKind::Bold => Layout::wrapped("**", "", "**"),
        EdKind::Italic => Layout::wrapped("*", "", "*"),
        EdKind::Code => Layout::wrapped("`", "", "`"),
        EdKind::Underline => Layout::wrapped("<underline>", "", "</underline>"),
        EdKind::Pre => Layout::wrapped("```\n", "", "\n```"),
        EdKind::Snippet => Layout {
            open: None,
            join: "\n",
            close: Some("```"),
        },
        EdKind::TableRow => Layout::wrapped("", "|", ""),
        EdKind::Link | EdKind::Break | EdKind::Image => Layout::joined(""),
        EdKind::Document
        | EdKind::Head
        | EdKind::Body
        | EdKind::SnippetFile
        | EdKind::Figure
        | EdKind::Unknown => Layout::joined(BLOCK_SEPARATOR),
    }
}

/// Opening fragment of an element, including the attribute-dependent ones.
///
/// Tables are not covered: their opener is synthesized from the rendered header row.
pub fn open_marker(tag: &EdTag) -> Option<Cow<'static, str>> {
    match tag {
        EdTag::Callout { kind } => Some(Cow::Owned(format!("{{.callout type=\"{kind}\"}}\n"))),
        EdTag::Heading { level } => Some(Cow::Owned(format!("{} ", "#".repeat(*level)))),
        EdTag::Snippet { language, extra } => {
            let extras: String = extra
                .iter()
                .map(|(key, value)| format!(".{key}=\"{value}\""))
                .collect();
            Some(Cow::Owned(format!("```{language}{extras}")))
        }
        _ => layout(tag.kind()).open.map(Cow::Borrowed),
    }
}

/// Markdown separator row for a rendered header row such as `|a|b|c|`.
///
/// The row has one cell per gap between pipes: `|---|---|---|` for the example above.
pub fn separator_row(header: &str) -> String {
    let cells = header.matches('|').count().saturating_sub(1);
    format!("|{}|", vec!["---"; cells].join("|"))
}
