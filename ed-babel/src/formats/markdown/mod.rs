//! Markdown format implementation
//!
//! This module implements bidirectional conversion between CommonMark Markdown and Ed trees.
//!
//! # Library Choice
//!
//! Parsing uses `comrak` with the `table` and `math_dollars` extensions. Block attribute
//! annotations are not a comrak extension and are handled by [`attributes`] before parsing.
//! Serialization does not go through comrak: Ed's rendering rules are a small table of
//! fragments per element kind (see [`crate::ir::layout`]).
//!
//! # Element Mapping Table
//!
//! | Markdown                         | Ed-XML                                             | Notes                                   |
//! |----------------------------------|----------------------------------------------------|-----------------------------------------|
//! | Paragraph                        | `<paragraph>`                                      |                                         |
//! | `{.callout type="T"}` paragraph  | `<callout type="T">`                               | type defaults to `info`                 |
//! | Heading                          | `<heading level="N">`                              |                                         |
//! | `**strong**` / `*emphasis*`      | `<bold>` / `<italic>`                              |                                         |
//! | `` `code` ``                     | `<code>`                                           |                                         |
//! | Link                             | `<link href="…">`                                  | export keeps only the first text child  |
//! | List / item                      | `<list style="number\|bullet">` / `<list-item>`    | export always uses `* ` bullets         |
//! | Fence without info string        | `<pre>`                                            |                                         |
//! | Fence with `lang.key="v"`        | `<snippet language="lang" key="v">`                | bare keys become `key="true"`           |
//! | Image                            | `<figure><image src alt width? height?/></figure>` | uploaded on import, downloaded on export|
//! | Table                            | `<table>` with `<thead>` / `<tbody>`               |                                         |
//! | `$x$` / `$$x$$`                  | text                                               | a lone `$$x$$` becomes two paragraphs   |
//! | Hard break                       | `<break/>`                                         |                                         |
//! | Raw HTML                         | copied verbatim                                    | how `<underline>` survives import       |
//!
//! # Lossy Conversions
//!
//! - Numbered lists export as bullets.
//! - Block quotes, thematic breaks and other unmapped Markdown blocks are flattened to their
//!   content on import.
//! - Line breaks inside paragraphs are normalized to spaces.
//! - `<underline>` has no Markdown equivalent and exports as a literal tag.
//! - Nested lists do not round-trip: list items join their blocks without a separator, so
//!   `* a` with a nested `* b` exports as `* a* b`.

pub mod attributes;
pub mod parser;
pub mod serializer;

pub use parser::{parse_from_markdown, MarkdownToEdOptions};
pub use serializer::{serialize_to_markdown, EdToMarkdownOptions, ImageAllocator};
