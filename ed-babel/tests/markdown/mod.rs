//! Markdown output tests (Ed-XML → Markdown)

mod blocks;
mod images;
