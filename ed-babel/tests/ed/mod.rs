//! Ed-XML output tests (Markdown → Ed-XML)

mod blocks;
mod images;
