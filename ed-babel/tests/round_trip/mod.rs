//! Round-trip tests between Markdown and Ed-XML.

mod documents;
