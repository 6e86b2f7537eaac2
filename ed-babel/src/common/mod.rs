//! Helpers shared by the Markdown and Ed-XML formats.

pub mod aliases;
pub mod escape;
