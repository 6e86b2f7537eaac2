//! Intermediate representation shared by both conversion directions.
//!
//! Markdown is parsed into an Ed tree, and Ed-XML is parsed into the same tree, so every format
//! only has to map to and from [`nodes::EdNode`]. The Markdown rendering rules per element kind
//! live in [`layout`] as data rather than inline conditionals.

pub mod layout;
pub mod nodes;
pub mod tree;
