//! Format implementations
//!
//! Each format converts between its text representation and the Ed tree in [`crate::ir`].
//! Markdown parses into Ed trees and Ed-XML serializes them (import), Ed-XML parses into Ed trees
//! and Markdown serializes them (export).

pub mod ed;
pub mod markdown;
