//! Ed-XML format
//!
//! Ed-XML is the platform's rich-document markup: a closed vocabulary of elements (see
//! [`crate::ir::nodes::EdTag`]) wrapped in `<document version="2.0">` and stored on one line.
//!
//! # Library Choice
//!
//! Parsing uses `roxmltree`: read-only, strict, and it keeps attribute order, which snippet
//! attributes depend on. Serialization is a direct walk over the Ed tree.

pub mod parser;
pub mod serializer;

pub use parser::parse_from_ed;
pub use serializer::serialize_to_ed;
