//! Conversion between Markdown and Ed-XML
//!
//!     Ed-XML is the single-line rich-document markup the Ed learning platform stores lesson,
//!     slide and challenge content in. This crate converts it to and from CommonMark Markdown,
//!     moving images between the local disk and the platform's file store along the way.
//!
//!     This is a pure lib, that is, it powers edconv but is shell agnostic: no code here reads
//!     env vars or prints. Network access only happens through an injected AssetStore.
//!
//! Architecture
//!
//!     Both directions pass through one intermediate representation, the Ed tree (./ir/nodes.rs).
//!     Markdown import parses with comrak and builds an Ed tree, Ed-XML import parses with
//!     roxmltree and builds the same tree. Each direction then serializes the tree.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── assets                  # AssetStore trait, HTTP and in-memory stores
//!     ├── common                  # Escaping and tag alias normalization
//!     ├── formats
//!     │   ├── markdown            # attributes.rs, parser.rs (→ Ed tree), serializer.rs (Ed tree →)
//!     │   └── ed                  # parser.rs (→ Ed tree), serializer.rs (Ed tree →)
//!     ├── ir                      # Ed tree, per-kind Markdown layout table, tree visualization
//!     ├── transforms.rs           # markdown_to_ed / ed_to_markdown
//!     └── lib.rs
//!
//! Side Effects
//!
//!     Markdown → Ed uploads every local image. A missing file or a failed upload aborts the
//!     conversion: the document cannot reference an image the platform does not have.
//!
//!     Ed → Markdown downloads images when asked to. A failed download is logged and the image
//!     renders as nothing, so stale remote assets never block reading a document.
//!
//! Testing
//!     tests
//!     └── <area>
//!         ├── <testname>.rs
//!         └── fixtures
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include
//!     these in the mod.

pub mod assets;
pub mod common;
pub mod error;
pub mod formats;
pub mod ir;
pub mod transforms;

pub use assets::{AssetStore, MemoryAssetStore};
#[cfg(feature = "http")]
pub use assets::HttpAssetStore;
pub use error::{AssetError, FormatError};
pub use ir::nodes::{EdElement, EdNode, EdTag};
pub use transforms::{
    ed_to_markdown, ed_to_markdown_with_images, ed_to_tree, markdown_to_ed, EdToMarkdownOptions,
    ImageAllocator, MarkdownToEdOptions,
};
