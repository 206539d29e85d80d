#![deny(missing_docs)]
//! markpress html engine: the document transform chain, serializer, and outline.

/// Lowering from mdast into the document syntax tree.
pub mod lower;
/// Outline (table of contents) extraction.
pub mod outline;
/// The rendering pipeline entry point and options.
pub mod pipeline;
/// Depth-first HTML serialization.
pub mod serialize;
/// The storage collaborator boundary.
pub mod store;
/// The ordered transform chain.
pub mod transform;
/// The owned document syntax tree.
pub mod tree;

pub use outline::{OutlineEntry, from_html, from_tree, headings};
pub use pipeline::{
    CopyButton, RenderError, RenderOptions, RenderedDocument, Visibility, render,
};
pub use store::{ContentStore, StoreError};
pub use tree::{SyntaxNode, attr, collect_text, walk_mut};
