//! The ordered transform chain.
//!
//! Stage order is a hard dependency, not caller-configurable:
//!
//! 1. [`document_wrap`]: wrap the fragment in a full document shell.
//! 2. [`pretty_format`]: deterministic whitespace between block elements.
//! 3. [`slugs`]: document-order anchor ids for headings.
//! 4. [`autolink`]: self-links around heading content; reads the ids
//!    written by the slug stage.
//! 5. [`highlight`]: language-aware code block presentation; needs parsed
//!    code block nodes but is independent of the heading stages.
//!
//! New stages slot into this sequence explicitly rather than through a
//! runtime-configurable registry, so ordering stays unambiguous.

/// Self-links around heading content.
pub mod autolink;
/// Document shell wrapping.
pub mod document_wrap;
/// Code block highlighting and the copy affordance.
pub mod highlight;
/// Inter-element whitespace normalization.
pub mod pretty_format;
/// Anchor id assignment.
pub mod slugs;

use crate::pipeline::RenderOptions;
use crate::tree::SyntaxNode;
use markpress_core::error::Diagnostics;

/// Runs the full transform chain over the tree in its documented order.
pub fn apply(
    tree: &mut SyntaxNode,
    title: Option<&str>,
    options: &RenderOptions,
    diagnostics: &mut Diagnostics,
) {
    document_wrap::apply(tree, title);
    pretty_format::apply(tree);
    slugs::apply(tree);
    autolink::apply(tree);
    highlight::apply(tree, options, diagnostics);
}
