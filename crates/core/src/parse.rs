//! Markdown parsing options and the mdast adapter.

use crate::error::{ParseError, SourceLocation};
use markdown::mdast::Node;
use markdown::message::{Message, Place};

/// Toggles for building markdown-rs parse options.
///
/// Raw HTML constructs stay disabled: literal tags in the body reach the
/// tree as plain text and are escaped on serialization.
#[derive(Clone, Copy, Debug)]
pub struct ParseOptions {
    /// Enable GitHub Flavored Markdown constructs (autolink literals,
    /// strikethrough, tables).
    pub gfm: bool,
    /// Enable indented code blocks.
    pub code_indented: bool,
}

impl ParseOptions {
    /// Defaults for a plain Markdown document body (no GFM extensions).
    pub const fn markdown() -> Self {
        Self { gfm: false, code_indented: true }
    }

    /// Convert to markdown-rs `ParseOptions`.
    pub fn to_markdown(self) -> markdown::ParseOptions {
        let mut constructs = markdown::Constructs {
            code_indented: self.code_indented,
            html_flow: false,
            html_text: false,
            ..Default::default()
        };

        if self.gfm {
            constructs.gfm_autolink_literal = true;
            constructs.gfm_strikethrough = true;
            constructs.gfm_table = true;
        }

        markdown::ParseOptions { constructs, ..markdown::ParseOptions::default() }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::markdown()
    }
}

/// Parse a document body into an mdast tree.
///
/// Block elements are parsed in source order, inline elements within block
/// content. Malformed input recovers locally (an unterminated fence
/// swallows the rest of the input as literal code), so for plain Markdown
/// bodies this does not fail; the error path exists for the adapter
/// boundary.
pub fn parse_body(input: &str, options: &ParseOptions) -> Result<Node, ParseError> {
    markdown::to_mdast(input, &options.to_markdown()).map_err(|err| ParseError {
        message: err.to_string(),
        location: message_location(&err),
    })
}

fn message_location(message: &Message) -> SourceLocation {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => SourceLocation::new(point.line, point.column),
            Place::Position(position) => {
                SourceLocation::new(position.start.line, position.start.column)
            }
        },
        None => SourceLocation::new(1, 1),
    }
}
