//! The owned syntax tree passed through the transform chain.

/// One node of the document tree.
///
/// The parser lowers mdast into this model; the transform stages mutate it
/// in place; the serializer consumes it. Each non-leaf variant owns its
/// ordered children exclusively; the tree is never shared between
/// concurrent renders. Structure the transforms never inspect (emphasis,
/// blockquotes, list items, ...) lowers directly to [`SyntaxNode::Element`].
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxNode {
    /// Document root.
    Root {
        /// Child nodes in document order.
        children: Vec<SyntaxNode>,
    },
    /// The `<!doctype html>` preamble inserted by the document-wrap stage.
    Doctype,
    /// A heading; `id` is written by the slug stage.
    Heading {
        /// Heading level (1-6).
        level: u8,
        /// Anchor id, unique within one document once assigned.
        id: Option<String>,
        /// Inline content.
        children: Vec<SyntaxNode>,
    },
    /// A paragraph.
    Paragraph {
        /// Inline content.
        children: Vec<SyntaxNode>,
    },
    /// A fenced code block with its literal content.
    CodeBlock {
        /// Declared language tag, if any.
        lang: Option<String>,
        /// Literal code, without the fences.
        value: String,
    },
    /// An ordered or unordered list.
    List {
        /// Whether the list renders as `<ol>`.
        ordered: bool,
        /// List items.
        children: Vec<SyntaxNode>,
    },
    /// A hyperlink.
    Link {
        /// Target URL.
        url: String,
        /// Optional title attribute.
        title: Option<String>,
        /// Inline content.
        children: Vec<SyntaxNode>,
    },
    /// An image reference.
    Image {
        /// Source URL.
        url: String,
        /// Alternative text.
        alt: String,
        /// Optional title attribute.
        title: Option<String>,
    },
    /// Inline code.
    InlineCode {
        /// Literal content.
        value: String,
    },
    /// A text node; entity-escaped on serialization.
    Text {
        /// Literal text.
        value: String,
    },
    /// A generic element with ordered attributes.
    Element {
        /// Tag name.
        tag: String,
        /// Attributes in serialization order.
        attrs: Vec<(String, String)>,
        /// Child nodes.
        children: Vec<SyntaxNode>,
    },
}

/// Tags treated as block-level by the pretty-format stage.
const BLOCK_TAGS: &[&str] = &[
    "blockquote", "body", "div", "figcaption", "figure", "head", "hr", "html",
    "li", "link", "meta", "ol", "p", "pre", "script", "style", "table",
    "tbody", "thead", "title", "tr", "ul",
];

impl SyntaxNode {
    /// Builds an element node.
    pub fn element(
        tag: impl Into<String>,
        attrs: Vec<(String, String)>,
        children: Vec<SyntaxNode>,
    ) -> Self {
        SyntaxNode::Element { tag: tag.into(), attrs, children }
    }

    /// Builds a text node.
    pub fn text(value: impl Into<String>) -> Self {
        SyntaxNode::Text { value: value.into() }
    }

    /// Child nodes, for variants that own them.
    pub fn children(&self) -> Option<&[SyntaxNode]> {
        match self {
            SyntaxNode::Root { children }
            | SyntaxNode::Heading { children, .. }
            | SyntaxNode::Paragraph { children }
            | SyntaxNode::List { children, .. }
            | SyntaxNode::Link { children, .. }
            | SyntaxNode::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Mutable child nodes, for variants that own them.
    pub fn children_mut(&mut self) -> Option<&mut Vec<SyntaxNode>> {
        match self {
            SyntaxNode::Root { children }
            | SyntaxNode::Heading { children, .. }
            | SyntaxNode::Paragraph { children }
            | SyntaxNode::List { children, .. }
            | SyntaxNode::Link { children, .. }
            | SyntaxNode::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Whether this node renders as block-level HTML.
    pub fn is_block(&self) -> bool {
        match self {
            SyntaxNode::Doctype
            | SyntaxNode::Heading { .. }
            | SyntaxNode::Paragraph { .. }
            | SyntaxNode::CodeBlock { .. }
            | SyntaxNode::List { .. } => true,
            SyntaxNode::Element { tag, .. } => BLOCK_TAGS.contains(&tag.as_str()),
            _ => false,
        }
    }
}

/// Builds an attribute pair for [`SyntaxNode::element`].
pub fn attr(name: &str, value: impl Into<String>) -> (String, String) {
    (name.to_string(), value.into())
}

/// Flattens the visible text content of a node sequence.
///
/// Used for heading slugs and outline entries. Inline code contributes its
/// literal value; images and code blocks contribute nothing.
pub fn collect_text(nodes: &[SyntaxNode]) -> String {
    let mut text = String::new();
    for node in nodes {
        collect_into(node, &mut text);
    }
    text.trim().to_string()
}

fn collect_into(node: &SyntaxNode, buffer: &mut String) {
    match node {
        SyntaxNode::Text { value } | SyntaxNode::InlineCode { value } => buffer.push_str(value),
        SyntaxNode::CodeBlock { .. } | SyntaxNode::Image { .. } | SyntaxNode::Doctype => {}
        other => {
            if let Some(children) = other.children() {
                for child in children {
                    collect_into(child, buffer);
                }
            }
        }
    }
}

/// Applies `f` to every node of the tree in document (pre-order) order.
pub fn walk_mut(node: &mut SyntaxNode, f: &mut impl FnMut(&mut SyntaxNode)) {
    f(node);
    if let Some(children) = node.children_mut() {
        for child in children {
            walk_mut(child, f);
        }
    }
}
