//! Wraps the rendered fragment in a full HTML document shell.

use crate::tree::{SyntaxNode, attr};

/// Wraps the root's children in `html > head / body`, prefixed by a doctype.
///
/// The head carries a charset, a viewport declaration, and the document
/// title. Heading content is untouched.
pub fn apply(tree: &mut SyntaxNode, title: Option<&str>) {
    let SyntaxNode::Root { children } = tree else { return };
    let content = std::mem::take(children);

    let head = SyntaxNode::element(
        "head",
        vec![],
        vec![
            SyntaxNode::element("meta", vec![attr("charset", "utf-8")], vec![]),
            SyntaxNode::element(
                "meta",
                vec![
                    attr("name", "viewport"),
                    attr("content", "width=device-width, initial-scale=1"),
                ],
                vec![],
            ),
            SyntaxNode::element(
                "title",
                vec![],
                title.map(SyntaxNode::text).into_iter().collect(),
            ),
        ],
    );
    let body = SyntaxNode::element("body", vec![], content);
    let html = SyntaxNode::element("html", vec![], vec![head, body]);

    *children = vec![SyntaxNode::Doctype, html];
}
