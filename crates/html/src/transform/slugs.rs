//! Document-order anchor id assignment for headings.

use crate::tree::{SyntaxNode, collect_text, walk_mut};
use markpress_core::slug::Slugger;

/// Assigns a unique anchor id to every heading, in document order.
///
/// Must run before the autolink stage. Collision suffixes depend on strict
/// document order, which keeps them deterministic and reproducible.
pub fn apply(tree: &mut SyntaxNode) {
    let mut slugger = Slugger::new();
    walk_mut(tree, &mut |node| {
        if let SyntaxNode::Heading { id, children, .. } = node {
            *id = Some(slugger.assign(&collect_text(children)));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(text: &str) -> SyntaxNode {
        SyntaxNode::Heading { level: 2, id: None, children: vec![SyntaxNode::text(text)] }
    }

    fn ids(tree: &SyntaxNode) -> Vec<String> {
        let mut out = Vec::new();
        let mut tree = tree.clone();
        walk_mut(&mut tree, &mut |node| {
            if let SyntaxNode::Heading { id: Some(id), .. } = node {
                out.push(id.clone());
            }
        });
        out
    }

    #[test]
    fn assigns_slugs_from_flattened_text() {
        let mut tree = SyntaxNode::Root {
            children: vec![SyntaxNode::Heading {
                level: 1,
                id: None,
                children: vec![
                    SyntaxNode::text("Using "),
                    SyntaxNode::InlineCode { value: "serde".into() },
                ],
            }],
        };
        apply(&mut tree);
        assert_eq!(ids(&tree), ["using-serde"]);
    }

    #[test]
    fn duplicate_headings_get_suffixes_in_source_order() {
        let mut tree = SyntaxNode::Root {
            children: vec![heading("Intro"), heading("Details"), heading("Intro")],
        };
        apply(&mut tree);
        assert_eq!(ids(&tree), ["intro", "details", "intro-1"]);
    }

    #[test]
    fn nested_headings_are_still_visited_in_order() {
        let mut tree = SyntaxNode::Root {
            children: vec![
                heading("A"),
                SyntaxNode::element("blockquote", vec![], vec![heading("B")]),
                heading("C"),
            ],
        };
        apply(&mut tree);
        assert_eq!(ids(&tree), ["a", "b", "c"]);
    }

    #[test]
    fn empty_heading_text_falls_back() {
        let mut tree = SyntaxNode::Root { children: vec![heading(""), heading("")] };
        apply(&mut tree);
        assert_eq!(ids(&tree), ["section", "section-1"]);
    }
}
