//! Self-links around heading content.

use crate::tree::{SyntaxNode, walk_mut};

/// Wraps each slugged heading's content in an anchor to its own id.
///
/// Reads the ids written by the slug stage; running before it would leave
/// every heading linking at nothing. Headings that already contain a link
/// keep their content unwrapped (nested anchors are invalid HTML); the id
/// attribute still renders, so the outline bijection is unaffected.
pub fn apply(tree: &mut SyntaxNode) {
    walk_mut(tree, &mut |node| {
        if let SyntaxNode::Heading { id: Some(id), children, .. } = node {
            if contains_link(children) {
                log::debug!("heading '{id}' already contains a link; skipping self-link");
                return;
            }
            let content = std::mem::take(children);
            children.push(SyntaxNode::Link {
                url: format!("#{id}"),
                title: None,
                children: content,
            });
        }
    });
}

fn contains_link(nodes: &[SyntaxNode]) -> bool {
    nodes.iter().any(|node| match node {
        SyntaxNode::Link { .. } => true,
        SyntaxNode::Element { tag, children, .. } => tag == "a" || contains_link(children),
        other => other.children().is_some_and(contains_link),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_heading_content_in_self_anchor() {
        let mut tree = SyntaxNode::Root {
            children: vec![SyntaxNode::Heading {
                level: 1,
                id: Some("hello".into()),
                children: vec![SyntaxNode::text("Hello")],
            }],
        };
        apply(&mut tree);
        let children = tree.children().expect("root");
        let SyntaxNode::Heading { children: content, .. } = &children[0] else { panic!("heading") };
        assert!(matches!(
            &content[0],
            SyntaxNode::Link { url, children, .. }
                if url == "#hello"
                    && matches!(children.first(), Some(SyntaxNode::Text { value }) if value == "Hello")
        ));
    }

    #[test]
    fn unslugged_headings_are_left_alone() {
        let original = SyntaxNode::Heading {
            level: 2,
            id: None,
            children: vec![SyntaxNode::text("raw")],
        };
        let mut tree = SyntaxNode::Root { children: vec![original.clone()] };
        apply(&mut tree);
        assert_eq!(tree.children().expect("root")[0], original);
    }

    #[test]
    fn skips_headings_that_already_link() {
        let mut tree = SyntaxNode::Root {
            children: vec![SyntaxNode::Heading {
                level: 2,
                id: Some("see".into()),
                children: vec![SyntaxNode::Link {
                    url: "https://example.com".into(),
                    title: None,
                    children: vec![SyntaxNode::text("See")],
                }],
            }],
        };
        apply(&mut tree);
        let children = tree.children().expect("root");
        let SyntaxNode::Heading { children: content, .. } = &children[0] else { panic!("heading") };
        assert!(matches!(
            &content[0],
            SyntaxNode::Link { url, .. } if url == "https://example.com"
        ));
    }

    #[test]
    fn detects_links_nested_in_emphasis() {
        let mut tree = SyntaxNode::Root {
            children: vec![SyntaxNode::Heading {
                level: 2,
                id: Some("x".into()),
                children: vec![SyntaxNode::element(
                    "em",
                    vec![],
                    vec![SyntaxNode::Link {
                        url: "/elsewhere".into(),
                        title: None,
                        children: vec![SyntaxNode::text("x")],
                    }],
                )],
            }],
        };
        apply(&mut tree);
        let children = tree.children().expect("root");
        let SyntaxNode::Heading { children: content, .. } = &children[0] else { panic!("heading") };
        assert!(matches!(&content[0], SyntaxNode::Element { tag, .. } if tag == "em"));
    }
}
