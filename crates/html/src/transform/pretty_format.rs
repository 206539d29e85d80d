//! Deterministic whitespace between block-level elements.

use crate::tree::SyntaxNode;

/// Normalizes inter-element whitespace for diff-stable output.
///
/// Containers whose children are all block-level (ignoring whitespace-only
/// text) get one newline-plus-indent text node before each child and a
/// closing newline before the end tag. Mixed inline content and anything
/// inside whitespace-preserving elements is never touched, so semantic
/// content is unchanged. Running the stage twice yields an identical tree.
pub fn apply(tree: &mut SyntaxNode) {
    if let SyntaxNode::Root { children } = tree {
        format_children(children, 0, false);
    }
}

fn format_children(children: &mut Vec<SyntaxNode>, depth: usize, wrap: bool) {
    for child in children.iter_mut() {
        if preserves_whitespace(child) {
            continue;
        }
        if let Some(inner) = child.children_mut() {
            format_children(inner, depth + 1, true);
        }
    }

    let has_blocks = children.iter().any(SyntaxNode::is_block);
    let uniform = children.iter().all(|child| child.is_block() || is_blank_text(child));
    if !has_blocks || !uniform {
        return;
    }

    let kept: Vec<SyntaxNode> =
        std::mem::take(children).into_iter().filter(|child| !is_blank_text(child)).collect();

    let mut formatted = Vec::with_capacity(kept.len() * 2 + 1);
    for (index, node) in kept.into_iter().enumerate() {
        if wrap || index > 0 {
            formatted.push(separator(depth));
        }
        formatted.push(node);
    }
    if wrap {
        formatted.push(separator(depth.saturating_sub(1)));
    }
    *children = formatted;
}

fn separator(indent: usize) -> SyntaxNode {
    let mut value = String::with_capacity(1 + indent * 2);
    value.push('\n');
    for _ in 0..indent {
        value.push_str("  ");
    }
    SyntaxNode::text(value)
}

fn is_blank_text(node: &SyntaxNode) -> bool {
    matches!(node, SyntaxNode::Text { value } if value.chars().all(char::is_whitespace))
}

fn preserves_whitespace(node: &SyntaxNode) -> bool {
    match node {
        SyntaxNode::CodeBlock { .. } | SyntaxNode::InlineCode { .. } | SyntaxNode::Text { .. } => {
            true
        }
        SyntaxNode::Element { tag, .. } => {
            matches!(tag.as_str(), "pre" | "code" | "textarea" | "script" | "style")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> SyntaxNode {
        SyntaxNode::Paragraph { children: vec![SyntaxNode::text(text)] }
    }

    #[test]
    fn separates_sibling_blocks_with_newlines() {
        let mut tree = SyntaxNode::Root { children: vec![paragraph("a"), paragraph("b")] };
        apply(&mut tree);
        let children = tree.children().expect("root");
        assert_eq!(children.len(), 3);
        assert!(matches!(&children[1], SyntaxNode::Text { value } if value == "\n"));
    }

    #[test]
    fn indents_nested_containers() {
        let mut tree = SyntaxNode::Root {
            children: vec![SyntaxNode::element("div", vec![], vec![paragraph("a")])],
        };
        apply(&mut tree);
        let children = tree.children().expect("root");
        let SyntaxNode::Element { children: inner, .. } = &children[0] else { panic!("div") };
        assert!(matches!(&inner[0], SyntaxNode::Text { value } if value == "\n  "));
        assert!(matches!(inner.last(), Some(SyntaxNode::Text { value }) if value == "\n"));
    }

    #[test]
    fn leaves_inline_content_alone() {
        let original = SyntaxNode::Paragraph {
            children: vec![SyntaxNode::text("a "), SyntaxNode::element("em", vec![], vec![SyntaxNode::text("b")])],
        };
        let mut tree = SyntaxNode::Root { children: vec![original.clone()] };
        apply(&mut tree);
        let children = tree.children().expect("root");
        assert_eq!(children[0], original);
    }

    #[test]
    fn leaves_code_blocks_alone() {
        let code = SyntaxNode::CodeBlock { lang: None, value: "a\n\n  b".into() };
        let mut tree = SyntaxNode::Root { children: vec![code.clone(), paragraph("x")] };
        apply(&mut tree);
        let children = tree.children().expect("root");
        assert_eq!(children[0], code);
    }

    #[test]
    fn formatting_is_stable_across_runs() {
        let mut tree = SyntaxNode::Root {
            children: vec![
                SyntaxNode::element("div", vec![], vec![paragraph("a"), paragraph("b")]),
                paragraph("c"),
            ],
        };
        apply(&mut tree);
        let once = tree.clone();
        apply(&mut tree);
        assert_eq!(tree, once);
    }

    #[test]
    fn drops_preexisting_blank_text_between_blocks() {
        let mut tree = SyntaxNode::Root {
            children: vec![paragraph("a"), SyntaxNode::text("   \n"), paragraph("b")],
        };
        apply(&mut tree);
        let children = tree.children().expect("root");
        assert_eq!(children.len(), 3);
        assert!(matches!(&children[1], SyntaxNode::Text { value } if value == "\n"));
    }
}
