//! Depth-first HTML serialization of the syntax tree.

use crate::tree::SyntaxNode;

/// Elements serialized as self-closing, with no children.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Renders the tree to an HTML string.
///
/// Output is deterministic: children and attributes are emitted in their
/// stored order, text is entity-escaped, attribute values are quote-escaped.
/// The same tree always serializes to the same bytes.
pub fn to_html(tree: &SyntaxNode) -> String {
    let mut out = String::with_capacity(1024);
    write_node(tree, &mut out);
    out
}

fn write_node(node: &SyntaxNode, out: &mut String) {
    match node {
        SyntaxNode::Root { children } => write_children(children, out),
        SyntaxNode::Doctype => out.push_str("<!doctype html>"),
        SyntaxNode::Text { value } => out.push_str(&html_escape::encode_text(value)),
        SyntaxNode::Heading { level, id, children } => {
            let level = (*level).clamp(1, 6);
            out.push_str(&format!("<h{level}"));
            if let Some(id) = id {
                push_attr(out, "id", id);
            }
            out.push('>');
            write_children(children, out);
            out.push_str(&format!("</h{level}>"));
        }
        SyntaxNode::Paragraph { children } => {
            out.push_str("<p>");
            write_children(children, out);
            out.push_str("</p>");
        }
        SyntaxNode::List { ordered, children } => {
            let tag = if *ordered { "ol" } else { "ul" };
            out.push_str(&format!("<{tag}>"));
            write_children(children, out);
            out.push_str(&format!("</{tag}>"));
        }
        SyntaxNode::Link { url, title, children } => {
            out.push_str("<a");
            push_attr(out, "href", url);
            if let Some(title) = title {
                push_attr(out, "title", title);
            }
            out.push('>');
            write_children(children, out);
            out.push_str("</a>");
        }
        SyntaxNode::Image { url, alt, title } => {
            out.push_str("<img");
            push_attr(out, "src", url);
            push_attr(out, "alt", alt);
            if let Some(title) = title {
                push_attr(out, "title", title);
            }
            out.push_str(" />");
        }
        SyntaxNode::InlineCode { value } => {
            out.push_str("<code>");
            out.push_str(&html_escape::encode_text(value));
            out.push_str("</code>");
        }
        // A code block that never went through the highlight stage still
        // renders, escaped, with its language class.
        SyntaxNode::CodeBlock { lang, value } => {
            out.push_str("<pre><code");
            if let Some(lang) = lang {
                push_attr(out, "class", &format!("language-{lang}"));
            }
            out.push('>');
            out.push_str(&html_escape::encode_text(value));
            out.push_str("</code></pre>");
        }
        SyntaxNode::Element { tag, attrs, children } => {
            out.push('<');
            out.push_str(tag);
            for (name, value) in attrs {
                push_attr(out, name, value);
            }
            if VOID_TAGS.contains(&tag.as_str()) {
                out.push_str(" />");
            } else {
                out.push('>');
                write_children(children, out);
                out.push_str(&format!("</{tag}>"));
            }
        }
    }
}

fn write_children(children: &[SyntaxNode], out: &mut String) {
    for child in children {
        write_node(child, out);
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&html_escape::encode_double_quoted_attribute(value));
    out.push('"');
}
