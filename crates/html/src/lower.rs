//! Lowers the mdast tree into the document syntax tree.
//!
//! Block-then-inline structure is preserved as-is; node kinds the transform
//! chain inspects keep their typed variants, everything else becomes a
//! generic element. Reference links and images are resolved against the
//! document's definitions in a first pass.

use crate::tree::{SyntaxNode, attr};
use markdown::mdast;
use std::collections::HashMap;

/// Lowers a parsed mdast root into the transformable syntax tree.
pub fn lower(tree: &mdast::Node) -> SyntaxNode {
    let lowerer = Lowerer::new(tree);
    let children = match tree {
        mdast::Node::Root(root) => lowerer.lower_nodes(&root.children, false),
        other => {
            let mut out = Vec::new();
            lowerer.lower_into(other, false, &mut out);
            out
        }
    };
    SyntaxNode::Root { children }
}

struct ReferenceTarget {
    url: String,
    title: Option<String>,
}

struct Lowerer {
    definitions: HashMap<String, ReferenceTarget>,
}

impl Lowerer {
    fn new(tree: &mdast::Node) -> Self {
        let mut definitions = HashMap::new();
        collect_definitions(tree, &mut definitions);
        Self { definitions }
    }

    fn lower_nodes(&self, nodes: &[mdast::Node], tight: bool) -> Vec<SyntaxNode> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            self.lower_into(node, tight, &mut out);
        }
        out
    }

    fn lower_into(&self, node: &mdast::Node, tight: bool, out: &mut Vec<SyntaxNode>) {
        match node {
            // Tight lists suppress the paragraph wrapper around item content.
            mdast::Node::Paragraph(para) if tight => {
                out.extend(self.lower_nodes(&para.children, false));
            }
            mdast::Node::Paragraph(para) => out.push(SyntaxNode::Paragraph {
                children: self.lower_nodes(&para.children, false),
            }),
            mdast::Node::Heading(heading) => out.push(SyntaxNode::Heading {
                level: heading.depth,
                id: None,
                children: self.lower_nodes(&heading.children, false),
            }),
            mdast::Node::Text(text) => out.push(SyntaxNode::text(&text.value)),
            mdast::Node::InlineCode(code) => {
                out.push(SyntaxNode::InlineCode { value: code.value.clone() });
            }
            mdast::Node::Code(code) => out.push(SyntaxNode::CodeBlock {
                lang: code.lang.clone(),
                value: code.value.clone(),
            }),
            mdast::Node::Emphasis(em) => {
                out.push(SyntaxNode::element("em", vec![], self.lower_nodes(&em.children, false)));
            }
            mdast::Node::Strong(strong) => out.push(SyntaxNode::element(
                "strong",
                vec![],
                self.lower_nodes(&strong.children, false),
            )),
            mdast::Node::Delete(del) => {
                out.push(SyntaxNode::element("del", vec![], self.lower_nodes(&del.children, false)));
            }
            mdast::Node::Link(link) => out.push(SyntaxNode::Link {
                url: link.url.clone(),
                title: link.title.clone(),
                children: self.lower_nodes(&link.children, false),
            }),
            mdast::Node::Image(image) => out.push(SyntaxNode::Image {
                url: image.url.clone(),
                alt: image.alt.clone(),
                title: image.title.clone(),
            }),
            mdast::Node::List(list) => out.push(self.lower_list(list)),
            mdast::Node::ListItem(item) => {
                // Stray item outside a list; lower as a loose item.
                out.push(SyntaxNode::element("li", vec![], self.lower_nodes(&item.children, false)));
            }
            mdast::Node::Blockquote(quote) => out.push(SyntaxNode::element(
                "blockquote",
                vec![],
                self.lower_nodes(&quote.children, false),
            )),
            mdast::Node::ThematicBreak(_) => out.push(SyntaxNode::element("hr", vec![], vec![])),
            mdast::Node::Break(_) => out.push(SyntaxNode::element("br", vec![], vec![])),
            mdast::Node::Html(html) => {
                // Raw HTML constructs are disabled at parse time; anything
                // that still arrives here is escaped as text.
                log::debug!("raw HTML lowered to escaped text: {}", html.value);
                out.push(SyntaxNode::text(&html.value));
            }
            mdast::Node::Table(table) => out.push(self.lower_table(table)),
            mdast::Node::TableRow(_) | mdast::Node::TableCell(_) => {}
            mdast::Node::LinkReference(link) => {
                match self.definitions.get(&link.identifier) {
                    Some(target) => out.push(SyntaxNode::Link {
                        url: target.url.clone(),
                        title: target.title.clone(),
                        children: self.lower_nodes(&link.children, false),
                    }),
                    None => {
                        log::debug!("unresolved link reference: {}", link.identifier);
                        out.extend(self.lower_nodes(&link.children, false));
                    }
                }
            }
            mdast::Node::ImageReference(image) => {
                match self.definitions.get(&image.identifier) {
                    Some(target) => out.push(SyntaxNode::Image {
                        url: target.url.clone(),
                        alt: image.alt.clone(),
                        title: target.title.clone(),
                    }),
                    None => {
                        log::debug!("unresolved image reference: {}", image.identifier);
                        out.push(SyntaxNode::text(&image.alt));
                    }
                }
            }
            // Definitions are consumed by the reference pass and emit nothing.
            mdast::Node::Definition(_) => {}
            other => {
                log::warn!("unhandled markdown node: {other:?}");
            }
        }
    }

    fn lower_list(&self, list: &mdast::List) -> SyntaxNode {
        let tight = !list.spread;
        let mut items = Vec::with_capacity(list.children.len());
        for child in &list.children {
            if let mdast::Node::ListItem(item) = child {
                items.push(SyntaxNode::element(
                    "li",
                    vec![],
                    self.lower_nodes(&item.children, tight),
                ));
            }
        }
        SyntaxNode::List { ordered: list.ordered, children: items }
    }

    fn lower_table(&self, table: &mdast::Table) -> SyntaxNode {
        let mut sections = Vec::with_capacity(2);

        let mut rows = table.children.iter().filter_map(|row| match row {
            mdast::Node::TableRow(row) => Some(row),
            _ => None,
        });

        if let Some(header) = rows.next() {
            sections.push(SyntaxNode::element(
                "thead",
                vec![],
                vec![self.lower_table_row(header, true, &table.align)],
            ));
        }

        let body_rows: Vec<SyntaxNode> =
            rows.map(|row| self.lower_table_row(row, false, &table.align)).collect();
        if !body_rows.is_empty() {
            sections.push(SyntaxNode::element("tbody", vec![], body_rows));
        }

        SyntaxNode::element("table", vec![], sections)
    }

    fn lower_table_row(
        &self,
        row: &mdast::TableRow,
        header: bool,
        aligns: &[mdast::AlignKind],
    ) -> SyntaxNode {
        let tag = if header { "th" } else { "td" };
        let mut cells = Vec::with_capacity(row.children.len());
        for (index, cell) in row.children.iter().enumerate() {
            if let mdast::Node::TableCell(cell) = cell {
                let mut attrs = Vec::new();
                if let Some(align) = aligns.get(index).and_then(align_name) {
                    attrs.push(attr("align", align));
                }
                cells.push(SyntaxNode::element(tag, attrs, self.lower_nodes(&cell.children, false)));
            }
        }
        SyntaxNode::element("tr", vec![], cells)
    }
}

fn align_name(align: &mdast::AlignKind) -> Option<&'static str> {
    match align {
        mdast::AlignKind::Left => Some("left"),
        mdast::AlignKind::Right => Some("right"),
        mdast::AlignKind::Center => Some("center"),
        mdast::AlignKind::None => None,
    }
}

fn collect_definitions(node: &mdast::Node, definitions: &mut HashMap<String, ReferenceTarget>) {
    if let mdast::Node::Definition(def) = node {
        definitions.entry(def.identifier.clone()).or_insert_with(|| ReferenceTarget {
            url: def.url.clone(),
            title: def.title.clone(),
        });
    }
    if let Some(children) = node.children() {
        for child in children {
            collect_definitions(child, definitions);
        }
    }
}
