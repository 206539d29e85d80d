//! Outline (table of contents) extraction.
//!
//! The outline is a forest nested strictly by heading level: a heading
//! becomes a child of the most recent preceding heading of strictly lower
//! level, and headings with no such predecessor become roots. It can be
//! derived either from the annotated tree or from the serialized HTML;
//! both agree, which is what keeps the anchor bijection intact for
//! collaborators that only hold the HTML string.

use crate::tree::{SyntaxNode, collect_text};
use lol_html::{RewriteStrSettings, element, text};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

/// One outline entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineEntry {
    /// Anchor id matching the rendered heading's `id` attribute.
    pub id: String,
    /// Flattened heading text.
    pub text: String,
    /// Heading level (1-6).
    pub level: u8,
    /// Entries nested under this heading.
    pub children: Vec<OutlineEntry>,
}

/// Lazy document-order iterator over the slugged headings of a tree.
///
/// One-shot within a run; re-derivable by calling [`headings`] again on the
/// same tree.
pub struct Headings<'a> {
    stack: Vec<&'a SyntaxNode>,
}

/// Returns the lazy heading iterator for a tree.
pub fn headings(tree: &SyntaxNode) -> Headings<'_> {
    Headings { stack: vec![tree] }
}

impl<'a> Iterator for Headings<'a> {
    type Item = (u8, &'a str, String);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if let Some(children) = node.children() {
                for child in children.iter().rev() {
                    self.stack.push(child);
                }
            }
            if let SyntaxNode::Heading { level, id: Some(id), children } = node {
                return Some((*level, id.as_str(), collect_text(children)));
            }
        }
        None
    }
}

/// Builds the outline forest from the annotated tree.
pub fn from_tree(tree: &SyntaxNode) -> Vec<OutlineEntry> {
    nest(headings(tree).map(|(level, id, text)| OutlineEntry {
        id: id.to_string(),
        text,
        level,
        children: Vec::new(),
    }))
}

/// Builds the outline forest by scanning serialized HTML for headings
/// carrying an id.
pub fn from_html(html: &str) -> Vec<OutlineEntry> {
    let collected: Rc<RefCell<Vec<OutlineEntry>>> = Rc::new(RefCell::new(Vec::new()));

    let mut handlers = Vec::with_capacity(12);
    for level in 1u8..=6 {
        let entries = Rc::clone(&collected);
        handlers.push(element!(format!("h{level}[id]"), move |el| {
            let id = el.get_attribute("id").unwrap_or_default();
            entries.borrow_mut().push(OutlineEntry {
                id,
                text: String::new(),
                level,
                children: Vec::new(),
            });
            Ok(())
        }));

        let texts = Rc::clone(&collected);
        handlers.push(text!(format!("h{level}[id]"), move |chunk| {
            if let Some(open) = texts.borrow_mut().last_mut() {
                open.text.push_str(chunk.as_str());
            }
            Ok(())
        }));
    }

    let scanned = lol_html::rewrite_str(
        html,
        RewriteStrSettings { element_content_handlers: handlers, ..RewriteStrSettings::default() },
    );
    if let Err(err) = scanned {
        log::warn!("outline scan failed on serialized html: {err}");
        return Vec::new();
    }

    let flat = collected.take().into_iter().map(|mut entry| {
        entry.text = html_escape::decode_html_entities(entry.text.trim()).into_owned();
        entry
    });
    nest(flat)
}

fn nest(entries: impl Iterator<Item = OutlineEntry>) -> Vec<OutlineEntry> {
    let mut roots = Vec::new();
    let mut open: Vec<OutlineEntry> = Vec::new();

    for entry in entries {
        while open.last().is_some_and(|top| top.level >= entry.level) {
            if let Some(done) = open.pop() {
                attach(done, &mut open, &mut roots);
            }
        }
        open.push(entry);
    }
    while let Some(done) = open.pop() {
        attach(done, &mut open, &mut roots);
    }
    roots
}

fn attach(done: OutlineEntry, open: &mut Vec<OutlineEntry>, roots: &mut Vec<OutlineEntry>) {
    match open.last_mut() {
        Some(parent) => parent.children.push(done),
        None => roots.push(done),
    }
}
