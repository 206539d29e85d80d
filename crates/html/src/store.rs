//! The storage collaborator boundary.
//!
//! Documents live as `<slug>.md` files in a flat content directory. The
//! store answers existence before any read, so a missing document stays a
//! boundary-level not-found condition and never reaches the pipeline.

use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised at the storage boundary, before the pipeline runs.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No document exists for the requested slug.
    #[error("document not found: {0}")]
    NotFound(String),
    /// Underlying filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Flat directory of Markdown documents addressed by slug.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    /// Creates a store rooted at the given content directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Whether a document exists for the slug.
    pub fn exists(&self, slug: &str) -> bool {
        self.path_for(slug).is_some_and(|path| path.is_file())
    }

    /// Loads the raw source text for the slug.
    pub fn load(&self, slug: &str) -> Result<String, StoreError> {
        let path = self
            .path_for(slug)
            .filter(|path| path.is_file())
            .ok_or_else(|| StoreError::NotFound(slug.to_string()))?;
        Ok(fs::read_to_string(path)?)
    }

    /// Resolves the on-disk path for a slug.
    ///
    /// Slugs with path separators or leading dots cannot name a document.
    fn path_for(&self, slug: &str) -> Option<PathBuf> {
        if slug.is_empty() || slug.contains(['/', '\\']) || slug.starts_with('.') {
            return None;
        }
        Some(self.root.join(format!("{slug}.md")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(docs: &[(&str, &str)]) -> (tempfile::TempDir, ContentStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        for (slug, content) in docs {
            fs::write(dir.path().join(format!("{slug}.md")), content).expect("write");
        }
        let store = ContentStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn existence_is_answered_before_any_read() {
        let (_dir, store) = store_with(&[("first-post", "# Hi")]);
        assert!(store.exists("first-post"));
        assert!(!store.exists("missing"));
    }

    #[test]
    fn load_returns_document_text() {
        let (_dir, store) = store_with(&[("first-post", "---\ntitle: X\n---\nBody")]);
        let text = store.load("first-post").expect("load");
        assert!(text.contains("title: X"));
    }

    #[test]
    fn missing_document_is_not_found() {
        let (_dir, store) = store_with(&[]);
        assert!(matches!(store.load("nope"), Err(StoreError::NotFound(slug)) if slug == "nope"));
    }

    #[test]
    fn traversal_slugs_are_rejected() {
        let (_dir, store) = store_with(&[("ok", "x")]);
        assert!(!store.exists("../ok"));
        assert!(!store.exists(".hidden"));
        assert!(matches!(store.load("sub/dir"), Err(StoreError::NotFound(_))));
    }
}
