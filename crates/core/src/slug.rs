use std::collections::HashSet;

/// Derives the slug candidate for a heading text.
///
/// Lowercases the text, keeps alphanumeric characters (Unicode included),
/// collapses every run of other characters into a single `-`, and trims
/// separators at both ends. An empty result falls back to `section`.
///
/// # Examples
///
/// ```
/// use markpress_core::slug::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Why Rust?"), "why-rust");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_separator = true;
        }
    }

    if slug.is_empty() {
        slug.push_str("section");
    }
    slug
}

/// Assigns document-unique slugs to headings in document order.
///
/// The first heading with a given candidate gets the candidate itself;
/// later collisions get `-1`, `-2`, ... suffixes, incrementing until the
/// result is unique within the document.
#[derive(Debug, Default)]
pub struct Slugger {
    used: HashSet<String>,
}

impl Slugger {
    /// Creates an empty slugger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the unique slug for the given heading text.
    pub fn assign(&mut self, text: &str) -> String {
        let base = slugify(text);
        let mut slug = base.clone();
        let mut suffix = 0usize;
        while !self.used.insert(slug.clone()) {
            suffix += 1;
            slug = format!("{base}-{suffix}");
        }
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn punctuation_runs_collapse_to_one_separator() {
        assert_eq!(slugify("TypeScript & JSX"), "typescript-jsx");
        assert_eq!(slugify("a -- b"), "a-b");
        assert_eq!(slugify("import.meta.env"), "import-meta-env");
    }

    #[test]
    fn boundary_separators_are_trimmed() {
        assert_eq!(slugify("  Hello  "), "hello");
        assert_eq!(slugify("Why Rust?"), "why-rust");
        assert_eq!(slugify("...dots..."), "dots");
    }

    #[test]
    fn unicode_alphanumerics_survive() {
        assert_eq!(slugify("Héllo Wörld"), "héllo-wörld");
        assert_eq!(slugify("多言語 ガイド"), "多言語-ガイド");
    }

    #[test]
    fn empty_candidate_falls_back() {
        assert_eq!(slugify("!!!"), "section");
        assert_eq!(slugify(""), "section");
    }

    #[test]
    fn duplicates_get_incrementing_suffixes() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.assign("Intro"), "intro");
        assert_eq!(slugger.assign("Intro"), "intro-1");
        assert_eq!(slugger.assign("Intro"), "intro-2");
    }

    #[test]
    fn suffix_skips_naturally_taken_slugs() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.assign("Intro"), "intro");
        assert_eq!(slugger.assign("Intro 1"), "intro-1");
        assert_eq!(slugger.assign("Intro"), "intro-2");
    }

    #[test]
    fn distinct_texts_do_not_interfere() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.assign("Setup"), "setup");
        assert_eq!(slugger.assign("Usage"), "usage");
        assert_eq!(slugger.assign("Setup"), "setup-1");
    }
}
