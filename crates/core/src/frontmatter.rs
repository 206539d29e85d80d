use serde_json::Value as JsonValue;
use thiserror::Error;

/// A source document split into its metadata header and Markdown body.
///
/// The body borrows the tail of the original source text; the pair lives
/// for the duration of one render.
#[derive(Debug)]
pub struct Document<'a> {
    /// Parsed metadata as an ordered JSON mapping.
    pub metadata: JsonValue,
    /// The Markdown body following the metadata block.
    pub body: &'a str,
}

/// Errors raised while splitting or parsing the metadata block.
///
/// All variants are fatal for the affected document; a body with no
/// metadata block at all is not an error.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Opening `---` fence with no matching closer before end of input.
    #[error("unterminated metadata block: expected closing '---'")]
    Unterminated,
    /// The enclosed block is not valid YAML.
    #[error("metadata is not valid YAML: {0}")]
    Yaml(String),
    /// The YAML root is something other than a mapping.
    #[error("metadata must be a mapping of keys to values")]
    NotAMapping,
}

/// Splits a leading `---`-delimited metadata block off a source document.
///
/// Metadata is optional: when the first non-blank line is not an opening
/// fence, the whole input is returned as body with an empty mapping. A UTF-8
/// BOM and blank lines before the opening fence are tolerated.
pub fn split_document(source: &str) -> Result<Document<'_>, MetadataError> {
    let text = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut lines = Lines::new(text);

    let opening = loop {
        match lines.next() {
            Some(line) if line.text.trim().is_empty() => continue,
            other => break other,
        }
    };

    let opening = match opening {
        Some(line) if is_fence(line.text) => line,
        _ => {
            return Ok(Document { metadata: empty_mapping(), body: text });
        }
    };

    let block_start = opening.end;
    for line in lines {
        if is_fence(line.text) {
            let block = text[block_start..line.start].trim_end_matches(['\r', '\n']);
            let metadata = parse_mapping(block)?;
            return Ok(Document { metadata, body: &text[line.end..] });
        }
    }

    Err(MetadataError::Unterminated)
}

fn parse_mapping(block: &str) -> Result<JsonValue, MetadataError> {
    if block.trim().is_empty() {
        return Ok(empty_mapping());
    }

    let yaml: serde_yaml::Value =
        serde_yaml::from_str(block).map_err(|err| MetadataError::Yaml(err.to_string()))?;
    let json =
        serde_json::to_value(yaml).map_err(|err| MetadataError::Yaml(err.to_string()))?;

    match json {
        JsonValue::Null => Ok(empty_mapping()),
        JsonValue::Object(_) => Ok(json),
        _ => Err(MetadataError::NotAMapping),
    }
}

fn empty_mapping() -> JsonValue {
    JsonValue::Object(Default::default())
}

fn is_fence(line: &str) -> bool {
    line.trim_end_matches('\r') == "---"
}

/// A line of the source with its byte range; `end` points past the newline.
struct Line<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

struct Lines<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Line<'a>> {
        if self.pos >= self.text.len() {
            return None;
        }
        let start = self.pos;
        let rest = &self.text[start..];
        let (text, advance) = match rest.find('\n') {
            Some(i) => (&rest[..i], i + 1),
            None => (rest, rest.len()),
        };
        self.pos = start + advance;
        Some(Line { text, start, end: self.pos })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(input: &str) -> Document<'_> {
        split_document(input).expect("split should succeed")
    }

    #[test]
    fn no_metadata_returns_whole_input_as_body() {
        let doc = split("# Title\nBody");
        assert_eq!(doc.metadata, empty_mapping());
        assert_eq!(doc.body, "# Title\nBody");
    }

    #[test]
    fn splits_basic_header() {
        let doc = split("---\ntitle: Example\ndate: 2024-09-02\n---\n# Hello");
        assert_eq!(doc.metadata.get("title").and_then(JsonValue::as_str), Some("Example"));
        assert_eq!(doc.metadata.get("date").and_then(JsonValue::as_str), Some("2024-09-02"));
        assert_eq!(doc.body, "# Hello");
    }

    #[test]
    fn preserves_authored_key_order() {
        let doc = split("---\nzebra: 1\nalpha: 2\n---\nBody");
        let keys: Vec<&String> = doc.metadata.as_object().expect("mapping").keys().collect();
        assert_eq!(keys, ["zebra", "alpha"]);
    }

    #[test]
    fn empty_block_yields_empty_mapping() {
        let doc = split("---\n---\n# Body");
        assert_eq!(doc.metadata, empty_mapping());
        assert_eq!(doc.body, "# Body");
    }

    #[test]
    fn tolerates_bom_and_leading_blank_lines() {
        let doc = split("\u{feff}\n   \n---\nfoo: bar\n---\nBody");
        assert_eq!(doc.metadata.get("foo").and_then(JsonValue::as_str), Some("bar"));
        assert_eq!(doc.body, "Body");
    }

    #[test]
    fn tolerates_crlf_line_endings() {
        let doc = split("---\r\ntitle: X\r\n---\r\nBody");
        assert_eq!(doc.metadata.get("title").and_then(JsonValue::as_str), Some("X"));
        assert_eq!(doc.body, "Body");
    }

    #[test]
    fn nested_values_survive_the_yaml_round_trip() {
        let doc = split("---\ntitle: Post\ntags:\n  - rust\n  - markdown\n---\nBody");
        let tags = doc.metadata.get("tags").and_then(JsonValue::as_array).expect("tags");
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn unterminated_block_is_fatal() {
        let err = split_document("---\ntitle: X\n# Hello").unwrap_err();
        assert!(matches!(err, MetadataError::Unterminated));
    }

    #[test]
    fn invalid_yaml_is_fatal() {
        let err = split_document("---\ninvalid: [unterminated\n---\nBody").unwrap_err();
        assert!(matches!(err, MetadataError::Yaml(_)), "{err:?}");
    }

    #[test]
    fn non_mapping_root_is_rejected() {
        let err = split_document("---\n- a\n- b\n---\nBody").unwrap_err();
        assert!(matches!(err, MetadataError::NotAMapping));
    }

    #[test]
    fn closing_fence_at_end_of_input_leaves_empty_body() {
        let doc = split("---\ntitle: X\n---");
        assert_eq!(doc.metadata.get("title").and_then(JsonValue::as_str), Some("X"));
        assert_eq!(doc.body, "");
    }
}
