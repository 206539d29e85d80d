//! The document rendering pipeline.
//!
//! One render is a single synchronous computation over an owned tree: split
//! the metadata, parse the body, lower to the syntax tree, run the ordered
//! transform chain, serialize, extract the outline. The pipeline performs
//! no I/O and holds no locks; concurrent renders share nothing but the
//! lazily-initialized highlighting assets, which are immutable after init.

use crate::outline::{self, OutlineEntry};
use crate::transform::highlight::DEFAULT_THEME;
use crate::{lower, serialize, transform};
use markpress_core::error::{Diagnostics, ParseError, RenderWarning};
use markpress_core::fence::scan_unclosed_fence;
use markpress_core::frontmatter::{MetadataError, split_document};
use markpress_core::parse::{ParseOptions, parse_body};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Copy-affordance visibility mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// The copy button is always visible.
    #[default]
    Always,
    /// The copy button appears on hover.
    Hover,
}

impl Visibility {
    /// The attribute value for this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Always => "always",
            Visibility::Hover => "hover",
        }
    }
}

/// Copy button configuration for highlighted code blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyButton {
    /// Visibility mode.
    #[serde(default)]
    pub visibility: Visibility,
    /// How long the copied-feedback state lasts, in milliseconds.
    #[serde(default = "default_feedback_ms")]
    pub feedback_duration_ms: u32,
}

fn default_feedback_ms() -> u32 {
    3000
}

impl Default for CopyButton {
    fn default() -> Self {
        Self { visibility: Visibility::default(), feedback_duration_ms: default_feedback_ms() }
    }
}

/// Options for one pipeline run; passed by reference and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Document title for the wrap stage; falls back to the metadata
    /// `title` scalar when absent.
    #[serde(default)]
    pub title: Option<String>,
    /// Highlighting theme name; unknown names fall back to the default
    /// bundled theme.
    #[serde(default = "default_theme")]
    pub highlight_theme: String,
    /// Copy affordance configuration.
    #[serde(default)]
    pub copy_button: CopyButton,
    /// Markdown parsing toggles.
    #[serde(skip)]
    pub parse: ParseOptions,
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: None,
            highlight_theme: default_theme(),
            copy_button: CopyButton::default(),
            parse: ParseOptions::default(),
        }
    }
}

/// Output handed to the rendering collaborator.
///
/// The collaborator embeds `html` verbatim and renders `outline` as
/// navigation; it must not re-derive heading ids, which would break the
/// anchor bijection.
#[derive(Debug, Serialize)]
pub struct RenderedDocument {
    /// Metadata mapping from the document header.
    pub metadata: JsonValue,
    /// Serialized HTML document.
    pub html: String,
    /// Outline forest mirroring the rendered headings.
    pub outline: Vec<OutlineEntry>,
    /// Recoveries observed during the run.
    #[serde(skip)]
    pub warnings: Vec<RenderWarning>,
}

/// Fatal rendering failures.
///
/// Recoverable conditions (unterminated fences, unknown languages) never
/// land here; they surface as [`RenderedDocument::warnings`].
#[derive(Debug, Error)]
pub enum RenderError {
    /// The metadata block is malformed.
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    /// The markdown adapter rejected the body.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Renders one document from raw source text.
pub fn render(source: &str, options: &RenderOptions) -> Result<RenderedDocument, RenderError> {
    let document = split_document(source)?;
    let mut diagnostics = Diagnostics::new();

    if let Some(unclosed) = scan_unclosed_fence(document.body) {
        let warning = RenderWarning::from(unclosed);
        log::warn!("{warning}");
        diagnostics.push(warning);
    }

    let mdast = parse_body(document.body, &options.parse)?;
    let mut tree = lower::lower(&mdast);

    let title = options
        .title
        .clone()
        .or_else(|| {
            document.metadata.get("title").and_then(JsonValue::as_str).map(str::to_owned)
        });
    transform::apply(&mut tree, title.as_deref(), options, &mut diagnostics);

    let html = serialize::to_html(&tree);
    let outline = outline::from_tree(&tree);

    Ok(RenderedDocument {
        metadata: document.metadata,
        html,
        outline,
        warnings: diagnostics.warnings,
    })
}
