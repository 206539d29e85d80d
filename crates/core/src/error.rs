use thiserror::Error;

/// Line/column position inside a source document (1-indexed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Parser error surfaced through the markdown-rs adapter.
///
/// Plain Markdown bodies recover locally from malformed input, so this is
/// an adapter boundary type rather than an expected runtime condition.
#[derive(Debug, Error)]
#[error("markdown parse error at {location}: {message}")]
pub struct ParseError {
    /// Message reported by the parser.
    pub message: String,
    /// Position the parser reported.
    pub location: SourceLocation,
}

/// Recoverable conditions observed while rendering one document.
///
/// Warnings never abort a render; they are collected and logged so callers
/// can surface them next to the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderWarning {
    /// A fenced code block was opened but never closed; the remainder of
    /// the input is rendered as literal code.
    UnclosedCodeFence {
        /// Position of the opening fence.
        location: SourceLocation,
        /// Fence marker character (backtick or tilde).
        marker: char,
    },
    /// A code block declared a language the highlighter does not know;
    /// the block is rendered as plain text.
    UnknownLanguage {
        /// The unrecognized language tag.
        lang: String,
    },
}

impl std::fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderWarning::UnclosedCodeFence { location, marker } => write!(
                f,
                "unclosed code fence ({marker}) at {location}; remainder rendered as literal code"
            ),
            RenderWarning::UnknownLanguage { lang } => {
                write!(f, "unknown code block language {lang:?}; rendered without highlighting")
            }
        }
    }
}

/// Warnings collected over one pipeline run, in observation order.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    /// Recorded warnings.
    pub warnings: Vec<RenderWarning>,
}

impl Diagnostics {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning.
    pub fn push(&mut self, warning: RenderWarning) {
        self.warnings.push(warning);
    }

    /// Whether no warnings were recorded.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}
