//! Code fence scanning for recovery diagnostics.
//!
//! The parser recovers from an unterminated fence by treating the rest of
//! the input as literal code. This scanner detects that condition up front
//! so the pipeline can surface it as a warning next to the rendered output.

use crate::error::{RenderWarning, SourceLocation};

/// An opening fence with no matching closer before end of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnclosedFence {
    /// Line of the opening fence (1-indexed, relative to the body).
    pub line: usize,
    /// Fence marker character (backtick or tilde).
    pub marker: char,
}

impl From<UnclosedFence> for RenderWarning {
    fn from(fence: UnclosedFence) -> Self {
        RenderWarning::UnclosedCodeFence {
            location: SourceLocation::new(fence.line, 1),
            marker: fence.marker,
        }
    }
}

/// Scans a Markdown body for a fenced code block that never closes.
///
/// Follows the CommonMark fence rules: an opener has 0-3 columns of
/// indentation and at least three identical markers; a closer uses the same
/// marker, at least the opener's length, and carries no info string.
pub fn scan_unclosed_fence(body: &str) -> Option<UnclosedFence> {
    let mut open: Option<(usize, char, usize)> = None;

    for (index, raw) in body.lines().enumerate() {
        let (indent, rest) = split_indent(raw);
        if indent > 3 {
            // 4+ columns is an indented code block (or fence content)
            continue;
        }

        match open {
            None => {
                if let Some((marker, length)) = fence_marker(rest) {
                    open = Some((index + 1, marker, length));
                }
            }
            Some((_, marker, length)) => {
                if let Some((closer, closer_length)) = fence_marker(rest)
                    && closer == marker
                    && closer_length >= length
                    && rest.chars().skip_while(|&c| c == closer).all(char::is_whitespace)
                {
                    open = None;
                }
            }
        }
    }

    open.map(|(line, marker, _)| UnclosedFence { line, marker })
}

/// Returns (visual columns, rest after whitespace); tabs expand to the next
/// 4-column boundary per CommonMark.
fn split_indent(line: &str) -> (usize, &str) {
    let mut columns = 0;
    let mut bytes = 0;
    for b in line.bytes() {
        match b {
            b' ' => {
                columns += 1;
                bytes += 1;
            }
            b'\t' => {
                columns += 4 - (columns % 4);
                bytes += 1;
            }
            _ => break,
        }
    }
    (columns, &line[bytes..])
}

fn fence_marker(rest: &str) -> Option<(char, usize)> {
    let first = rest.chars().next()?;
    if first != '`' && first != '~' {
        return None;
    }
    let length = rest.chars().take_while(|&c| c == first).count();
    (length >= 3).then_some((first, length))
}
