//! Language-aware code block presentation.
//!
//! Every code block becomes a `figure` carrying the highlighted lines and a
//! copy affordance. Unknown languages, unknown themes, and highlighter
//! failures all degrade to plain escaped text; nothing here aborts a render.

use crate::pipeline::{CopyButton, RenderOptions};
use crate::tree::{SyntaxNode, attr, walk_mut};
use markpress_core::error::{Diagnostics, RenderWarning};
use once_cell::sync::Lazy;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Theme used when the configured name is not in the bundled theme set.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

static SYNTAXES: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEMES: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

/// Rewrites every code block into its highlighted presentation subtree.
pub fn apply(tree: &mut SyntaxNode, options: &RenderOptions, diagnostics: &mut Diagnostics) {
    walk_mut(tree, &mut |node| {
        let SyntaxNode::CodeBlock { lang, value } = &*node else { return };
        let figure = build_figure(lang.as_deref(), value, options, diagnostics);
        *node = figure;
    });
}

fn build_figure(
    lang: Option<&str>,
    code: &str,
    options: &RenderOptions,
    diagnostics: &mut Diagnostics,
) -> SyntaxNode {
    let theme_name = resolve_theme_name(&options.highlight_theme);
    let lines = match lang.and_then(|tag| SYNTAXES.find_syntax_by_token(tag)) {
        Some(syntax) => highlight_lines(syntax, code, &THEMES.themes[theme_name])
            .unwrap_or_else(|err| {
                log::warn!("highlighting failed for language {lang:?}: {err}");
                plain_lines(code)
            }),
        None => {
            if let Some(tag) = lang {
                log::debug!("unknown code block language {tag:?}; rendering plain");
                diagnostics.push(RenderWarning::UnknownLanguage { lang: tag.to_string() });
            }
            plain_lines(code)
        }
    };

    let pre = SyntaxNode::element(
        "pre",
        vec![attr("data-theme", theme_name), attr("tabindex", "0")],
        vec![SyntaxNode::element("code", vec![], lines)],
    );

    SyntaxNode::element(
        "figure",
        vec![
            attr("data-code-block", ""),
            attr("data-language", lang.unwrap_or("text")),
        ],
        vec![pre, copy_button(code, &options.copy_button)],
    )
}

fn resolve_theme_name(name: &str) -> &str {
    if THEMES.themes.contains_key(name) {
        name
    } else {
        log::debug!("unknown highlight theme {name:?}; falling back to {DEFAULT_THEME}");
        DEFAULT_THEME
    }
}

fn highlight_lines(
    syntax: &SyntaxReference,
    code: &str,
    theme: &Theme,
) -> Result<Vec<SyntaxNode>, syntect::Error> {
    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut out = Vec::new();

    for line in LinesWithEndings::from(code) {
        let regions = highlighter.highlight_line(line, &SYNTAXES)?;
        let mut tokens = Vec::with_capacity(regions.len());
        for (style, token) in regions {
            let token = token.trim_end_matches(['\r', '\n']);
            if token.is_empty() {
                continue;
            }
            let fg = style.foreground;
            tokens.push(SyntaxNode::element(
                "span",
                vec![attr("style", format!("color:#{:02x}{:02x}{:02x}", fg.r, fg.g, fg.b))],
                vec![SyntaxNode::text(token)],
            ));
        }
        out.push(line_span(tokens));
        out.push(SyntaxNode::text("\n"));
    }

    Ok(out)
}

fn plain_lines(code: &str) -> Vec<SyntaxNode> {
    let mut out = Vec::new();
    for line in code.lines() {
        let content = if line.is_empty() { vec![] } else { vec![SyntaxNode::text(line)] };
        out.push(line_span(content));
        out.push(SyntaxNode::text("\n"));
    }
    out
}

fn line_span(children: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode::element("span", vec![attr("data-line", "")], children)
}

fn copy_button(code: &str, config: &CopyButton) -> SyntaxNode {
    SyntaxNode::element(
        "button",
        vec![
            attr("type", "button"),
            attr("data-copy", ""),
            attr("data-copy-visibility", config.visibility.as_str()),
            attr("data-copy-feedback-ms", config.feedback_duration_ms.to_string()),
            attr("data-code", code),
            attr("aria-label", "Copy code to clipboard"),
        ],
        vec![SyntaxNode::text("Copy")],
    )
}
