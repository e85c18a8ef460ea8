//! Syntax highlighting for fenced code blocks.
//!
//! Highlighting is best-effort: the renderer logs any error here and falls
//! back to the plain code style, so an unknown language or theme never
//! fails a render.

use std::sync::LazyLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};
use thiserror::Error;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Errors from code block highlighting.
#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("language not found: {0}")]
    UnknownLanguage(String),
    #[error("theme not found: {0}")]
    UnknownTheme(String),
    #[error("highlighting failed: {0}")]
    Syntax(#[from] syntect::Error),
}

/// Highlights `code` for `language` under `theme`, returning 24-bit ANSI
/// styled text with a trailing style reset.
pub fn highlight(code: &str, language: &str, theme: &str) -> Result<String, HighlightError> {
    let syntax = SYNTAX_SET
        .find_syntax_by_token(language)
        .ok_or_else(|| HighlightError::UnknownLanguage(language.to_string()))?;
    let theme = THEME_SET
        .themes
        .get(theme)
        .ok_or_else(|| HighlightError::UnknownTheme(theme.to_string()))?;

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut out = String::with_capacity(code.len() * 2);
    for line in LinesWithEndings::from(code) {
        let regions = highlighter.highlight_line(line, &SYNTAX_SET)?;
        out.push_str(&as_24_bit_terminal_escaped(&regions, false));
    }
    out.push_str(inkdown_text::RESET);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkdown_text::strip_escapes;

    const THEME: &str = "base16-eighties.dark";

    #[test]
    fn test_highlight_known_language() {
        let out = highlight("fn main() {}", "rust", THEME).expect("rust is bundled");
        assert!(out.contains("\x1b[38;2;"));
        assert!(out.ends_with(inkdown_text::RESET));
        assert_eq!(strip_escapes(&out), "fn main() {}");
    }

    #[test]
    fn test_highlight_multiline_keeps_line_structure() {
        let out = highlight("let a = 1;\nlet b = 2;", "rust", THEME).expect("rust is bundled");
        assert_eq!(strip_escapes(&out), "let a = 1;\nlet b = 2;");
    }

    #[test]
    fn test_unknown_language_is_an_error() {
        let err = highlight("xyz", "nosuchlanguage", THEME).expect_err("language is unknown");
        assert!(matches!(err, HighlightError::UnknownLanguage(_)));
        assert!(err.to_string().contains("nosuchlanguage"));
    }

    #[test]
    fn test_unknown_theme_is_an_error() {
        let err = highlight("xyz", "rust", "no-such-theme").expect_err("theme is unknown");
        assert!(matches!(err, HighlightError::UnknownTheme(_)));
    }
}
