//! The reflow engine: wraps styled text to a column budget.
//!
//! [`wrap`] re-flows inline-styled text (with embedded ANSI escapes) to a
//! target width:
//!
//! - escape sequences are atomic and occupy no columns;
//! - the hard-break marker [`HARD_BREAK`] always forces a new line, while
//!   ordinary whitespace (space, tab, newline) only delimits tokens and is
//!   collapsed during re-flow;
//! - tokens are packed greedily, one separating space between neighbors;
//! - a token wider than the whole budget fills the current line's remaining
//!   columns, then continues in full-width slices, the final slice staying
//!   open for further tokens;
//! - when a break lands inside a styled span, the closed line is terminated
//!   (SGR reset, hyperlink end) and the continuation re-opens the tracked
//!   styles after the indent prefix, so styling never bleeds across lines;
//! - every output line starts with `indent`, and no line carries trailing
//!   whitespace.
//!
//! # Example
//!
//! ```
//! use inkdown_text::wrap;
//!
//! let lines = wrap("Now is the time: 01234567890", 10, "");
//! assert_eq!(lines, vec!["Now is the", "time: 0123", "4567890"]);
//! ```

use crate::escape::{self, segments, Segment};
use crate::measurement::{scalar_width, visual_width_with, WidthMode};

/// Marker for an explicit line break that survives re-flow.
pub const HARD_BREAK: char = '\r';

/// Wraps `text` to `width` columns in [`WidthMode::Narrow`], prefixing each
/// line with `indent`.
pub fn wrap(text: &str, width: usize, indent: &str) -> Vec<String> {
    wrap_with(text, width, indent, WidthMode::Narrow)
}

/// Wraps `text` to `width` columns, prefixing each line with `indent`.
///
/// The indent's own visual width is charged against `width`; the budget for
/// content never drops below one column.
pub fn wrap_with(text: &str, width: usize, indent: &str, mode: WidthMode) -> Vec<String> {
    let budget = width.saturating_sub(visual_width_with(indent, mode)).max(1);

    // Fast path: single-line input that already fits comes back untouched.
    if !text.contains([HARD_BREAK, '\n']) && visual_width_with(text, mode) <= budget {
        return vec![format!("{indent}{text}")];
    }

    let mut wrapper = Wrapper::new(budget, indent, mode);
    for section in text.split(HARD_BREAK) {
        wrapper.reflow_section(section);
    }
    wrapper.lines
}

/// [`wrap`] joined with newlines.
pub fn reflow(text: &str, width: usize, indent: &str) -> String {
    wrap(text, width, indent).join("\n")
}

/// [`wrap_with`] joined with newlines.
pub fn reflow_with(text: &str, width: usize, indent: &str, mode: WidthMode) -> String {
    wrap_with(text, width, indent, mode).join("\n")
}

/// One word plus any escape sequences glued to it. Escapes contribute no
/// width but travel with the token so they are never separated from the
/// characters they style.
#[derive(Default)]
struct Token {
    text: String,
    width: usize,
}

/// Splits a hard-break section into tokens on unescaped whitespace.
fn tokenize(section: &str, mode: WidthMode) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = Token::default();
    for segment in segments(section) {
        match segment {
            Segment::Escape(esc) => current.text.push_str(esc),
            Segment::Text(text) => {
                for c in text.chars() {
                    if c == ' ' || c == '\t' || c == '\n' {
                        if !current.text.is_empty() {
                            tokens.push(std::mem::take(&mut current));
                        }
                    } else {
                        current.width += scalar_width(c, mode);
                        current.text.push(c);
                    }
                }
            }
        }
    }
    if !current.text.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// SGR and OSC 8 state open at the current position, used to terminate a
/// line cleanly and re-open the same styling on the continuation.
#[derive(Default)]
struct StyleTracker {
    sgr: Vec<String>,
    link: Option<String>,
}

impl StyleTracker {
    fn note(&mut self, seq: &str) {
        if escape::is_sgr(seq) {
            if escape::is_reset(seq) {
                self.sgr.clear();
            } else {
                self.sgr.push(seq.to_string());
            }
        } else if escape::is_hyperlink_open(seq) {
            self.link = Some(seq.to_string());
        } else if escape::is_hyperlink_close(seq) {
            self.link = None;
        }
    }

    fn reopen(&self) -> String {
        let mut out = self.sgr.concat();
        if let Some(link) = &self.link {
            out.push_str(link);
        }
        out
    }
}

struct Wrapper<'a> {
    budget: usize,
    indent: &'a str,
    mode: WidthMode,
    lines: Vec<String>,
    styles: StyleTracker,
    current: String,
    column: usize,
    /// Whether any token has been placed on the current line.
    committed: bool,
}

impl<'a> Wrapper<'a> {
    fn new(budget: usize, indent: &'a str, mode: WidthMode) -> Self {
        let mut wrapper = Wrapper {
            budget,
            indent,
            mode,
            lines: Vec::new(),
            styles: StyleTracker::default(),
            current: String::new(),
            column: 0,
            committed: false,
        };
        wrapper.start_line();
        wrapper
    }

    fn reflow_section(&mut self, section: &str) {
        for token in tokenize(section, self.mode) {
            self.place(token);
        }
        // Hard breaks always close the line; empty sections emit nothing.
        if self.committed {
            self.break_line();
        }
    }

    fn place(&mut self, token: Token) {
        if self.column == 0 {
            if token.width <= self.budget {
                self.commit(&token);
            } else {
                self.split_overlong(&token, self.budget);
            }
        } else if self.column + 1 + token.width <= self.budget {
            self.current.push(' ');
            self.column += 1;
            self.commit(&token);
        } else if token.width <= self.budget {
            self.break_line();
            self.commit(&token);
        } else {
            // Oversized token: fill what is left of this line, then slice.
            let lead = self.budget.saturating_sub(self.column + 1);
            if lead == 0 {
                self.break_line();
                self.split_overlong(&token, self.budget);
            } else {
                self.current.push(' ');
                self.column += 1;
                self.split_overlong(&token, lead);
            }
        }
    }

    /// Appends a whole token to the current line.
    fn commit(&mut self, token: &Token) {
        for segment in segments(&token.text) {
            if let Segment::Escape(esc) = segment {
                self.styles.note(esc);
            }
        }
        self.current.push_str(&token.text);
        self.column += token.width;
        self.committed = true;
    }

    /// Breaks a token wider than a whole line at exact column boundaries.
    /// The first slice gets `first` columns, later slices the full budget,
    /// and the final remainder stays open as the current line.
    fn split_overlong(&mut self, token: &Token, first: usize) {
        let mut left = first;
        for segment in segments(&token.text) {
            match segment {
                Segment::Escape(esc) => {
                    self.styles.note(esc);
                    self.current.push_str(esc);
                    self.committed = true;
                }
                Segment::Text(text) => {
                    for c in text.chars() {
                        let w = scalar_width(c, self.mode);
                        if w > left {
                            self.break_line();
                            left = self.budget;
                        }
                        self.current.push(c);
                        self.column += w;
                        self.committed = true;
                        // A double-width scalar on a one-column budget still
                        // has to land somewhere; it overflows by one.
                        left = left.saturating_sub(w);
                    }
                }
            }
        }
    }

    /// Closes the current line (terminating any open styling) and starts a
    /// fresh one that re-opens the same styling.
    fn break_line(&mut self) {
        let mut line = std::mem::take(&mut self.current);
        if self.styles.link.is_some() {
            line.push_str(escape::HYPERLINK_END);
        }
        if !self.styles.sgr.is_empty() {
            line.push_str(escape::RESET);
        }
        self.lines.push(line);
        self.start_line();
    }

    fn start_line(&mut self) {
        self.current = String::from(self.indent);
        self.current.push_str(&self.styles.reopen());
        self.column = 0;
        self.committed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escape::{hyperlink, RESET};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wrap_greedy_packing() {
        let lines = wrap("Now is the time: 01234567890", 10, "");
        assert_eq!(lines, vec!["Now is the", "time: 0123", "4567890"]);
    }

    #[test]
    fn test_wrap_splits_url_at_column_boundary() {
        let lines = wrap("Now is the time: http://timeanddate.com", 10, "");
        assert_eq!(
            lines,
            vec!["Now is the", "time: http", "://timeand", "date.com"]
        );
    }

    #[test]
    fn test_wrap_short_input_unchanged() {
        assert_eq!(wrap("hello", 80, ""), vec!["hello"]);
        // Idempotent: wrapping the output wraps to itself.
        assert_eq!(wrap("hello", 80, ""), wrap("hello", 80, ""));
    }

    #[test]
    fn test_wrap_hard_break_forces_line() {
        let lines = wrap("Now\ris\rthe time", 10, "");
        assert_eq!(lines, vec!["Now", "is", "the time"]);
    }

    #[test]
    fn test_wrap_consecutive_hard_breaks_collapse() {
        let lines = wrap("one\r\rtwo", 10, "");
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn test_wrap_newline_is_soft() {
        assert_eq!(wrap("foo\nbar", 80, ""), vec!["foo bar"]);
    }

    #[test]
    fn test_wrap_indent_charged_against_width() {
        let lines = wrap("one two three", 9, "  ");
        assert_eq!(lines, vec!["  one two", "  three"]);
    }

    #[test]
    fn test_wrap_no_trailing_whitespace() {
        for line in wrap("a bb ccc dddd eeeee ffffff", 7, "") {
            assert_eq!(line, line.trim_end());
        }
    }

    #[test]
    fn test_wrap_escapes_glue_to_tokens() {
        let lines = wrap("foo \x1b[1mbar\x1b[0m", 7, "");
        assert_eq!(lines, vec!["foo \x1b[1mbar\x1b[0m"]);
    }

    #[test]
    fn test_wrap_reopens_styles_on_continuation() {
        let lines = wrap("\x1b[32mNow is the time\x1b[0m", 10, "");
        assert_eq!(
            lines,
            vec![
                format!("\x1b[32mNow is the{RESET}"),
                "\x1b[32mtime\x1b[0m".to_string(),
            ]
        );
    }

    #[test]
    fn test_wrap_overlong_styled_token_stays_self_contained() {
        let lines = wrap("\x1b[1m0123456789012\x1b[0m", 5, "");
        assert_eq!(
            lines,
            vec![
                format!("\x1b[1m01234{RESET}"),
                format!("\x1b[1m56789{RESET}"),
                "\x1b[1m012\x1b[0m".to_string(),
            ]
        );
    }

    #[test]
    fn test_wrap_reopens_hyperlink_on_continuation() {
        let link = hyperlink("click here please", "http://example.com");
        let lines = wrap(&link, 11, "");
        assert_eq!(
            lines,
            vec![
                "\x1b]8;;http://example.com\x07click here\x1b]8;;\x07".to_string(),
                "\x1b]8;;http://example.com\x07please\x1b]8;;\x07".to_string(),
            ]
        );
    }

    #[test]
    fn test_wrap_wide_mode_counts_double_width() {
        let lines = wrap_with("世界 世界 世界", 9, "", WidthMode::Wide);
        assert_eq!(lines, vec!["世界 世界", "世界"]);
    }

    #[test]
    fn test_reflow_joins_with_newlines() {
        assert_eq!(
            reflow("Now is the time: 01234567890", 10, ""),
            "Now is the\ntime: 0123\n4567890"
        );
    }

    #[test]
    fn test_wrap_indented_continuations_align() {
        let lines = wrap("alpha beta gamma delta", 12, "    ");
        assert_eq!(lines, vec!["    alpha", "    beta", "    gamma", "    delta"]);
    }
}
