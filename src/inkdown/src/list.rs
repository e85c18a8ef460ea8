//! List nesting state and block indentation.

use inkdown_text::visual_width;

/// Numbering style of the enclosing list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numbering {
    Unordered,
    /// Ordered, carrying the number the current item takes.
    Ordered(u64),
}

/// Immutable position of one list item: the nesting depth of its list and
/// the marker it renders with.
///
/// Contexts are passed by value. Advancing to the next sibling or
/// descending into a nested list produces a new context; the caller's copy
/// is never mutated, so sibling counters cannot leak across scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListContext {
    depth: usize,
    numbering: Numbering,
}

impl ListContext {
    /// Context for the first item of a top-level list.
    pub fn top(numbering: Numbering) -> Self {
        ListContext { depth: 1, numbering }
    }

    /// Context for the first item of a list nested one level below this
    /// one. Ordered numbering restarts in the nested scope.
    pub fn nested(&self, numbering: Numbering) -> Self {
        ListContext {
            depth: self.depth + 1,
            numbering,
        }
    }

    /// The context the next sibling item renders under.
    #[must_use]
    pub fn next(&self) -> Self {
        let numbering = match self.numbering {
            Numbering::Unordered => Numbering::Unordered,
            Numbering::Ordered(n) => Numbering::Ordered(n + 1),
        };
        ListContext { numbering, ..*self }
    }

    /// Nesting depth, 1 for a top-level list.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Marker prefix for the current item: `"* "` or `"N. "`.
    pub fn marker(&self) -> String {
        match self.numbering {
            Numbering::Unordered => "* ".to_string(),
            Numbering::Ordered(n) => format!("{n}. "),
        }
    }

    /// Columns the marker occupies; continuation lines are aligned by
    /// padding to this width.
    pub fn marker_width(&self) -> usize {
        visual_width(&self.marker())
    }
}

/// Prefixes every non-empty line of `text` with `unit`. Blank lines stay
/// blank so indented blocks carry no trailing whitespace.
pub fn indent_lines(text: &str, unit: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{unit}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unordered_marker() {
        let context = ListContext::top(Numbering::Unordered);
        assert_eq!(context.marker(), "* ");
        assert_eq!(context.marker_width(), 2);
    }

    #[test]
    fn test_ordered_marker_uses_current_number() {
        let context = ListContext::top(Numbering::Ordered(1));
        assert_eq!(context.marker(), "1. ");
        assert_eq!(context.next().marker(), "2. ");
    }

    #[test]
    fn test_ordered_start_honored() {
        let context = ListContext::top(Numbering::Ordered(3));
        assert_eq!(context.marker(), "3. ");
        assert_eq!(context.next().marker(), "4. ");
    }

    #[test]
    fn test_next_keeps_unordered_marker() {
        let context = ListContext::top(Numbering::Unordered);
        assert_eq!(context.next().marker(), "* ");
        assert_eq!(context.next().depth(), 1);
    }

    #[test]
    fn test_nested_restarts_numbering() {
        let outer = ListContext::top(Numbering::Ordered(1)).next().next();
        assert_eq!(outer.marker(), "3. ");
        let inner = outer.nested(Numbering::Ordered(1));
        assert_eq!(inner.marker(), "1. ");
        assert_eq!(inner.depth(), 2);
        // The outer context is untouched by the nested scope.
        assert_eq!(outer.marker(), "3. ");
        assert_eq!(outer.depth(), 1);
    }

    #[test]
    fn test_double_digit_marker_width() {
        let context = ListContext::top(Numbering::Ordered(10));
        assert_eq!(context.marker(), "10. ");
        assert_eq!(context.marker_width(), 4);
    }

    #[test]
    fn test_indent_lines_prefixes_each_line() {
        assert_eq!(indent_lines("a\nb", "    "), "    a\n    b");
        assert_eq!(indent_lines("single", "  "), "  single");
    }

    #[test]
    fn test_indent_lines_keeps_blank_lines_blank() {
        assert_eq!(indent_lines("a\n\nb", "    "), "    a\n\n    b");
    }
}
