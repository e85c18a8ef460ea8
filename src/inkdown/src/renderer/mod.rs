//! Markdown rendering.
//!
//! [`TerminalRenderer`] exposes one formatting method per markdown
//! construct. Each method takes the already-rendered text of the
//! construct's children and returns the finished construct, so formatting
//! composes bottom-up; [`TerminalRenderer::render`] walks a parsed event
//! stream and wires the two together.
//!
//! Block-level methods share one shape: apply the inline transforms
//! (emoji, entity unescaping, code span colon restore), re-flow to the
//! configured width when enabled, apply this block's prefix, and append a
//! single blank-line separator.

mod state;

use pulldown_cmark::{Options, Parser};

use inkdown_text::{hyperlink, reflow_with, visual_width, wrap_with};

use crate::emoji::insert_emojis;
use crate::highlight::highlight;
use crate::list::{indent_lines, ListContext};
use crate::options::RenderOptions;
use crate::table::{render_table, Align};

use state::RenderState;

/// Placeholder that protects literal colons in code spans from emoji
/// substitution; the block-level transform swaps it back.
const COLON_PLACEHOLDER: &str = "*#COLON|*";

/// Renders `markdown` to a single ANSI string using `options`.
pub fn render_markdown(markdown: &str, options: RenderOptions) -> String {
    TerminalRenderer::new(options).render(markdown)
}

/// Markdown to ANSI terminal text renderer.
///
/// Rendering never writes renderer state, so one instance can serve any
/// number of concurrent [`TerminalRenderer::render`] calls.
pub struct TerminalRenderer {
    options: RenderOptions,
}

impl TerminalRenderer {
    pub fn new(options: RenderOptions) -> Self {
        TerminalRenderer { options }
    }

    /// Parses `markdown` (tables, strikethrough and task lists enabled) and
    /// renders the whole document.
    pub fn render(&self, markdown: &str) -> String {
        let mut parser_options = Options::empty();
        parser_options.insert(Options::ENABLE_TABLES);
        parser_options.insert(Options::ENABLE_STRIKETHROUGH);
        parser_options.insert(Options::ENABLE_TASKLISTS);
        let parser = Parser::new_ext(markdown, parser_options);
        RenderState::new(self).run(parser)
    }

    /// Formats a paragraph.
    pub fn paragraph(&self, text: &str) -> String {
        let text = self.transform(text);
        let styled = (self.options.paragraph)(&text);
        let flowed = self.reflow(&styled, self.options.width);
        format!("{flowed}\n\n")
    }

    /// Formats a heading: `#` section prefix, re-flow, then the level
    /// style. Level 1 takes the distinct `first_heading` style.
    pub fn heading(&self, text: &str, level: usize) -> String {
        let text = self.transform(text);
        let text = if self.options.show_section_prefix {
            format!("{} {text}", "#".repeat(level))
        } else {
            text
        };
        let flowed = self.reflow(&text, self.options.width);
        let styled = if level == 1 {
            (self.options.first_heading)(&flowed)
        } else {
            (self.options.heading)(&flowed)
        };
        format!("{styled}\n\n")
    }

    /// Formats a block quote: children are re-flowed to leave room for the
    /// indent unit, then the styled body is indented by one unit.
    pub fn blockquote(&self, text: &str) -> String {
        let body = text.trim();
        let body = if self.options.reflow_text {
            let inner = self
                .options
                .width
                .saturating_sub(visual_width(&self.options.tab));
            body.split("\n\n")
                .filter(|chunk| !chunk.trim().is_empty())
                .map(|chunk| {
                    // Indented chunks are nested blocks (lists, code,
                    // quotes) that are already laid out; only flowing
                    // prose gets re-wrapped for the narrower interior.
                    if chunk.starts_with([' ', '\t']) {
                        chunk.trim_end().to_string()
                    } else {
                        self.reflow_at(chunk.trim(), inner)
                    }
                })
                .collect::<Vec<_>>()
                .join("\n\n")
        } else {
            body.to_string()
        };
        let indented = indent_lines(&body, &self.options.tab);
        format!("{}\n\n", (self.options.blockquote)(&indented))
    }

    /// Formats a code block, syntax highlighting when the language is known
    /// and falling back to the plain code style otherwise.
    pub fn code(&self, code: &str, language: Option<&str>) -> String {
        let body = code.trim_end_matches('\n');
        let rendered = match language.filter(|lang| !lang.is_empty()) {
            Some(lang) => match highlight(body, lang, &self.options.code_theme) {
                Ok(highlighted) => highlighted,
                Err(error) => {
                    tracing::debug!(%error, "syntax highlighting failed, using code style");
                    (self.options.code)(body)
                }
            },
            None => (self.options.code)(body),
        };
        format!("{}\n\n", indent_lines(&rendered, &self.options.tab))
    }

    /// Horizontal rule: a full-width dash line.
    pub fn hr(&self) -> String {
        let line = "-".repeat(self.options.width);
        format!("{}\n\n", (self.options.hr)(&line))
    }

    /// Formats a complete list from its already-rendered items, indenting
    /// the whole body one unit. Nested lists pass through here once per
    /// level, which is what makes nesting indent additively.
    pub fn list(&self, body: &str) -> String {
        format!("{}\n\n", indent_lines(body.trim_end(), &self.options.tab))
    }

    /// Formats one list item under `context`: marker on the first line,
    /// continuation lines aligned under the first line's text column.
    /// Later lines of `text` belong to nested blocks that are already laid
    /// out and are re-attached untouched.
    pub fn list_item(&self, text: &str, context: ListContext) -> String {
        let text = self.transform(text.trim());
        let marker = context.marker();
        let (head, tail) = match text.split_once('\n') {
            Some((head, tail)) => (head.to_string(), Some(tail.to_string())),
            None => (text, None),
        };
        let head = if self.options.reflow_text {
            let unit_width = visual_width(&self.options.tab);
            let budget = self
                .options
                .width
                .saturating_sub(context.depth() * unit_width)
                .saturating_sub(context.marker_width());
            let hanging = " ".repeat(context.marker_width());
            wrap_with(&head, budget, "", self.options.width_mode())
                .join(&format!("\n{hanging}"))
        } else {
            head
        };
        let mut item = format!("{marker}{head}");
        if let Some(tail) = tail {
            item.push('\n');
            item.push_str(&tail);
        }
        (self.options.list_item)(&item)
    }

    /// Lays out a table from pre-rendered cells.
    pub fn table(&self, header: &[String], rows: &[Vec<String>], alignments: &[Align]) -> String {
        let rendered = render_table(header, rows, alignments, &self.options.table_options);
        format!("{}\n\n", (self.options.table)(rendered.trim_end()))
    }

    /// One table cell: inline transforms only, layout happens in
    /// [`TerminalRenderer::table`].
    pub fn table_cell(&self, text: &str) -> String {
        self.transform(text)
    }

    /// Inline code. Colons are masked so emoji substitution never rewrites
    /// code; the enclosing block's transform restores them.
    pub fn codespan(&self, code: &str) -> String {
        (self.options.codespan)(&code.replace(':', COLON_PLACEHOLDER))
    }

    pub fn strong(&self, text: &str) -> String {
        (self.options.strong)(text)
    }

    pub fn em(&self, text: &str) -> String {
        (self.options.em)(text)
    }

    pub fn del(&self, text: &str) -> String {
        (self.options.del)(text)
    }

    /// Raw HTML is passed through under the html style, tags uninterpreted
    /// (the driver special-cases `<br>`).
    pub fn html(&self, html: &str) -> String {
        (self.options.html)(html)
    }

    /// Hard line break. In re-flow mode this is the hard-break marker, so
    /// the break survives wrapping.
    pub fn br(&self) -> String {
        if self.options.reflow_text {
            inkdown_text::HARD_BREAK.to_string()
        } else {
            "\n".to_string()
        }
    }

    /// Inline link: `text (href)`, collapsing to a single form when the
    /// text and target are identical, or an OSC 8 hyperlink when enabled.
    /// With sanitization on, a target that decodes to a `javascript:`
    /// scheme (or does not decode at all) renders as nothing.
    pub fn link(&self, href: &str, title: Option<&str>, text: &str) -> String {
        if self.options.sanitize_links && !link_is_safe(href) {
            tracing::debug!(href, "dropping link with unsafe target");
            return String::new();
        }
        let has_text = !text.is_empty() && text != href;
        let out = if self.options.force_hyperlink {
            let mut label = if text.is_empty() {
                href.to_string()
            } else {
                self.transform(text)
            };
            if let Some(title) = title {
                label.push_str(" – ");
                label.push_str(title);
            }
            hyperlink(&label, href)
        } else if has_text {
            format!("{} ({})", self.transform(text), (self.options.href)(href))
        } else {
            (self.options.href)(href)
        };
        (self.options.link)(&out)
    }

    /// Inline image reference. A configured override takes precedence over
    /// the textual `![text](href)` form.
    pub fn image(&self, href: &str, title: Option<&str>, text: &str) -> String {
        if let Some(image) = &self.options.image {
            return image(href, title, text);
        }
        let mut out = format!("![{text}");
        if let Some(title) = title {
            out.push_str(" – ");
            out.push_str(title);
        }
        out.push_str("](");
        out.push_str(href);
        out.push(')');
        out
    }

    /// Inline transforms shared by every block-level construct.
    fn transform(&self, text: &str) -> String {
        let text = if self.options.emoji {
            insert_emojis(text)
        } else {
            text.to_string()
        };
        let text = if self.options.unescape {
            unescape_entities(&text)
        } else {
            text
        };
        text.replace(COLON_PLACEHOLDER, ":")
    }

    fn reflow(&self, text: &str, width: usize) -> String {
        if !self.options.reflow_text {
            return text.to_string();
        }
        self.reflow_at(text, width)
    }

    fn reflow_at(&self, text: &str, width: usize) -> String {
        reflow_with(text, width, "", self.options.width_mode())
    }
}

/// Rejects targets whose decoded form starts a `javascript:` scheme:
/// percent-decode, strip everything but word characters and colons,
/// lowercase, then test the prefix. A target that cannot be decoded is
/// rejected outright.
fn link_is_safe(href: &str) -> bool {
    let Ok(decoded) = urlencoding::decode(href) else {
        return false;
    };
    let scheme: String = decoded
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == ':')
        .collect::<String>()
        .to_lowercase();
    !scheme.starts_with("javascript:")
}

/// The entity forms markdown sources commonly carry into raw HTML.
fn unescape_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}
