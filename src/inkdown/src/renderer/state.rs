//! Event stream driver.
//!
//! Walks the parser's event stream and realizes the bottom-up formatting
//! contract: every `Start` tag opens a buffer, the matching `End` closes
//! it, hands the accumulated child text to the construct's formatting
//! method and appends the result to the parent buffer. The bottom of the
//! stack is the document itself.

use std::sync::LazyLock;

use pulldown_cmark::{Alignment, CodeBlockKind, Event, Tag, TagEnd};
use regex::Regex;

use crate::list::{ListContext, Numbering};
use crate::table::Align;

use super::TerminalRenderer;

/// Inline HTML that acts as a hard line break.
static LINE_BREAK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^<br\s*/?>$").expect("Invalid line break regex"));

pub(super) struct RenderState<'r> {
    renderer: &'r TerminalRenderer,
    /// Output buffers, document at the bottom.
    buffers: Vec<String>,
    /// Targets and titles of open links and images.
    link_stack: Vec<(String, Option<String>)>,
    /// One context per open list; the top advances when an item closes.
    list_stack: Vec<ListContext>,
    /// Languages of open code blocks.
    code_languages: Vec<Option<String>>,
    /// In-progress table; tables never nest.
    table: Option<TableState>,
}

#[derive(Default)]
struct TableState {
    alignments: Vec<Align>,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    current_row: Vec<String>,
}

impl<'r> RenderState<'r> {
    pub(super) fn new(renderer: &'r TerminalRenderer) -> Self {
        RenderState {
            renderer,
            buffers: vec![String::new()],
            link_stack: Vec::new(),
            list_stack: Vec::new(),
            code_languages: Vec::new(),
            table: None,
        }
    }

    pub(super) fn run<'a>(mut self, events: impl Iterator<Item = Event<'a>>) -> String {
        for event in events {
            self.event(event);
        }
        debug_assert_eq!(self.buffers.len(), 1, "unbalanced tag nesting");
        self.buffers.pop().unwrap_or_default()
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.out().push_str(&text),
            Event::Code(code) => {
                let rendered = self.renderer.codespan(&code);
                self.out().push_str(&rendered);
            }
            Event::InlineHtml(html) => {
                let rendered = if LINE_BREAK_REGEX.is_match(&html) {
                    self.renderer.br()
                } else {
                    self.renderer.html(&html)
                };
                self.out().push_str(&rendered);
            }
            // Block-level raw HTML accumulates inside its HtmlBlock pair.
            Event::Html(html) => self.out().push_str(&html),
            Event::SoftBreak => self.out().push('\n'),
            Event::HardBreak => {
                let rendered = self.renderer.br();
                self.out().push_str(&rendered);
            }
            Event::Rule => {
                let rendered = self.renderer.hr();
                self.out().push_str(&rendered);
            }
            Event::TaskListMarker(checked) => {
                self.out().push_str(if checked { "[X] " } else { "[ ] " });
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph
            | Tag::Heading { .. }
            | Tag::BlockQuote(_)
            | Tag::HtmlBlock
            | Tag::Item
            | Tag::Emphasis
            | Tag::Strong
            | Tag::Strikethrough
            | Tag::TableCell => self.push_buffer(),
            Tag::CodeBlock(kind) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(str::to_string)
                        .filter(|lang| !lang.is_empty()),
                    CodeBlockKind::Indented => None,
                };
                self.code_languages.push(language);
                self.push_buffer();
            }
            Tag::List(start) => {
                let numbering = match start {
                    Some(n) => Numbering::Ordered(n),
                    None => Numbering::Unordered,
                };
                let context = match self.list_stack.last() {
                    Some(parent) => parent.nested(numbering),
                    None => ListContext::top(numbering),
                };
                self.list_stack.push(context);
                self.push_buffer();
            }
            Tag::Link { dest_url, title, .. } | Tag::Image { dest_url, title, .. } => {
                let title = (!title.is_empty()).then(|| title.to_string());
                self.link_stack.push((dest_url.to_string(), title));
                self.push_buffer();
            }
            Tag::Table(alignments) => {
                self.table = Some(TableState {
                    alignments: alignments.iter().map(|a| align_from(*a)).collect(),
                    ..TableState::default()
                });
            }
            Tag::TableHead | Tag::TableRow => {
                if let Some(table) = &mut self.table {
                    table.current_row.clear();
                }
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                let text = self.pop_buffer();
                let rendered = self.renderer.paragraph(&text);
                self.out().push_str(&rendered);
            }
            TagEnd::Heading(level) => {
                let text = self.pop_buffer();
                let rendered = self.renderer.heading(&text, level as usize);
                self.out().push_str(&rendered);
            }
            TagEnd::BlockQuote(_) => {
                let text = self.pop_buffer();
                let rendered = self.renderer.blockquote(&text);
                self.out().push_str(&rendered);
            }
            TagEnd::CodeBlock => {
                let code = self.pop_buffer();
                let language = self.code_languages.pop().flatten();
                let rendered = self.renderer.code(&code, language.as_deref());
                self.out().push_str(&rendered);
            }
            TagEnd::HtmlBlock => {
                let html = self.pop_buffer();
                let rendered = self.renderer.html(html.trim_end());
                self.out().push_str(&rendered);
                self.out().push_str("\n\n");
            }
            TagEnd::Item => {
                let text = self.pop_buffer();
                let context = self
                    .list_stack
                    .last()
                    .copied()
                    .unwrap_or_else(|| ListContext::top(Numbering::Unordered));
                let rendered = self.renderer.list_item(&text, context);
                let body = self.out();
                body.push_str(&rendered);
                body.push('\n');
                if let Some(top) = self.list_stack.last_mut() {
                    *top = top.next();
                }
            }
            TagEnd::List(_) => {
                let body = self.pop_buffer();
                self.list_stack.pop();
                let rendered = self.renderer.list(&body);
                if self.list_stack.is_empty() {
                    self.out().push_str(&rendered);
                } else {
                    // Nested list: attach to the enclosing item's buffer,
                    // dropping the separator that only applies between
                    // top-level blocks.
                    let trimmed = rendered.trim_end().to_string();
                    let item = self.out();
                    if !item.is_empty() && !item.ends_with('\n') {
                        item.push('\n');
                    }
                    item.push_str(&trimmed);
                }
            }
            TagEnd::Emphasis => {
                let text = self.pop_buffer();
                let rendered = self.renderer.em(&text);
                self.out().push_str(&rendered);
            }
            TagEnd::Strong => {
                let text = self.pop_buffer();
                let rendered = self.renderer.strong(&text);
                self.out().push_str(&rendered);
            }
            TagEnd::Strikethrough => {
                let text = self.pop_buffer();
                let rendered = self.renderer.del(&text);
                self.out().push_str(&rendered);
            }
            TagEnd::Link => {
                let text = self.pop_buffer();
                let (href, title) = self.link_stack.pop().unwrap_or_default();
                let rendered = self.renderer.link(&href, title.as_deref(), &text);
                self.out().push_str(&rendered);
            }
            TagEnd::Image => {
                let text = self.pop_buffer();
                let (href, title) = self.link_stack.pop().unwrap_or_default();
                let rendered = self.renderer.image(&href, title.as_deref(), &text);
                self.out().push_str(&rendered);
            }
            TagEnd::TableCell => {
                let text = self.pop_buffer();
                let rendered = self.renderer.table_cell(&text);
                if let Some(table) = &mut self.table {
                    table.current_row.push(rendered);
                }
            }
            TagEnd::TableHead => {
                if let Some(table) = &mut self.table {
                    table.header = std::mem::take(&mut table.current_row);
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = &mut self.table {
                    let row = std::mem::take(&mut table.current_row);
                    table.rows.push(row);
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    let rendered =
                        self.renderer
                            .table(&table.header, &table.rows, &table.alignments);
                    self.out().push_str(&rendered);
                }
            }
            _ => {}
        }
    }

    fn push_buffer(&mut self) {
        self.buffers.push(String::new());
    }

    fn pop_buffer(&mut self) -> String {
        self.buffers.pop().unwrap_or_default()
    }

    fn out(&mut self) -> &mut String {
        self.buffers.last_mut().expect("buffer stack is never empty")
    }
}

fn align_from(alignment: Alignment) -> Align {
    match alignment {
        Alignment::None => Align::Unspecified,
        Alignment::Left => Align::Left,
        Alignment::Center => Align::Center,
        Alignment::Right => Align::Right,
    }
}
