//! ANSI terminal renderer for markdown.
//!
//! Parses markdown with `pulldown-cmark` and renders a single styled
//! string for terminal display. Layout runs on `inkdown-text`'s
//! escape-aware measurement and reflow, so wrapped styled text never tears
//! an escape sequence apart and continuation lines keep their indentation
//! and styling.
//!
//! # Features
//!
//! - **Blocks**: headings with `#` section prefixes, paragraphs, block
//!   quotes, fenced code blocks, horizontal rules, raw HTML passthrough
//! - **Lists**: ordered (1-based, restarting per nesting level), unordered
//!   and task lists, indented once per level with aligned continuations
//! - **Inline**: strong, emphasis, strikethrough, code spans, links (plain
//!   `text (href)` or OSC 8 hyperlinks), images, `:shortcode:` emoji
//! - **Tables**: bordered layout with per-column alignment, delegated to
//!   `comfy-table`
//! - **Re-flow**: greedy wrapping to a configured width that honors hard
//!   breaks and re-opens ANSI styling across line breaks
//!
//! # Example
//!
//! ```
//! use inkdown::{render_markdown, RenderOptions};
//!
//! let options = RenderOptions::plain().with_width(40).with_reflow_text(true);
//! let out = render_markdown("# Title\n\nHello *world*.", options);
//! assert!(out.starts_with("# Title\n\n"));
//! ```

pub mod emoji;
pub mod highlight;
pub mod list;
pub mod options;
pub mod renderer;
pub mod table;

// Re-export commonly used types at the crate root
pub use highlight::HighlightError;
pub use list::{ListContext, Numbering};
pub use options::{ImageFn, RenderOptions, StyleFn, Tab, TableOptions};
pub use renderer::{render_markdown, TerminalRenderer};
pub use table::Align;
