//! Renderer configuration.
//!
//! [`RenderOptions`] collects every knob the renderer honors: one style
//! callback per markdown construct plus layout and feature toggles. Options
//! are read-only once the renderer is constructed; rendering never writes
//! back into them.

use std::fmt;

use ansi_term::{Colour, Style};
use inkdown_text::WidthMode;

/// Styling callback applied to one rendered fragment.
pub type StyleFn = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Override for image rendering: `(href, title, text)` to output.
pub type ImageFn = Box<dyn Fn(&str, Option<&str>, &str) -> String + Send + Sync>;

/// Indentation unit for nested blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tab {
    /// Indent by this many spaces.
    Width(usize),
    /// Indent by a literal string, e.g. `"  "`.
    Unit(String),
}

/// Options handed through to the table layout engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableOptions {
    /// Border preset, in the format the layout engine's `load_preset`
    /// accepts. `None` keeps the engine's default borders.
    pub preset: Option<String>,
    /// Hard cap on total table width, in columns.
    pub max_width: Option<u16>,
}

/// Complete renderer configuration.
///
/// The default palette mirrors common terminal markdown conventions:
/// yellow code, green headings (magenta for the first), blue links, gray
/// quotes. [`RenderOptions::plain`] turns every style into a pass-through
/// for tests and non-ANSI output.
pub struct RenderOptions {
    pub(crate) code: StyleFn,
    pub(crate) blockquote: StyleFn,
    pub(crate) html: StyleFn,
    pub(crate) heading: StyleFn,
    pub(crate) first_heading: StyleFn,
    pub(crate) hr: StyleFn,
    pub(crate) list_item: StyleFn,
    pub(crate) table: StyleFn,
    pub(crate) paragraph: StyleFn,
    pub(crate) strong: StyleFn,
    pub(crate) em: StyleFn,
    pub(crate) codespan: StyleFn,
    pub(crate) del: StyleFn,
    pub(crate) link: StyleFn,
    pub(crate) href: StyleFn,
    pub(crate) unescape: bool,
    pub(crate) emoji: bool,
    pub(crate) reflow_text: bool,
    pub(crate) width: usize,
    pub(crate) tab: String,
    pub(crate) show_section_prefix: bool,
    pub(crate) force_hyperlink: bool,
    pub(crate) sanitize_links: bool,
    pub(crate) code_theme: String,
    pub(crate) table_options: TableOptions,
    pub(crate) image: Option<ImageFn>,
}

/// Spaces used when a configured tab is unusable.
const FALLBACK_TAB: &str = "    ";

fn style(style: Style) -> StyleFn {
    Box::new(move |text| style.paint(text).to_string())
}

fn identity() -> StyleFn {
    Box::new(str::to_string)
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            code: style(Colour::Yellow.normal()),
            blockquote: style(Colour::Fixed(8).italic()),
            html: style(Colour::Fixed(8).normal()),
            heading: style(Colour::Green.bold()),
            first_heading: style(Colour::Purple.bold().underline()),
            hr: identity(),
            list_item: identity(),
            table: identity(),
            paragraph: identity(),
            strong: style(Style::new().bold()),
            em: style(Style::new().italic()),
            codespan: style(Colour::Yellow.normal()),
            del: style(Colour::Fixed(8).dimmed().strikethrough()),
            link: style(Colour::Blue.normal()),
            href: style(Colour::Blue.underline()),
            unescape: true,
            emoji: true,
            reflow_text: false,
            width: 80,
            tab: FALLBACK_TAB.to_string(),
            show_section_prefix: true,
            force_hyperlink: false,
            sanitize_links: false,
            code_theme: "base16-eighties.dark".to_string(),
            table_options: TableOptions::default(),
            image: None,
        }
    }
}

impl RenderOptions {
    /// Options with every style a pass-through. Layout, emoji substitution
    /// and section prefixes still apply; no SGR styling is emitted.
    pub fn plain() -> Self {
        RenderOptions {
            code: identity(),
            blockquote: identity(),
            html: identity(),
            heading: identity(),
            first_heading: identity(),
            hr: identity(),
            list_item: identity(),
            table: identity(),
            paragraph: identity(),
            strong: identity(),
            em: identity(),
            codespan: identity(),
            del: identity(),
            link: identity(),
            href: identity(),
            ..RenderOptions::default()
        }
    }

    /// Target width in columns for re-flow, rules and tables.
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Enables re-flowing paragraph-like text to the configured width.
    #[must_use]
    pub fn with_reflow_text(mut self, reflow: bool) -> Self {
        self.reflow_text = reflow;
        self
    }

    /// Sets the indentation unit. Unusable values (zero width, or a literal
    /// unit shorter than two characters) silently fall back to four spaces.
    #[must_use]
    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.tab = resolve_tab(tab);
        self
    }

    /// Enables `:shortcode:` emoji substitution and double-width-aware
    /// measurement.
    #[must_use]
    pub fn with_emoji(mut self, emoji: bool) -> Self {
        self.emoji = emoji;
        self
    }

    /// Enables HTML entity unescaping in rendered text.
    #[must_use]
    pub fn with_unescape(mut self, unescape: bool) -> Self {
        self.unescape = unescape;
        self
    }

    /// Shows or hides the `#` prefix in front of headings.
    #[must_use]
    pub fn with_show_section_prefix(mut self, show: bool) -> Self {
        self.show_section_prefix = show;
        self
    }

    /// Always emits OSC 8 hyperlinks for links, without probing the
    /// terminal.
    #[must_use]
    pub fn with_force_hyperlink(mut self, force: bool) -> Self {
        self.force_hyperlink = force;
        self
    }

    /// Drops links whose target decodes to a `javascript:` scheme.
    #[must_use]
    pub fn with_sanitize_links(mut self, sanitize: bool) -> Self {
        self.sanitize_links = sanitize;
        self
    }

    /// Theme name for code block syntax highlighting.
    #[must_use]
    pub fn with_code_theme(mut self, theme: impl Into<String>) -> Self {
        self.code_theme = theme.into();
        self
    }

    /// Options handed through to the table layout engine.
    #[must_use]
    pub fn with_table_options(mut self, table_options: TableOptions) -> Self {
        self.table_options = table_options;
        self
    }

    /// Replaces the default image rendering with a custom callback.
    #[must_use]
    pub fn with_image(
        mut self,
        image: impl Fn(&str, Option<&str>, &str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.image = Some(Box::new(image));
        self
    }

    #[must_use]
    pub fn with_code_style(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.code = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_blockquote_style(
        mut self,
        f: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.blockquote = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_html_style(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.html = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_heading_style(
        mut self,
        f: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.heading = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_first_heading_style(
        mut self,
        f: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.first_heading = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_hr_style(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.hr = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_list_item_style(
        mut self,
        f: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.list_item = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_table_style(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.table = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_paragraph_style(
        mut self,
        f: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.paragraph = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_strong_style(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.strong = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_em_style(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.em = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_codespan_style(
        mut self,
        f: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.codespan = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_del_style(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.del = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_link_style(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.link = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_href_style(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.href = Box::new(f);
        self
    }

    /// Width mode for measurement and wrapping. Emoji substitution implies
    /// double-width glyphs in the output, so the two ride the same flag.
    pub(crate) fn width_mode(&self) -> WidthMode {
        if self.emoji {
            WidthMode::Wide
        } else {
            WidthMode::Narrow
        }
    }
}

fn resolve_tab(tab: Tab) -> String {
    match tab {
        Tab::Width(0) => {
            tracing::debug!("tab width of zero, falling back to four spaces");
            FALLBACK_TAB.to_string()
        }
        Tab::Width(width) => " ".repeat(width),
        Tab::Unit(unit) if unit.chars().count() < 2 => {
            tracing::debug!(%unit, "tab unit shorter than two characters, falling back to four spaces");
            FALLBACK_TAB.to_string()
        }
        Tab::Unit(unit) => unit,
    }
}

impl fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderOptions")
            .field("unescape", &self.unescape)
            .field("emoji", &self.emoji)
            .field("reflow_text", &self.reflow_text)
            .field("width", &self.width)
            .field("tab", &self.tab)
            .field("show_section_prefix", &self.show_section_prefix)
            .field("force_hyperlink", &self.force_hyperlink)
            .field("sanitize_links", &self.sanitize_links)
            .field("code_theme", &self.code_theme)
            .field("table_options", &self.table_options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_values() {
        let options = RenderOptions::default();
        assert_eq!(options.width, 80);
        assert_eq!(options.tab, "    ");
        assert!(!options.reflow_text);
        assert!(options.emoji);
        assert!(options.show_section_prefix);
    }

    #[test]
    fn test_tab_width_resolves_to_spaces() {
        let options = RenderOptions::default().with_tab(Tab::Width(2));
        assert_eq!(options.tab, "  ");
    }

    #[test]
    fn test_tab_zero_width_falls_back() {
        let options = RenderOptions::default().with_tab(Tab::Width(0));
        assert_eq!(options.tab, FALLBACK_TAB);
    }

    #[test]
    fn test_tab_short_unit_falls_back() {
        let options = RenderOptions::default().with_tab(Tab::Unit(String::new()));
        assert_eq!(options.tab, FALLBACK_TAB);
        let options = RenderOptions::default().with_tab(Tab::Unit("·".to_string()));
        assert_eq!(options.tab, FALLBACK_TAB);
    }

    #[test]
    fn test_tab_custom_unit_kept() {
        let options = RenderOptions::default().with_tab(Tab::Unit("··".to_string()));
        assert_eq!(options.tab, "··");
    }

    #[test]
    fn test_plain_styles_pass_through() {
        let options = RenderOptions::plain();
        assert_eq!((options.strong)("x"), "x");
        assert_eq!((options.heading)("x"), "x");
        assert_eq!((options.href)("x"), "x");
    }

    #[test]
    fn test_default_styles_emit_ansi() {
        let options = RenderOptions::default();
        assert!((options.strong)("x").contains("\x1b["));
        assert!((options.first_heading)("x").contains("\x1b["));
    }

    #[test]
    fn test_width_mode_follows_emoji_flag() {
        assert_eq!(RenderOptions::default().width_mode(), WidthMode::Wide);
        assert_eq!(
            RenderOptions::default().with_emoji(false).width_mode(),
            WidthMode::Narrow
        );
    }
}
