//! Emoji shortcode substitution.

use std::sync::LazyLock;

use regex::Regex;

/// `:shortcode:` occurrences eligible for emoji substitution.
static SHORTCODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([a-zA-Z0-9_+-]+):").expect("Invalid emoji shortcode regex"));

/// Replaces `:shortcode:` occurrences with the matching emoji glyph plus a
/// trailing space; the glyph renders double-width, and the space keeps
/// columns aligned on terminals that draw it single-width. Unknown
/// shortcodes are left as written.
pub fn insert_emojis(text: &str) -> String {
    SHORTCODE_REGEX
        .replace_all(text, |caps: &regex::Captures<'_>| {
            match emojis::get_by_shortcode(&caps[1]) {
                Some(emoji) => format!("{} ", emoji.as_str()),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
