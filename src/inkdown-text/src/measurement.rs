//! Visual width measurement for styled terminal text.
//!
//! Width is counted in terminal columns over printable characters only:
//! recognized escape sequences contribute nothing, while a malformed escape
//! counts as the ordinary characters it is. Two counting modes exist:
//!
//! - [`WidthMode::Narrow`]: every printable scalar is one column.
//! - [`WidthMode::Wide`]: East Asian wide characters and emoji occupy two
//!   columns and zero-width combining scalars occupy none.
//!
//! Grapheme clustering (ZWJ sequences, flag pairs) is out of scope; the
//! double-width heuristic is per-scalar.
//!
//! # Example
//!
//! ```
//! use inkdown_text::{visual_width, visual_width_with, WidthMode};
//!
//! assert_eq!(visual_width("\x1b[1;33mfoo\x1b[0m"), 3);
//! assert_eq!(visual_width_with("世界", WidthMode::Wide), 4);
//! ```

use unicode_width::UnicodeWidthChar;

use crate::escape::{segments, Segment};

/// How printable scalars are converted to column counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WidthMode {
    /// One column per scalar value.
    #[default]
    Narrow,
    /// East Asian wide characters and emoji count two columns, zero-width
    /// combining scalars count none.
    Wide,
}

/// Measures the visual width of `text` in [`WidthMode::Narrow`].
pub fn visual_width(text: &str) -> usize {
    visual_width_with(text, WidthMode::Narrow)
}

/// Measures the visual width of `text`, skipping escape sequences.
pub fn visual_width_with(text: &str, mode: WidthMode) -> usize {
    if !text.contains('\x1b') {
        return text.chars().map(|c| scalar_width(c, mode)).sum();
    }
    segments(text)
        .map(|segment| match segment {
            Segment::Text(t) => t.chars().map(|c| scalar_width(c, mode)).sum(),
            Segment::Escape(_) => 0,
        })
        .sum()
}

/// Column count of a single scalar under `mode`.
pub(crate) fn scalar_width(c: char, mode: WidthMode) -> usize {
    match mode {
        WidthMode::Narrow => 1,
        WidthMode::Wide => {
            if is_emoji(c) {
                2
            } else {
                c.width().unwrap_or(1)
            }
        }
    }
}

/// Emoji blocks that terminals render double-width regardless of what the
/// Unicode width tables say.
fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        // Miscellaneous Symbols and Pictographs
        0x1F300..=0x1F5FF
        // Emoticons
        | 0x1F600..=0x1F64F
        // Transport and Map Symbols
        | 0x1F680..=0x1F6FF
        // Supplemental Symbols and Pictographs
        | 0x1F900..=0x1F9FF
        // Symbols and Pictographs Extended-A
        | 0x1FA00..=0x1FA6F
        // Symbols and Pictographs Extended-B
        | 0x1FA70..=0x1FAFF
    )
}
