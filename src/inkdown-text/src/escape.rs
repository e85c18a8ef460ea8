//! ANSI escape sequence scanning.
//!
//! Styled terminal text interleaves printable characters with non-printing
//! escape sequences. Everything in this crate is built on one scanner,
//! [`escape_len`], which recognizes the two dialects that occur in styled
//! markdown output:
//!
//! - **CSI** (`ESC [`): parameter bytes followed by an ASCII letter as the
//!   terminator. Covers SGR color/attribute codes such as `\x1b[1;32m` as
//!   well as cursor movement and screen clearing.
//! - **OSC** (`ESC ]`): free-form payload terminated by BEL (`\x07`) or ST
//!   (`ESC \`). Covers OSC 8 hyperlinks, which wrap visible link text in an
//!   open/close pair.
//!
//! A bare `ESC` followed by anything else, or a sequence that never
//! terminates, is not a recognized escape: the scanner fails open and those
//! bytes are treated as ordinary text.

use std::borrow::Cow;

/// SGR reset sequence.
pub const RESET: &str = "\x1b[0m";

/// OSC 8 sequence that ends a hyperlink.
pub const HYPERLINK_END: &str = "\x1b]8;;\x07";

/// Prefix shared by every OSC 8 hyperlink sequence.
const HYPERLINK_PREFIX: &str = "\x1b]8;";

/// One run of a styled string: either printable text or a single escape
/// sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Printable characters (including the bytes of malformed escapes).
    Text(&'a str),
    /// One complete escape sequence, terminator included.
    Escape(&'a str),
}

/// Iterator over the [`Segment`]s of a styled string.
///
/// Created by [`segments`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: &'a str,
}

/// Splits a styled string into printable text runs and escape sequences.
///
/// Concatenating the yielded segments reproduces the input exactly.
/// Malformed or unterminated sequences are yielded as part of the
/// surrounding text, never as [`Segment::Escape`].
pub fn segments(text: &str) -> Segments<'_> {
    Segments { rest: text }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        if let Some(len) = escape_len(self.rest) {
            let (esc, rest) = self.rest.split_at(len);
            self.rest = rest;
            return Some(Segment::Escape(esc));
        }
        // Text runs until the start of the next recognized escape. A leading
        // ESC that failed to scan above is consumed here as ordinary text.
        let bytes = self.rest.as_bytes();
        let mut i = 1;
        while i < bytes.len() {
            if bytes[i] == 0x1b && escape_len(&self.rest[i..]).is_some() {
                break;
            }
            i += 1;
        }
        let (text, rest) = self.rest.split_at(i);
        self.rest = rest;
        Some(Segment::Text(text))
    }
}

/// Returns the byte length of the escape sequence at the start of `text`,
/// or `None` when `text` does not begin with a complete recognized sequence.
pub fn escape_len(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.first() != Some(&0x1b) {
        return None;
    }
    match bytes.get(1) {
        // CSI: parameter bytes run until an ASCII letter terminates the
        // sequence.
        Some(b'[') => {
            let mut i = 2;
            while let Some(&b) = bytes.get(i) {
                if b.is_ascii_alphabetic() {
                    return Some(i + 1);
                }
                i += 1;
            }
            None
        }
        // OSC: payload runs until BEL or ST.
        Some(b']') => {
            let mut i = 2;
            while let Some(&b) = bytes.get(i) {
                if b == 0x07 {
                    return Some(i + 1);
                }
                if b == 0x1b && bytes.get(i + 1) == Some(&b'\\') {
                    return Some(i + 2);
                }
                i += 1;
            }
            None
        }
        _ => None,
    }
}

/// Removes every recognized escape sequence, keeping printable text.
///
/// Returns the input unchanged (borrowed) when it contains no escapes.
pub fn strip_escapes(text: &str) -> Cow<'_, str> {
    if !text.contains('\x1b') {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    for segment in segments(text) {
        if let Segment::Text(t) = segment {
            out.push_str(t);
        }
    }
    Cow::Owned(out)
}

/// Wraps `text` in an OSC 8 hyperlink pointing at `url`.
///
/// Emits the BEL terminator; the scanner accepts both BEL and ST on read.
pub fn hyperlink(text: &str, url: &str) -> String {
    format!("{HYPERLINK_PREFIX};{url}\x07{text}{HYPERLINK_END}")
}

/// Whether `seq` is an SGR (style/color) escape sequence.
pub fn is_sgr(seq: &str) -> bool {
    seq.starts_with("\x1b[") && seq.ends_with('m')
}

/// Whether `seq` is an SGR reset: `\x1b[0m`, the empty-parameter `\x1b[m`,
/// or any all-zero parameter list.
pub fn is_reset(seq: &str) -> bool {
    let Some(params) = seq.strip_prefix("\x1b[").and_then(|s| s.strip_suffix('m')) else {
        return false;
    };
    params.chars().all(|c| c == '0' || c == ';')
}

/// Whether `seq` opens an OSC 8 hyperlink (non-empty target).
pub fn is_hyperlink_open(seq: &str) -> bool {
    hyperlink_target(seq).is_some_and(|target| !target.is_empty())
}

/// Whether `seq` closes an OSC 8 hyperlink (empty target).
pub fn is_hyperlink_close(seq: &str) -> bool {
    hyperlink_target(seq).is_some_and(|target| target.is_empty())
}

/// The target of an OSC 8 sequence, with params and terminator removed.
fn hyperlink_target(seq: &str) -> Option<&str> {
    let rest = seq.strip_prefix(HYPERLINK_PREFIX)?;
    let rest = rest
        .strip_suffix('\x07')
        .or_else(|| rest.strip_suffix("\x1b\\"))?;
    // Params end at the first `;`; everything after is the target.
    let (_params, target) = rest.split_once(';')?;
    Some(target)
}
