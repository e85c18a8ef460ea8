//! Escape-aware text measurement and reflow for terminal markdown
//! rendering.
//!
//! Terminal output interleaves printable characters with ANSI escape
//! sequences, which makes `str::len` and byte-oriented wrapping useless for
//! layout. This crate provides the primitives a renderer needs to lay out
//! styled text correctly.
//!
//! # Features
//!
//! - **Escape scanning**: split styled text into printable runs and atomic
//!   escape sequences (CSI and OSC dialects), failing open on malformed
//!   input ([`escape`])
//! - **Width measurement**: visual column counts that skip escapes, with an
//!   optional double-width mode for East Asian characters and emoji
//!   ([`measurement`])
//! - **Reflow**: greedy word wrapping that never splits an escape, breaks
//!   oversized tokens at exact column boundaries, honors hard-break
//!   markers, and re-opens styling across line breaks ([`reflow`])
//!
//! # Example
//!
//! ```
//! use inkdown_text::{visual_width, wrap};
//!
//! let styled = "\x1b[32mNow is the time\x1b[0m";
//! assert_eq!(visual_width(styled), 15);
//!
//! let lines = wrap(styled, 10, "");
//! assert_eq!(lines.len(), 2);
//! assert!(lines.iter().all(|line| visual_width(line) <= 10));
//! ```

pub mod escape;
pub mod measurement;
pub mod reflow;

// Re-export commonly used items at the crate root
pub use escape::{
    escape_len, hyperlink, is_hyperlink_close, is_hyperlink_open, is_reset, is_sgr, segments,
    strip_escapes, Segment, Segments, HYPERLINK_END, RESET,
};
pub use measurement::{visual_width, visual_width_with, WidthMode};
pub use reflow::{reflow, reflow_with, wrap, wrap_with, HARD_BREAK};
