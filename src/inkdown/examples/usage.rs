//! Renders a markdown file (or a built-in demo document) with the default
//! style palette.
//!
//! ```sh
//! cargo run --example usage -- README.md
//! ```

use std::fs;

use anyhow::{Context, Result};
use inkdown::{render_markdown, RenderOptions};

const DEMO: &str = "\
# Markdown in the terminal

Paragraphs re-flow to the configured width, **strong** and *emphasized*
text use SGR attributes, and `code spans` keep their colons.

## What works

* ordered and unordered lists
* [links](https://example.com) and images
* task lists
    * [x] including nested ones
    * [ ] still open

> Block quotes are indented and re-wrapped to fit inside the margin.

```rust
fn main() {
    println!(\"highlighted\");
}
```

| feature | status |
| ------- | ------ |
| tables  | yes    |
";

fn main() -> Result<()> {
    let markdown = match std::env::args().nth(1) {
        Some(path) => fs::read_to_string(&path).with_context(|| format!("reading {path}"))?,
        None => DEMO.to_string(),
    };
    let options = RenderOptions::default().with_width(72).with_reflow_text(true);
    print!("{}", render_markdown(&markdown, options));
    Ok(())
}
