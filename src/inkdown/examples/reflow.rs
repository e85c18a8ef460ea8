//! Renders the same document at several widths to show the re-flow engine
//! at work: hard breaks survive, long tokens split at the column boundary,
//! and list continuations stay aligned under their first line.

use anyhow::Result;
use inkdown::{render_markdown, RenderOptions};

const DOC: &str = "\
## Re-flow demo

Now is the time for all good men to come to the aid of their country, \
even when the URL is http://timeanddate.com and refuses to fit.

First line.  \nSecond line, forced by a hard break.

* a list item long enough that its continuation lines have to align \
under the first line's text column
";

fn main() -> Result<()> {
    for width in [30, 50, 70] {
        println!("{}", "=".repeat(width));
        let options = RenderOptions::default()
            .with_width(width)
            .with_reflow_text(true);
        print!("{}", render_markdown(DOC, options));
    }
    Ok(())
}
