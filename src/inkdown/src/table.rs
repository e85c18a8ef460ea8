//! Table layout.
//!
//! Cells arrive already rendered (inline styles applied); this module only
//! arranges them. Column sizing, border drawing and width-constrained
//! wrapping are delegated to `comfy-table`.

use comfy_table::{CellAlignment, ContentArrangement, Table};

use crate::options::TableOptions;

/// Column alignment parsed from a table's delimiter row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    /// No explicit alignment marker.
    #[default]
    Unspecified,
    Left,
    Center,
    Right,
}

impl Align {
    fn cell_alignment(self) -> Option<CellAlignment> {
        match self {
            Align::Unspecified => None,
            Align::Left => Some(CellAlignment::Left),
            Align::Center => Some(CellAlignment::Center),
            Align::Right => Some(CellAlignment::Right),
        }
    }
}

/// Lays out a table from pre-rendered header and body cells.
pub fn render_table(
    header: &[String],
    rows: &[Vec<String>],
    alignments: &[Align],
    options: &TableOptions,
) -> String {
    let mut table = Table::new();
    if let Some(preset) = &options.preset {
        table.load_preset(preset);
    }
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some(width) = options.max_width {
        table.set_width(width);
    }
    if !header.is_empty() {
        table.set_header(header.to_vec());
    }
    for row in rows {
        table.add_row(row.clone());
    }
    for (index, align) in alignments.iter().enumerate() {
        if let (Some(alignment), Some(column)) = (align.cell_alignment(), table.column_mut(index)) {
            column.set_cell_alignment(alignment);
        }
    }
    table.to_string()
}
