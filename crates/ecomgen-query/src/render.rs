use comfy_table::presets::NOTHING;
use comfy_table::{Cell, CellAlignment, Row, Table};

use crate::runner::QueryOutput;

pub const NO_ROWS_MESSAGE: &str = "Query returned no rows.";

/// Render rows as aligned plain text: no borders, no row index.
/// Numbers align right, everything else left.
pub fn render_output(output: &QueryOutput) -> String {
    if output.is_empty() {
        return NO_ROWS_MESSAGE.to_string();
    }

    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_header(output.columns.iter().map(Cell::new).collect::<Vec<_>>());

    for values in &output.rows {
        let mut row = Row::new();
        for value in values {
            let alignment = if value.is_numeric() {
                CellAlignment::Right
            } else {
                CellAlignment::Left
            };
            row.add_cell(Cell::new(value.to_string()).set_alignment(alignment));
        }
        table.add_row(row);
    }

    table
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
