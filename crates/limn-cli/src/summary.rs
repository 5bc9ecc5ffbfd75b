use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use limn_model::{ColumnType, Table as DataTable};

use crate::commands::LimnifyOutcome;

/// Rows shown in the stderr preview.
pub const PREVIEW_ROWS: usize = 10;

pub fn print_summary(outcome: &LimnifyOutcome) {
    let table = outcome.datasource.table();
    eprintln!("{}", build_preview(table, PREVIEW_ROWS));
    if table.row_count() > PREVIEW_ROWS {
        eprintln!("... {} more rows", table.row_count() - PREVIEW_ROWS);
    }
    for path in &outcome.written {
        println!("Wrote {}", path.display());
    }
    if let Some(path) = &outcome.graph_path {
        println!("Wrote {}", path.display());
    }
}

/// Renders the first `max_rows` rows of a datasource table.
pub fn build_preview(data: &DataTable, max_rows: usize) -> Table {
    let mut table = Table::new();
    table.set_header(
        data.columns()
            .iter()
            .map(|column| header_cell(column.name()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for (index, column) in data.columns().iter().enumerate() {
        if matches!(column.column_type(), ColumnType::Int | ColumnType::Float) {
            align_column(&mut table, index, CellAlignment::Right);
        }
    }
    for row in 0..data.row_count().min(max_rows) {
        table.add_row(
            data.columns()
                .iter()
                .map(|column| {
                    let rendered = column.data().render(row);
                    if rendered.is_empty() {
                        Cell::new("-").add_attribute(Attribute::Dim)
                    } else {
                        Cell::new(rendered)
                    }
                })
                .collect::<Vec<_>>(),
        );
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
