//! Console rendering for the conversion summary.

use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use hl7_cli::pipeline::ConvertOutcome;

pub fn print_convert_summary(outcome: &ConvertOutcome, output: Option<&Path>) {
    println!("Version: {}", outcome.version);
    println!("Segments: {}", outcome.message.lines().count());
    if let Some(path) = output {
        println!("Message: {}", path.display());
    }
    if outcome.rows.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Segment"),
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Source Path"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for row in &outcome.rows {
        table.add_row(vec![
            segment_cell(&row.mapping.segment),
            Cell::new(row.mapping.field),
            Cell::new(&row.label),
            Cell::new(&row.mapping.source_path),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn segment_cell(id: &str) -> Cell {
    Cell::new(id).fg(Color::Blue).add_attribute(Attribute::Bold)
}
