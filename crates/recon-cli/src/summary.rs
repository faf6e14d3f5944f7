use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use recon_common::format_numeric;
use recon_model::{QuantityLabel, ReportColumn, ReportRow};

use crate::types::{RunResult, SourceSummary};

pub fn print_summary(result: &RunResult, preview: Option<usize>) {
    println!("Report: {}", result.output.display());
    println!("Address prefix: {}", result.options.address_prefix);
    if let Some(path) = &result.summary_json {
        println!("Summary JSON: {}", path.display());
    }
    print_source_table(&result.sources);

    let summary = &result.summary;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Measure"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Report rows"), Cell::new(summary.rows)]);
    table.add_row(vec![Cell::new("Items"), Cell::new(summary.distinct_items)]);
    table.add_row(vec![
        Cell::new("Addresses"),
        Cell::new(summary.distinct_addresses),
    ]);
    table.add_row(vec![
        Cell::new("With quantity"),
        Cell::new(summary.quantity_rows).fg(Color::Green),
    ]);
    table.add_row(vec![
        Cell::new(recon_model::VIDA),
        count_cell(summary.vida_rows, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Without address"),
        count_cell(summary.unaddressed_rows, Color::Yellow),
    ]);
    println!("{table}");

    if let Some(limit) = preview {
        print_preview(result.report.rows(), limit);
    }
}

pub fn print_source_table(sources: &[SourceSummary]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("File"),
        header_cell("Format"),
        header_cell("Size"),
        header_cell("Rows"),
        header_cell("Columns"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for source in sources {
        table.add_row(vec![
            Cell::new(source.kind.label())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(source.path.display()),
            Cell::new(source.format.label()),
            Cell::new(format_size(source.size)),
            Cell::new(source.rows),
            Cell::new(source.columns.join(", ")),
        ]);
    }
    println!("{table}");
}

fn print_preview(rows: &[ReportRow], limit: usize) {
    if limit == 0 || rows.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(
        ReportColumn::ALL
            .iter()
            .map(|column| header_cell(column.header()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for row in rows.iter().take(limit) {
        table.add_row(vec![
            Cell::new(&row.item),
            optional_cell(row.description.as_deref()),
            Cell::new(format_numeric(row.unallocated_quantity)),
            optional_cell(row.address.as_deref()),
            label_cell(&row.quantity_label),
        ]);
    }
    println!("{table}");
    if rows.len() > limit {
        println!("... {} more rows", rows.len() - limit);
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
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

fn label_cell(label: &QuantityLabel) -> Cell {
    match label {
        QuantityLabel::Vida => Cell::new(label.as_str()).fg(Color::Yellow),
        QuantityLabel::Quantity(_) => Cell::new(label.as_str()),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(color)
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

/// Byte count in the largest binary unit that keeps it at or above one.
fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
