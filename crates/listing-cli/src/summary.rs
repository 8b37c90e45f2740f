use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use listing_cli::pipeline::AuditSummary;

pub fn print_summary(result: &AuditSummary) {
    println!("Input: {}", result.input.display());
    println!("Report: {}", result.output.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule"),
        header_cell("Sheet"),
        header_cell("Description"),
        header_cell("Flagged"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    let mut total_rows = 0usize;
    for rule in &result.rules {
        total_rows += rule.flagged_rows;
        table.add_row(vec![
            Cell::new(rule.number),
            Cell::new(&rule.sheet_name),
            Cell::new(&rule.description),
            flagged_cell(rule.flagged_rows),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new("All rules")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        flagged_cell(total_rows).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    println!("Rows audited: {}", result.row_count);
    println!("Distinct flagged listings: {}", result.distinct_flagged);
    print_commentary(result);
}

fn print_commentary(result: &AuditSummary) {
    if result.commentary.is_empty() {
        return;
    }
    println!();
    println!("Commentary:");
    for entry in &result.commentary {
        println!();
        println!("[{}]", entry.sheet_name);
        println!("{}", entry.commentary);
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(150);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(6)),
            ColumnConstraint::UpperBoundary(Width::Fixed(34)),
            ColumnConstraint::UpperBoundary(Width::Percentage(50)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
        ]);
    }
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

fn flagged_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
