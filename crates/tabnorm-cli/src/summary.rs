use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tabnorm_cli::pipeline::{ColumnStats, RunStats};
use tabnorm_normalization::ColumnPolicy;

use crate::types::RunResult;

pub fn print_summary(result: &RunResult) {
    match &result.output {
        Some(path) => println!(
            "Normalization complete. Output written to: {}",
            path.display()
        ),
        None => println!(
            "Dry run complete for {}. No output written.",
            result.input.display()
        ),
    }
    println!("{}", rows_table(&result.stats));
    println!("{}", columns_table(&result.stats.columns));
    if !result.stats.duplicate_columns.is_empty() {
        eprintln!(
            "Duplicate columns: {}",
            result.stats.duplicate_columns.join(", ")
        );
    }
}

pub fn print_policy(policy: &ColumnPolicy) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Normalizer")]);
    apply_table_style(&mut table);
    for (column, normalizer) in policy.entries() {
        table.add_row(vec![column_cell(column), Cell::new(normalizer)]);
    }
    table.add_row(vec![
        dim_cell("(any other)"),
        dim_cell(policy.default_normalizer().name()),
    ]);
    println!("{table}");
}

fn rows_table(stats: &RunStats) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows read"),
        header_cell("Rows written"),
        header_cell("Padded"),
        header_cell("Truncated"),
        header_cell("Merged"),
    ]);
    apply_table_style(&mut table);
    for index in 0..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(stats.rows_read),
        Cell::new(stats.rows_written).add_attribute(Attribute::Bold),
        count_cell(stats.rows_padded, Color::Yellow),
        count_cell(stats.rows_truncated, Color::Yellow),
        count_cell(stats.rows_merged, Color::Yellow),
    ]);
    table
}

fn columns_table(columns: &[ColumnStats]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Normalizer"),
        header_cell("Changed"),
        header_cell("Fallbacks"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    let mut total_changed = 0;
    let mut total_fallbacks = 0;
    for column in columns {
        total_changed += column.changed;
        total_fallbacks += column.fallbacks;
        let normalizer = if column.has_rule {
            Cell::new(column.normalizer)
        } else {
            dim_cell(column.normalizer)
        };
        table.add_row(vec![
            column_cell(&column.name),
            normalizer,
            count_cell(column.changed, Color::Green),
            count_cell(column.fallbacks, Color::Red),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(total_changed, Color::Green).add_attribute(Attribute::Bold),
        count_cell(total_fallbacks, Color::Red).add_attribute(Attribute::Bold),
    ]);
    table
}

fn apply_table_style(table: &mut Table) {
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
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: u64, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn column_cell(name: &str) -> Cell {
    Cell::new(name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
