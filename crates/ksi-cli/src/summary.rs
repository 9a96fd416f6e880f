use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ksi_cli::types::RunResult;

pub fn print_summary(result: &RunResult) {
    println!("Input: {}", result.input.display());
    println!(
        "Person-level: {} ({} rows)",
        result.outputs.person_level.display(),
        result.person_rows
    );
    println!(
        "Collision-level: {} ({} rows)",
        result.outputs.collision_level.display(),
        result.collision_rows
    );
    println!("Collision key: {}", result.collision_key.join(", "));

    let stats = &result.stats;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Measure"), header_cell("Rows")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);

    table.add_row(vec![stage_cell("Ingest"), Cell::new("rows in"), Cell::new(stats.input_rows)]);
    table.add_row(vec![
        dim_cell(""),
        Cell::new("renamed headers"),
        count_cell(stats.renamed_duplicates, Color::Yellow),
    ]);
    table.add_row(vec![
        stage_cell("Date/time"),
        Cell::new("unparsed dates"),
        count_cell(stats.datetime.unparsed_dates, Color::Yellow),
    ]);
    table.add_row(vec![
        dim_cell(""),
        Cell::new("unparsed times"),
        count_cell(stats.datetime.unparsed_times, Color::Yellow),
    ]);
    table.add_row(vec![
        dim_cell(""),
        Cell::new("invalid clock times"),
        count_cell(stats.datetime.invalid_clock_times, Color::Yellow),
    ]);
    table.add_row(vec![
        stage_cell("Geometry"),
        Cell::new("centroids"),
        Cell::new(stats.geometry.centroids).fg(Color::Green),
    ]);
    table.add_row(vec![
        dim_cell(""),
        Cell::new("missing"),
        count_cell(stats.geometry.missing, Color::Yellow),
    ]);
    table.add_row(vec![
        dim_cell(""),
        Cell::new("no coordinates"),
        count_cell(stats.geometry.absent, Color::Yellow),
    ]);
    table.add_row(vec![
        dim_cell(""),
        Cell::new("invalid"),
        count_cell(stats.geometry.invalid, Color::Red),
    ]);
    table.add_row(vec![
        stage_cell("Bounds"),
        Cell::new("pairs nulled"),
        count_cell(stats.out_of_bounds, Color::Yellow),
    ]);
    table.add_row(vec![
        stage_cell("Text"),
        Cell::new("columns trimmed"),
        Cell::new(stats.trimmed_columns),
    ]);
    table.add_row(vec![
        stage_cell("Output"),
        Cell::new("person rows"),
        Cell::new(result.person_rows).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        dim_cell(""),
        Cell::new("collision rows"),
        Cell::new(result.collision_rows).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn stage_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
