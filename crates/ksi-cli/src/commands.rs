use anyhow::Result;
use comfy_table::{Cell, Table};

use ksi_cli::pipeline::CollisionCleaner;
use ksi_cli::types::RunResult;
use ksi_model::column_roles;

use crate::cli::CleanArgs;
use crate::summary::{apply_table_style, dim_cell, header_cell};

pub fn run_columns() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Collision key"),
        header_cell("Derived"),
    ]);
    apply_table_style(&mut table);
    for role in column_roles() {
        table.add_row(vec![
            Cell::new(role.name),
            flag_cell(role.key),
            flag_cell(role.derived),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_clean(args: &CleanArgs) -> Result<RunResult> {
    CollisionCleaner::new(&args.input, &args.output_dir).run()
}

fn flag_cell(set: bool) -> Cell {
    if set { Cell::new("✓") } else { dim_cell("-") }
}
