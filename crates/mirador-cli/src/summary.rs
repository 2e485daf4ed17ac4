use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mirador_cli::pipeline::{AggregateOutcome, SourceLoad};
use mirador_transform::CohortSummary;

use crate::types::CommandOutcome;

pub fn print_summary(outcome: &CommandOutcome) {
    match outcome {
        CommandOutcome::Aggregate(result) => print_aggregate_summary(result),
        CommandOutcome::Csv(conversion) => {
            println!("Data: {}", conversion.data.display());
            println!("Dictionary: {}", conversion.dictionary.display());
            println!("Rows: {}", conversion.rows);
        }
        CommandOutcome::Spss(conversion) => {
            println!("Data: {}", conversion.data.display());
            println!("Syntax card: {}", conversion.card.display());
        }
    }
}

fn print_aggregate_summary(result: &AggregateOutcome) {
    println!("Dataset: {}", result.paths.dir.display());
    println!(
        "Variables: {}  Rows: {}  Ignored ids: {}",
        result.variables, result.rows, result.ignored
    );
    if let Some(sequenced) = result.sequenced {
        println!("Sequenced patients: {sequenced}");
    }
    println!("{}", source_table(&result.sources));
    println!("{}", cohort_table(&result.summary));
}

fn source_table(sources: &[SourceLoad]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Rows"),
        header_cell("Attached"),
        header_cell("Skipped"),
    ]);
    apply_table_style(&mut table);
    for column in 1..4 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for load in sources {
        table.add_row(vec![
            Cell::new(load.source)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(load.stats.rows),
            Cell::new(load.stats.attached),
            count_cell(load.stats.skipped, Color::Yellow),
        ]);
    }
    table
}

fn cohort_table(summary: &CohortSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Cohort"), header_cell("Patients")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (depth, label, count) in summary.lines() {
        let indent = "  ".repeat(depth);
        let label_cell = if depth <= 1 {
            Cell::new(format!("{indent}{label}")).add_attribute(Attribute::Bold)
        } else {
            Cell::new(format!("{indent}{label}"))
        };
        table.add_row(vec![label_cell, Cell::new(count)]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
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
        Cell::new(count).fg(Color::DarkGrey)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
