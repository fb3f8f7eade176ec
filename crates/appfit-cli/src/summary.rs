use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use appfit_cli::pipeline::{LoadResult, ReportResult, SuggestResult};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

pub fn print_report_summary(result: &ReportResult) {
    println!("Output: {}", result.output_dir.display());
    println!("Workbook: {}", result.workbook.display());
    println!("Pending list: {}", result.pending_file.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dominio"),
        header_cell("Lineas"),
        header_cell("Evaluadas"),
        header_cell("Pendientes"),
    ]);
    apply_table_style(&mut table);
    for column in 1..=3 {
        if let Some(column) = table.column_mut(column) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    let mut total_entries = 0usize;
    let mut total_pending = 0usize;
    for domain in &result.domains {
        total_entries += domain.entries;
        total_pending += domain.pending;
        table.add_row(vec![
            Cell::new(&domain.domain),
            Cell::new(domain.entries),
            Cell::new(domain.evaluated),
            count_cell(domain.pending, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_entries).add_attribute(Attribute::Bold),
        Cell::new(result.evaluated).add_attribute(Attribute::Bold),
        count_cell(total_pending, Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    if result.unrecognized_tags > 0 {
        eprintln!(
            "Warning: {} line(s) with unrecognized source tags were skipped.",
            result.unrecognized_tags
        );
    }
    if !result.pending.is_empty() {
        println!("Pending applications:");
        for entry in &result.pending {
            println!("- \"{}\" \"{}\" \"{}\"", entry.country, entry.bank, entry.application);
        }
    }
}

pub fn print_load_summary(result: &LoadResult) {
    println!("Store: {}", result.store.display());
    println!("BuyerBank rows staged: {}", result.buyer_rows);
    println!("BoughtBank rows staged: {}", result.bought_rows);
}

pub fn print_suggest_summary(result: &SuggestResult) {
    println!("Suggestions: {}", result.output.display());
    println!(
        "Pending searched: {} buyer, {} bought",
        result.pending_buyer, result.pending_bought
    );
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        Cell::new(count)
    }
}
