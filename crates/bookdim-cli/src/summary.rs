use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use bookdim_cli::pipeline::{EnrichResult, ScrapeResult};
use bookdim_quality::SourceQualityReport;

use crate::types::{IntegrateSummary, QualitySummary, RunSummary};

pub fn print_scrape(result: &ScrapeResult) {
    println!("Scraped {} books -> {}", result.books, result.path.display());
}

pub fn print_enrich(result: &EnrichResult) {
    println!(
        "Matched {} of {} books in Google Books -> {}",
        result.matched,
        result.books,
        result.path.display()
    );
}

pub fn print_integrate(summary: &IntegrateSummary) {
    println!("Landing: {}", summary.landing_dir.display());
    println!("Output: {}", summary.output_dir.display());

    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for source in &summary.quality.sources {
        table.add_row(vec![
            Cell::new(format!("{} rows", source.source)),
            Cell::new(source.total_rows),
        ]);
    }
    table.add_row(vec![Cell::new("Detail rows"), Cell::new(summary.detail_rows)]);
    table.add_row(vec![
        Cell::new("Matched to Google Books"),
        Cell::new(summary.matched_rows),
    ]);
    table.add_row(vec![
        Cell::new("Duplicates removed"),
        count_cell(summary.quality.duplicates_found, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Hash-keyed books"),
        count_cell(summary.hash_keyed_rows, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("dim_book rows")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.dim_rows).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    println!("Artifacts:");
    for path in summary.paths.iter() {
        println!("- {}", path.display());
    }
}

pub fn print_quality(summary: &QualitySummary) {
    println!("Landing: {}", summary.landing_dir.display());
    print_source_quality(&summary.baseline.goodreads);
    print_source_quality(&summary.baseline.google_books);
}

pub fn print_run(summary: &RunSummary) {
    print_scrape(&summary.scrape);
    print_enrich(&summary.enrich);
    print_integrate(&summary.integrate);
}

fn print_source_quality(report: &SourceQualityReport) {
    println!(
        "Source: {} ({} rows, {} duplicate, {} columns with nulls)",
        report.source,
        report.total_rows,
        report.duplicate_rows,
        report.columns_with_nulls()
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Nulls"),
        header_cell("Null %"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (column, nulls) in report.null_counts.iter() {
        let share = report
            .null_percentages
            .get(column)
            .map_or("-", String::as_str);
        table.add_row(vec![
            Cell::new(column),
            count_cell(*nulls, Color::Yellow),
            dim_cell(share),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
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
        .set_width(80);
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

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
