use std::path::PathBuf;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{
    ChannelsOutcome, CompareOutcome, CountsOutcome, DuplicatesOutcome, FuzzyOutcome,
    HomologateOutcome, MatchOutcome,
};

pub fn print_match_summary(outcome: &MatchOutcome, top: usize) {
    println!("Left: {}", outcome.left_label);
    println!("Right: {}", outcome.right_label);
    let summary = outcome.result.summary();

    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Left rows"), Cell::new(summary.left_total)]);
    table.add_row(vec![Cell::new("Right rows"), Cell::new(summary.right_total)]);
    table.add_row(vec![
        Cell::new("Matched").add_attribute(Attribute::Bold),
        Cell::new(summary.matched)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Unmatched left"),
        issue_cell(summary.unmatched_left, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Excluded left"),
        dim_cell(summary.excluded_left),
    ]);
    table.add_row(vec![
        Cell::new("Unmatched right"),
        dim_cell(summary.unmatched_right),
    ]);
    println!("{table}");

    let tokens = outcome.result.top_leading_tokens(top);
    if !tokens.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Leading token"), header_cell("Unmatched")]);
        apply_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        for (token, count) in tokens {
            table.add_row(vec![Cell::new(token), Cell::new(count)]);
        }
        println!("{table}");
    }
    print_written("Match report", outcome.report.as_ref());
    print_written("Correspondence", outcome.correspondence.as_ref());
}

pub fn print_fuzzy_summary(outcome: &FuzzyOutcome) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Left"),
        header_cell("Right"),
        header_cell("Score"),
        header_cell("Accepted"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for m in &outcome.matches {
        table.add_row(vec![
            Cell::new(&m.left),
            m.right.as_deref().map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(format!("{:.1}", m.score)),
            if m.accepted {
                Cell::new("yes").fg(Color::Green)
            } else {
                Cell::new("no").fg(Color::Yellow)
            },
        ]);
    }
    println!("{table}");
    let accepted = outcome.matches.iter().filter(|m| m.accepted).count();
    println!(
        "{accepted} of {} names at or above {:.1}",
        outcome.matches.len(),
        outcome.threshold
    );
    print_written("Fuzzy report", outcome.report.as_ref());
}

pub fn print_channels_summary(outcome: &ChannelsOutcome) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Channels"),
        header_cell("Tuples"),
        header_cell("Flagged"),
        header_cell("Missing dates"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for sheet in &outcome.sheets {
        let missing: usize = sheet.report.missing_dates.values().map(Vec::len).sum();
        table.add_row(vec![
            Cell::new(&sheet.sheet)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(sheet.table.identifiers().len()),
            Cell::new(sheet.report.tuples_checked),
            issue_cell(sheet.report.flagged.len(), Color::Red),
            issue_cell(missing, Color::Yellow),
        ]);
    }
    println!("{table}");

    let mut issues = Table::new();
    issues.set_header(vec![
        header_cell("Sheet"),
        header_cell("Channel"),
        header_cell("Identifier"),
        header_cell("Issue"),
    ]);
    apply_table_style(&mut issues);
    let mut issue_count = 0usize;
    for sheet in &outcome.sheets {
        for issue in &sheet.report.issues {
            issues.add_row(vec![
                Cell::new(&sheet.sheet),
                Cell::new(issue.channel()),
                Cell::new(sheet.table.identifier(issue.channel()).unwrap_or("-")),
                Cell::new(issue.format_message()),
            ]);
            issue_count += 1;
        }
    }
    if issue_count > 0 {
        println!("{issues}");
    }
    for sheet in &outcome.sheets {
        print_written("Channel report", sheet.report_path.as_ref());
    }
}

pub fn print_compare_summary(outcome: &CompareOutcome) {
    let diff = &outcome.diff;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Only here"),
        header_cell("Unparsed"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    table.add_row(vec![
        Cell::new(&outcome.left_label),
        issue_cell(diff.only_left.len(), Color::Yellow),
        issue_cell(diff.unparsed_left, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new(&outcome.right_label),
        issue_cell(diff.only_right.len(), Color::Yellow),
        issue_cell(diff.unparsed_right, Color::Red),
    ]);
    println!("{table}");
    for timestamp in diff.symmetric_difference() {
        println!("  {timestamp}");
    }
    print_written("Timestamp report", outcome.report.as_ref());
}

pub fn print_counts_summary(outcome: &CountsOutcome) {
    let report = &outcome.report;
    println!(
        "Channels: {} left, {} right, {} pairs checked",
        outcome.left_channels, outcome.right_channels, report.pairs_checked
    );
    if !report.skipped_left.is_empty() || !report.skipped_right.is_empty() {
        eprintln!(
            "Skipped identifiers: {} left, {} right",
            report.skipped_left.len(),
            report.skipped_right.len()
        );
    }
    if report.mismatches.is_empty() {
        println!("All paired counts agree.");
    } else {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Left"),
            header_cell("Right"),
            header_cell("Left count"),
            header_cell("Right count"),
            header_cell("Differing timestamps"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 2, CellAlignment::Right);
        align_column(&mut table, 3, CellAlignment::Right);
        align_column(&mut table, 4, CellAlignment::Right);
        for mismatch in &report.mismatches {
            table.add_row(vec![
                Cell::new(&mismatch.left),
                Cell::new(&mismatch.right),
                Cell::new(mismatch.left_count),
                Cell::new(mismatch.right_count),
                issue_cell(mismatch.differences.len(), Color::Yellow),
            ]);
        }
        println!("{table}");
    }
    print_written("Count report", outcome.report_path.as_ref());
}

pub fn print_duplicates_summary(outcome: &DuplicatesOutcome) {
    println!(
        "{}.{}: {} distinct values, {} repeated",
        outcome.source,
        outcome.column,
        outcome.values.distinct,
        outcome.values.repeated.len()
    );
    if !outcome.values.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Value"), header_cell("Occurrences")]);
        apply_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        for repeated in &outcome.values.repeated {
            table.add_row(vec![
                Cell::new(&repeated.value),
                issue_cell(repeated.count, Color::Yellow),
            ]);
        }
        println!("{table}");
    }
    print_written("Repeated values report", outcome.report.as_ref());
}

pub fn print_homologate_summary(outcome: &HomologateOutcome) {
    let stats = &outcome.stats;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Filled"),
        header_cell("Unmatched"),
        header_cell("No source value"),
    ]);
    apply_summary_table_style(&mut table);
    table.add_row(vec![
        Cell::new(stats.rows),
        Cell::new(stats.filled).fg(Color::Green),
        issue_cell(stats.unmatched, Color::Yellow),
        issue_cell(stats.missing_source, Color::Yellow),
    ]);
    println!("{table}");
    println!(
        "Column {} written to {}",
        outcome.target_column,
        outcome.output.display()
    );
}

fn print_written(label: &str, path: Option<&PathBuf>) {
    if let Some(path) = path {
        println!("{label}: {}", path.display());
    }
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
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

fn issue_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
