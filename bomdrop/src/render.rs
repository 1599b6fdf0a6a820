//! Text rendering for CLI output using console

use console::{measure_text_width, pad_str, Alignment, Style};
use std::fmt::Write;
use std::str::FromStr;

use bomdroplib::format;
use bomdroplib::output::{
    CategoryIndex, CategoryPage, ComparisonPage, ItemView, SourcesTable, TableRow,
};
use bomdroplib::{PublishReport, Statistics, VerificationReport};

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
    Csv,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" | "table" => Ok(OutputMode::Text),
            "json" => Ok(OutputMode::Json),
            "csv" => Ok(OutputMode::Csv),
            _ => Err(format!("Unknown output mode: {}", s)),
        }
    }
}

fn heading() -> Style {
    Style::new().bold()
}

fn accent() -> Style {
    Style::new().yellow().bold()
}

fn dim() -> Style {
    Style::new().dim()
}

/// Truncate a label to fit within max_len, adding ".." if needed
fn truncate_label(label: &str, max_len: usize) -> String {
    if measure_text_width(label) <= max_len {
        return label.to_string();
    }
    let kept: String = label.chars().take(max_len.saturating_sub(2)).collect();
    format!("{kept}..")
}

fn cells(row: &TableRow, label_width: usize) -> Vec<String> {
    let mut cells = vec![truncate_label(&row.label, label_width)];
    cells.extend(row.values.iter().cloned());
    cells
}

/// Render the sources table with aligned columns
pub fn render_table(table: &SourcesTable) -> String {
    const LABEL_WIDTH: usize = 40;

    let body: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| cells(row, LABEL_WIDTH))
        .collect();
    let footer = cells(&table.footer, LABEL_WIDTH);

    let mut widths: Vec<usize> = table.headers.iter().map(|h| measure_text_width(h)).collect();
    for row in body.iter().chain(std::iter::once(&footer)) {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(measure_text_width(cell));
            }
        }
    }

    let line = |row: &[String]| -> String {
        row.iter()
            .enumerate()
            .map(|(i, cell)| {
                let align = if i == 0 || i >= 3 {
                    Alignment::Left
                } else {
                    Alignment::Right
                };
                pad_str(cell, widths.get(i).copied().unwrap_or(0), align, None).into_owned()
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let total_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    let separator = "-".repeat(total_width);

    let mut output = String::new();
    let _ = writeln!(output, "{}", heading().apply_to(line(&table.headers[..])));
    let _ = writeln!(output, "{}", separator);
    for row in &body {
        let _ = writeln!(output, "{}", line(&row[..]));
    }
    let _ = writeln!(output, "{}", separator);
    let _ = writeln!(output, "{}", heading().apply_to(line(&footer[..])));
    output
}

fn item_line(item: &ItemView) -> String {
    format!(
        "  {} {:<32} {:>14} {}",
        item.icon,
        truncate_label(&item.name, 32),
        item.quantity_display,
        dim().apply_to(format!("@ {}", item.cost_display))
    )
}

/// Render a comparison detail page
pub fn render_comparison(page: &ComparisonPage) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{} {}", page.item.icon, heading().apply_to(&page.item.name));
    let _ = writeln!(output, "{}", page.caption);
    let _ = writeln!(output, "you could buy {}", accent().apply_to(&page.headline));
    let _ = writeln!(output);
    let _ = writeln!(output, "{}", page.description);
    let _ = writeln!(output);
    let _ = writeln!(output, "  Cost:          {} each", page.item.cost_display);
    if let Some(category) = &page.category {
        let _ = writeln!(output, "  Category:      {} {}", category.icon, category.name);
    }
    if !page.source.is_empty() {
        let _ = writeln!(output, "  Source:        {}", page.source);
    }
    if !page.senate_reference.is_empty() {
        let _ = writeln!(output, "  Senate ref:    {}", page.senate_reference);
    }
    if !page.calculation_notes.is_empty() {
        let _ = writeln!(output, "  Calculation:   {}", page.calculation_notes);
    }
    let _ = writeln!(output, "  Last verified: {}", page.last_verified);
    let _ = writeln!(output, "  Share:         {}", page.share_url);
    let _ = writeln!(output, "  Card:          {}", page.card_path);
    let _ = writeln!(output);
    let _ = writeln!(output, "{}", dim().apply_to(&page.share_text));

    if !page.related.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "{}", heading().apply_to("Related"));
        for item in &page.related {
            let _ = writeln!(output, "{}", item_line(item));
        }
    }
    output
}

/// Render the category index
pub fn render_category_index(index: &CategoryIndex) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}", heading().apply_to("Categories"));
    for tile in &index.categories {
        let _ = writeln!(
            output,
            "  {} {:<20} {:>3}  {}",
            tile.info.icon,
            tile.info.slug,
            tile.count,
            dim().apply_to(&tile.info.name)
        );
    }
    output
}

/// Render one category page
pub fn render_category(page: &CategoryPage) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "{} {}",
        page.category.icon,
        heading().apply_to(&page.category.name)
    );
    let _ = writeln!(output, "{}", page.category.description);
    let _ = writeln!(output);
    for item in &page.items {
        let _ = writeln!(output, "{}", item_line(item));
    }
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "{} items, total {}, average {}",
        page.summary.count,
        page.total_cost_display,
        page.average_cost_display.as_deref().unwrap_or("n/a")
    );
    if let Some(range) = &page.cost_range_display {
        let _ = writeln!(output, "cost range {}", range);
    }
    output
}

/// Render search results
pub fn render_search(query: &str, items: &[ItemView]) -> String {
    let mut output = String::new();
    if items.is_empty() {
        let _ = writeln!(output, "No results for \"{}\"", query.trim());
        return output;
    }
    let _ = writeln!(
        output,
        "{} result(s) for \"{}\"",
        items.len(),
        heading().apply_to(query.trim())
    );
    for item in items {
        let _ = writeln!(output, "{}", item_line(item));
    }
    output
}

/// Render dataset statistics
pub fn render_stats(stats: &Statistics) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}", heading().apply_to("Dataset statistics"));
    let _ = writeln!(output, "  Comparisons:   {}", stats.total_comparisons);
    match &stats.cost_range {
        Some(range) => {
            let _ = writeln!(
                output,
                "  Cost range:    {} - {} (average {})",
                format::dollars(range.min),
                format::dollars(range.max),
                format::dollars(range.average)
            );
        }
        None => {
            let _ = writeln!(output, "  Cost range:    n/a");
        }
    }
    if let Some(verified) = &stats.last_verified {
        let _ = writeln!(
            output,
            "  Verified:      {} to {}",
            verified.oldest, verified.newest
        );
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "{}", heading().apply_to("By category"));
    for entry in stats.category_counts.iter() {
        let _ = writeln!(output, "  {:<20} {:>3}", entry.slug, entry.count);
    }
    output
}

/// Render the calculation audit
pub fn render_verification(report: &VerificationReport) -> String {
    let mut output = String::new();
    if report.is_consistent() {
        let _ = writeln!(
            output,
            "{}",
            Style::new().green().apply_to("All calculations are consistent")
        );
    } else {
        let _ = writeln!(
            output,
            "{}",
            Style::new()
                .red()
                .apply_to(format!("Found {} inconsistencies", report.inconsistencies.len()))
        );
        for issue in &report.inconsistencies {
            let _ = writeln!(output);
            let _ = writeln!(output, "  {} ({})", heading().apply_to(&issue.id), issue.name);
            let _ = writeln!(output, "    Calculated: {}", format::thousands(issue.calculated));
            let _ = writeln!(output, "    In context: {}", format::thousands(issue.in_context));
            let _ = writeln!(
                output,
                "    Context:    {}",
                truncate_label(&issue.context, 100)
            );
        }
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "Checked {} comparisons", report.checked);
    output
}

/// Render a build summary
pub fn render_publish(report: &PublishReport, out_dir: &str) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "Wrote {} files and {} preview cards to {}",
        report.files.len(),
        report.cards.generated,
        heading().apply_to(out_dir)
    );
    for failure in &report.cards.failures {
        let _ = writeln!(
            output,
            "  {} {}: {}",
            Style::new().red().apply_to("card failed"),
            failure.id,
            failure.error
        );
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_mode_from_str() {
        assert_eq!(OutputMode::from_str("json").unwrap(), OutputMode::Json);
        assert_eq!(OutputMode::from_str("table").unwrap(), OutputMode::Text);
        assert!(OutputMode::from_str("xml").is_err());
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("short", 10), "short");
        assert_eq!(truncate_label("a very long label", 8), "a very..");
    }

    #[test]
    fn test_render_table_alignment() {
        let table = SourcesTable {
            headers: vec!["Item".into(), "Cost".into()],
            rows: vec![TableRow {
                id: "a".into(),
                label: "Ambulance".into(),
                values: vec!["$350,000".into()],
            }],
            footer: TableRow {
                id: String::new(),
                label: "Total (1 comparisons)".into(),
                values: vec!["$350,000".into()],
            },
        };
        let text = console::strip_ansi_codes(&render_table(&table)).to_string();
        assert!(text.contains("Ambulance"));
        assert!(text.contains("Total (1 comparisons)"));
        assert_eq!(text.lines().count(), 5);
    }
}
