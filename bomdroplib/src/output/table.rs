//! Table-ready data for the sources page.
//!
//! The data flow is:
//! 1. Raw data (`Dataset`)
//! 2. Query result (`filter_and_sort`)
//! 3. `SourcesTable` (formatted strings for display)
//!
//! `SourcesTable` only formats; filtering and sorting already happened.

use serde::{Deserialize, Serialize};

use crate::data::ComparisonRecord;
use crate::format;
use crate::query::{filter_and_sort, SortField, TableQuery};
use crate::site::Site;

/// A single row in the table (data row or footer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Record id, empty for the footer
    pub id: String,
    /// Row label (item name or "Total (N comparisons)")
    pub label: String,
    /// Cell values, in header order after the label
    pub values: Vec<String>,
}

/// Table-ready sources data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcesTable {
    /// Column headers, the active sort column marked with an arrow
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
    pub footer: TableRow,
}

impl SourcesTable {
    /// Run `query` over the site's records and format the result.
    pub fn build(site: &Site, query: &TableQuery) -> Self {
        let items = filter_and_sort(site.dataset().get_all(), query, site.reference_total());
        Self::from_records(site, query, &items)
    }

    /// Format already-ordered records.
    pub fn from_records(site: &Site, query: &TableQuery, items: &[&ComparisonRecord]) -> Self {
        let rows = items
            .iter()
            .map(|r| TableRow {
                id: r.id.clone(),
                label: r.name.clone(),
                values: vec![
                    format::dollars(r.cost.get()),
                    format::thousands(site.quantity(r)),
                    r.category.clone(),
                    r.last_verified.to_string(),
                ],
            })
            .collect::<Vec<_>>();

        let total_cost: f64 = items.iter().map(|r| r.cost.get()).sum();
        let footer = TableRow {
            id: String::new(),
            label: format!("Total ({} comparisons)", rows.len()),
            values: vec![
                format::dollars(total_cost),
                String::new(),
                String::new(),
                String::new(),
            ],
        };

        SourcesTable {
            headers: build_headers(query),
            rows,
            footer,
        }
    }
}

fn build_headers(query: &TableQuery) -> Vec<String> {
    SortField::ALL
        .iter()
        .map(|&field| {
            let title = match field {
                SortField::Name => "Item",
                SortField::Cost => "Cost",
                SortField::Quantity => "Quantity",
                SortField::Category => "Category",
                SortField::Verified => "Last Verified",
            };
            if field == query.sort_field {
                format!("{} {}", title, query.sort_direction.arrow())
            } else {
                title.to_string()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::data::Dataset;
    use crate::query::CategoryFilter;

    fn site() -> Site {
        Site::new(SiteConfig::default(), Dataset::bundled().unwrap()).unwrap()
    }

    #[test]
    fn test_headers_mark_sort_column() {
        let table = SourcesTable::build(&site(), &TableQuery::new().sort_by(SortField::Cost).descending());
        assert_eq!(
            table.headers,
            vec!["Item", "Cost ↓", "Quantity", "Category", "Last Verified"]
        );
    }

    #[test]
    fn test_rows_follow_query() {
        let site = site();
        let query = TableQuery::new()
            .sort_by(SortField::Cost)
            .descending()
            .category(CategoryFilter::Only("health".into()));
        let table = SourcesTable::build(&site, &query);
        assert_eq!(table.rows.len(), site.dataset().get_by_category("health").len());
        assert_eq!(table.rows[0].id, "ambulance");
        assert_eq!(table.rows[0].values[0], "$350,000");
        assert_eq!(table.rows[0].values[1], "275");
        assert_eq!(
            table.footer.label,
            format!("Total ({} comparisons)", table.rows.len())
        );
    }

    #[test]
    fn test_empty_filter() {
        let query = TableQuery::new().category(CategoryFilter::Only("nope".into()));
        let table = SourcesTable::build(&site(), &query);
        assert!(table.rows.is_empty());
        assert_eq!(table.footer.label, "Total (0 comparisons)");
        assert_eq!(table.footer.values[0], "$0");
    }
}
