//! Filtering and sorting the comparison table.
//!
//! The data pipeline is:
//! 1. Raw data (`Dataset`)
//! 2. Query result (filtered, sorted record references)
//! 3. Presentation (`SourcesTable`, CSV rows, page models)

use std::cmp::Ordering;

use crate::data::ComparisonRecord;
use crate::quantity::{self, ReferenceTotal};

use super::options::{SortDirection, SortField, TableQuery};

/// Filter `records` by category, then stable-sort them.
///
/// Records that compare equal keep their original relative order in both
/// directions. Quantities for [`SortField::Quantity`] come from the shared
/// quantity calculator with `total`.
pub fn filter_and_sort<'a, I>(
    records: I,
    query: &TableQuery,
    total: ReferenceTotal,
) -> Vec<&'a ComparisonRecord>
where
    I: IntoIterator<Item = &'a ComparisonRecord>,
{
    let mut items: Vec<&ComparisonRecord> = records
        .into_iter()
        .filter(|r| query.category_filter.accepts(&r.category))
        .collect();

    items.sort_by(|a, b| {
        let ord = compare(a, b, query.sort_field, total);
        match query.sort_direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });

    items
}

fn compare(
    a: &ComparisonRecord,
    b: &ComparisonRecord,
    field: SortField,
    total: ReferenceTotal,
) -> Ordering {
    match field {
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortField::Cost => a.cost.get().total_cmp(&b.cost.get()),
        SortField::Quantity => {
            quantity::quantity(a.cost, total).cmp(&quantity::quantity(b.cost, total))
        }
        SortField::Category => a.category.cmp(&b.category),
        SortField::Verified => a.last_verified.cmp(&b.last_verified),
    }
}
