//! Aggregate statistics over the dataset.
//!
//! All functions are pure over a slice of records (or the whole dataset) and
//! apply no rounding: rounding is left to whoever displays the numbers.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::data::{ComparisonRecord, Dataset, VerifiedDate};

/// Smallest, largest and mean unit cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostRange {
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

/// Oldest and newest verification dates, as written in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationRange {
    pub oldest: VerifiedDate,
    pub newest: VerifiedDate,
}

/// Record count for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub slug: String,
    pub count: usize,
}

/// Per-category record counts in declared category order.
///
/// Serializes as a JSON object keyed by slug, keeping declared order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCounts(Vec<CategoryCount>);

impl CategoryCounts {
    /// Count for a slug, `None` if the category was never declared.
    pub fn get(&self, slug: &str) -> Option<usize> {
        self.0.iter().find(|c| c.slug == slug).map(|c| c.count)
    }

    /// Sum over all categories.
    pub fn total(&self) -> usize {
        self.0.iter().map(|c| c.count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryCount> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for CategoryCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in &self.0 {
            map.serialize_entry(&entry.slug, &entry.count)?;
        }
        map.end()
    }
}

/// Count, total and mean cost for a group of records (a category page).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub count: usize,
    pub total_cost: f64,
    /// `None` for an empty group
    pub average_cost: Option<f64>,
}

/// Min/max/mean cost, `None` when there are no records.
pub fn cost_range<'a, I>(records: I) -> Option<CostRange>
where
    I: IntoIterator<Item = &'a ComparisonRecord>,
{
    let mut iter = records.into_iter().map(|r| r.cost.get());
    let first = iter.next()?;
    let (mut min, mut max, mut sum, mut n) = (first, first, first, 1usize);
    for cost in iter {
        min = min.min(cost);
        max = max.max(cost);
        sum += cost;
        n += 1;
    }
    Some(CostRange {
        min,
        max,
        average: sum / n as f64,
    })
}

/// Oldest and newest `lastVerified`, compared as calendar dates.
///
/// On ties the earliest record in dataset order wins. `None` when there are
/// no records.
pub fn verification_range<'a, I>(records: I) -> Option<VerificationRange>
where
    I: IntoIterator<Item = &'a ComparisonRecord>,
{
    let mut iter = records.into_iter().map(|r| &r.last_verified);
    let first = iter.next()?;
    let (oldest, newest) = iter.fold((first, first), |(oldest, newest), date| {
        (
            if date < oldest { date } else { oldest },
            if date > newest { date } else { newest },
        )
    });
    Some(VerificationRange {
        oldest: oldest.clone(),
        newest: newest.clone(),
    })
}

/// Record counts for every declared category, zero counts included.
pub fn category_counts(dataset: &Dataset) -> CategoryCounts {
    CategoryCounts(
        dataset
            .get_all_categories()
            .iter()
            .map(|category| CategoryCount {
                slug: category.slug.clone(),
                count: dataset
                    .get_all()
                    .iter()
                    .filter(|r| r.category == category.slug)
                    .count(),
            })
            .collect(),
    )
}

/// Summary of a group of records.
pub fn summarize<'a, I>(records: I) -> GroupSummary
where
    I: IntoIterator<Item = &'a ComparisonRecord>,
{
    let (count, total_cost) = records
        .into_iter()
        .fold((0usize, 0.0f64), |(n, sum), r| (n + 1, sum + r.cost.get()));
    GroupSummary {
        count,
        total_cost,
        average_cost: (count > 0).then(|| total_cost / count as f64),
    }
}

/// Dataset-wide statistics, as published in the feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_comparisons: usize,
    pub category_counts: CategoryCounts,
    pub cost_range: Option<CostRange>,
    pub last_verified: Option<VerificationRange>,
}

impl Statistics {
    /// Compute all statistics for a dataset.
    pub fn compute(dataset: &Dataset) -> Self {
        Self {
            total_comparisons: dataset.len(),
            category_counts: category_counts(dataset),
            cost_range: cost_range(dataset.get_all()),
            last_verified: verification_range(dataset.get_all()),
        }
    }
}
