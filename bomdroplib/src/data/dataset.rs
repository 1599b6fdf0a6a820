//! The dataset accessor.
//!
//! A [`Dataset`] is loaded and validated once, then only read. Lookups never
//! fail with an error: unknown ids and slugs come back as `None` or an empty
//! list, and presentation layers decide how to show absence.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BomdropError, DatasetIssue};
use crate::Result;

use super::record::{is_safe_slug, CategoryInfo, ComparisonRecord};

/// Sample dataset compiled into the crate.
const BUNDLED_DATASET: &str = include_str!("../../data/comparisons.json");

/// On-disk shape of a dataset file.
#[derive(Debug, Deserialize, Serialize)]
struct DatasetFile {
    categories: Vec<CategoryInfo>,
    comparisons: Vec<ComparisonRecord>,
}

/// The validated, immutable comparison dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    categories: Vec<CategoryInfo>,
    records: Vec<ComparisonRecord>,
}

impl Dataset {
    /// Build a dataset, rejecting it if [`Dataset::check`] finds any issue.
    pub fn new(categories: Vec<CategoryInfo>, records: Vec<ComparisonRecord>) -> Result<Self> {
        let issues = Self::check(&categories, &records);
        if !issues.is_empty() {
            return Err(BomdropError::InvalidDataset(issues));
        }
        Ok(Self {
            categories,
            records,
        })
    }

    /// Parse and validate a dataset from JSON text.
    ///
    /// Costs and dates are validated while parsing; the first bad value
    /// aborts the load.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: DatasetFile = serde_json::from_str(json)?;
        Self::new(file.categories, file.comparisons)
    }

    /// Load a dataset file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| BomdropError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json_str(&json)?;
        tracing::debug!(
            path = %path.display(),
            comparisons = dataset.len(),
            categories = dataset.categories.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// The sample dataset shipped with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_DATASET)
    }

    /// Collect every structural issue in a candidate dataset.
    pub fn check(categories: &[CategoryInfo], records: &[ComparisonRecord]) -> Vec<DatasetIssue> {
        let mut issues = Vec::new();

        let mut slugs = HashSet::new();
        for category in categories {
            if !is_safe_slug(&category.slug) {
                issues.push(DatasetIssue::UnsafeCategory {
                    slug: category.slug.clone(),
                });
            }
            if !slugs.insert(category.slug.as_str()) {
                issues.push(DatasetIssue::DuplicateCategory {
                    slug: category.slug.clone(),
                });
            }
        }

        let mut ids = HashSet::new();
        for record in records {
            if !is_safe_slug(&record.id) {
                issues.push(DatasetIssue::UnsafeId {
                    id: record.id.clone(),
                });
            }
            if !ids.insert(record.id.as_str()) {
                issues.push(DatasetIssue::DuplicateId {
                    id: record.id.clone(),
                });
            }
            if !slugs.contains(record.category.as_str()) {
                issues.push(DatasetIssue::UnknownCategory {
                    id: record.id.clone(),
                    category: record.category.clone(),
                });
            }
        }

        issues
    }

    /// All records in declared order.
    pub fn get_all(&self) -> &[ComparisonRecord] {
        &self.records
    }

    /// The record with exactly this id.
    pub fn get_by_id(&self, id: &str) -> Option<&ComparisonRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Records in a category, in declared order. Unknown or empty categories
    /// both yield an empty list.
    pub fn get_by_category(&self, slug: &str) -> Vec<&ComparisonRecord> {
        self.records.iter().filter(|r| r.category == slug).collect()
    }

    /// All categories in declared order.
    pub fn get_all_categories(&self) -> &[CategoryInfo] {
        &self.categories
    }

    /// The category with this slug.
    pub fn get_category(&self, slug: &str) -> Option<&CategoryInfo> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    /// Other records sharing at least one tag with `record`, in declared
    /// order, at most `limit` of them.
    pub fn related(&self, record: &ComparisonRecord, limit: usize) -> Vec<&ComparisonRecord> {
        self.records
            .iter()
            .filter(|r| r.id != record.id && r.shares_tag_with(record))
            .take(limit)
            .collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
