//! Record types: comparisons and the categories they belong to.

use serde::{Deserialize, Serialize};

use crate::quantity::Cost;

use super::date::VerifiedDate;

/// One cost comparison from the dataset.
///
/// Field names serialize in camelCase so the record can be embedded in the
/// feed unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRecord {
    /// Unique slug used in URLs and file names
    pub id: String,
    /// Display name; may already be plural or end in a "(qualifier)"
    pub name: String,
    /// Slug of the owning category
    pub category: String,
    /// Unit cost in AUD
    pub cost: Cost,
    /// Display glyph
    pub icon: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub senate_reference: String,
    #[serde(default)]
    pub calculation_notes: String,
    #[serde(default)]
    pub procurement_context: String,
    /// When the cost figure was last checked
    pub last_verified: VerifiedDate,
}

impl ComparisonRecord {
    /// The description up to its first sentence break (". ").
    ///
    /// Descriptions without a break are returned whole.
    pub fn summary(&self) -> &str {
        match self.description.find(". ") {
            Some(idx) => &self.description[..=idx],
            None => &self.description,
        }
    }

    /// Whether this record shares at least one tag with `other`.
    pub fn shares_tag_with(&self, other: &ComparisonRecord) -> bool {
        self.tags.iter().any(|tag| other.tags.contains(tag))
    }
}

/// A named grouping of comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub icon: String,
}

/// Whether a slug is safe to use as a URL segment and a file name.
pub fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Build a record with the fields tests usually care about.
    pub fn record(id: &str, category: &str, cost: f64, verified: &str) -> ComparisonRecord {
        ComparisonRecord {
            id: id.to_string(),
            name: format!("Item {id}"),
            category: category.to_string(),
            cost: Cost::new(cost).unwrap(),
            icon: "*".to_string(),
            description: format!("About {id}. More detail."),
            tags: vec![],
            source: format!("Source for {id}"),
            senate_reference: format!("Ref {id}"),
            calculation_notes: String::new(),
            procurement_context: String::new(),
            last_verified: VerifiedDate::parse(verified).unwrap(),
        }
    }

    pub fn category(slug: &str) -> CategoryInfo {
        CategoryInfo {
            slug: slug.to_string(),
            name: slug.to_uppercase(),
            description: format!("All about {slug}"),
            icon: "#".to_string(),
        }
    }
}
