//! Dataset checks beyond what loading enforces.
//!
//! The calculation audit scans each record's procurement context for
//! numbers that look like a stale copy of its quantity: within one of the
//! computed value, but not equal to it.

use regex::Regex;
use serde::Serialize;

use crate::data::ComparisonRecord;
use crate::site::Site;
use crate::Result;

/// Matches `1,234,567` and `1234.5` style numbers.
const NUMBER_PATTERN: &str = r"\d{1,3}(,\d{3})*(\.\d+)?";

/// A quoted number that disagrees with the computed quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inconsistency {
    pub id: String,
    pub name: String,
    pub calculated: u64,
    pub in_context: u64,
    pub context: String,
}

/// Result of auditing every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    pub checked: usize,
    pub inconsistencies: Vec<Inconsistency>,
}

impl VerificationReport {
    pub fn is_consistent(&self) -> bool {
        self.inconsistencies.is_empty()
    }
}

/// Numbers appearing in `text`, commas removed and fractions dropped.
fn numbers_in(pattern: &Regex, text: &str) -> Vec<u64> {
    pattern
        .find_iter(text)
        .filter_map(|m| {
            let digits = m.as_str().replace(',', "");
            let whole = digits.split('.').next().unwrap_or_default();
            whole.parse().ok()
        })
        .collect()
}

fn audit_record(site: &Site, pattern: &Regex, record: &ComparisonRecord) -> Vec<Inconsistency> {
    let calculated = site.quantity(record);
    numbers_in(pattern, &record.procurement_context)
        .into_iter()
        .filter(|&n| n != calculated && n.abs_diff(calculated) <= 1)
        .map(|n| Inconsistency {
            id: record.id.clone(),
            name: record.name.clone(),
            calculated,
            in_context: n,
            context: record.procurement_context.clone(),
        })
        .collect()
}

/// Audit every record's procurement context against its quantity.
pub fn audit_calculations(site: &Site) -> Result<VerificationReport> {
    let pattern = Regex::new(NUMBER_PATTERN)?;

    let records = site.dataset().get_all();
    let inconsistencies: Vec<Inconsistency> = records
        .iter()
        .flat_map(|r| audit_record(site, &pattern, r))
        .collect();

    for issue in &inconsistencies {
        tracing::warn!(
            id = %issue.id,
            calculated = issue.calculated,
            in_context = issue.in_context,
            "procurement context disagrees with quantity"
        );
    }

    Ok(VerificationReport {
        checked: records.len(),
        inconsistencies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::data::record::fixtures::{category, record};
    use crate::data::Dataset;
    use pretty_assertions::assert_eq;

    fn site_with_context(cost: f64, context: &str) -> Site {
        let mut r = record("item", "misc", cost, "2025-10-01");
        r.procurement_context = context.to_string();
        let dataset = Dataset::new(vec![category("misc")], vec![r]).unwrap();
        Site::new(SiteConfig::default(), dataset).unwrap()
    }

    #[test]
    fn test_numbers_in() {
        let re = Regex::new(NUMBER_PATTERN).unwrap();
        assert_eq!(
            numbers_in(&re, "Buy 21,444,444 packs at $4.50 or 275 units"),
            vec![21_444_444, 4, 275]
        );
        assert!(numbers_in(&re, "no digits").is_empty());
    }

    #[test]
    fn test_exact_match_is_consistent() {
        let site = site_with_context(350_000.0, "Enough for 275 ambulances at $350,000 each");
        let report = audit_calculations(&site).unwrap();
        assert_eq!(report.checked, 1);
        assert!(report.is_consistent());
    }

    #[test]
    fn test_off_by_one_is_flagged() {
        let site = site_with_context(350_000.0, "Enough for 276 ambulances");
        let report = audit_calculations(&site).unwrap();
        assert_eq!(
            report.inconsistencies,
            vec![Inconsistency {
                id: "item".into(),
                name: "Item item".into(),
                calculated: 275,
                in_context: 276,
                context: "Enough for 276 ambulances".into(),
            }]
        );
    }

    #[test]
    fn test_distant_numbers_are_ignored() {
        let site = site_with_context(350_000.0, "Roughly 300 of them, or 2 per town");
        assert!(audit_calculations(&site).unwrap().is_consistent());
    }

    #[test]
    fn test_bundled_dataset_is_consistent() {
        let site = Site::new(SiteConfig::default(), Dataset::bundled().unwrap()).unwrap();
        let report = audit_calculations(&site).unwrap();
        assert!(report.is_consistent(), "{:?}", report.inconsistencies);
    }
}
