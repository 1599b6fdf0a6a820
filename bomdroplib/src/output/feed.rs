//! The machine-readable data feed (`api/feed.json`).
//!
//! The feed embeds every record unchanged, adds the derived `quantity`,
//! `totalValue` and canonical `url`, and appends dataset statistics.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::data::{CategoryInfo, ComparisonRecord};
use crate::site::Site;
use crate::stats::Statistics;

/// Site-relative path of the feed document.
pub const FEED_PATH: &str = "/api/feed.json";

/// Response headers served with the feed.
pub const FEED_HEADERS: [(&str, &str); 3] = [
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
    ("Cache-Control", "public, s-maxage=86400, stale-while-revalidate"),
];

/// Feed header block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedMetadata {
    pub title: String,
    pub description: String,
    pub version: String,
    /// RFC 3339 build timestamp
    pub generated: String,
    pub total_items: usize,
    #[serde(rename = "bomTotalCost")]
    pub reference_total: f64,
    pub license: String,
    pub source: String,
    pub api_endpoint: String,
}

/// A record plus its derived values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem<'a> {
    #[serde(flatten)]
    pub record: &'a ComparisonRecord,
    pub quantity: u64,
    pub total_value: f64,
    pub url: String,
}

/// The complete feed document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feed<'a> {
    pub metadata: FeedMetadata,
    pub categories: &'a [CategoryInfo],
    pub comparisons: Vec<FeedItem<'a>>,
    pub statistics: Statistics,
}

impl<'a> Feed<'a> {
    /// Build the feed for `site`, stamped with `generated`.
    pub fn build(site: &'a Site, generated: DateTime<Utc>) -> Self {
        let config = site.config();
        let dataset = site.dataset();

        let comparisons = dataset
            .get_all()
            .iter()
            .map(|record| FeedItem {
                record,
                quantity: site.quantity(record),
                total_value: site.total_value(record),
                url: site.compare_url(&record.id),
            })
            .collect();

        Feed {
            metadata: FeedMetadata {
                title: config.feed_title.clone(),
                description: config.feed_description.clone(),
                version: config.feed_version.clone(),
                generated: generated.to_rfc3339_opts(SecondsFormat::Millis, true),
                total_items: dataset.len(),
                reference_total: site.reference_total().get(),
                license: config.license.clone(),
                source: site.home_url(),
                api_endpoint: site.page_url(FEED_PATH),
            },
            categories: dataset.get_all_categories(),
            comparisons,
            statistics: Statistics::compute(dataset),
        }
    }

    /// Pretty-printed JSON body.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A feed body together with the headers it is served with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedResponse {
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl FeedResponse {
    pub fn new(feed: &Feed<'_>) -> crate::Result<Self> {
        Ok(Self {
            headers: FEED_HEADERS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: feed.to_json()?,
        })
    }

    /// Look up a header value, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::data::Dataset;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn site() -> Site {
        Site::new(SiteConfig::default(), Dataset::bundled().unwrap()).unwrap()
    }

    fn generated() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 23, 1, 2, 3).unwrap()
    }

    #[test]
    fn test_metadata() {
        let site = site();
        let feed = Feed::build(&site, generated());
        assert_eq!(feed.metadata.total_items, site.dataset().len());
        assert_eq!(feed.metadata.reference_total, 96_500_000.0);
        assert_eq!(feed.metadata.source, "https://bomdrop.com.au");
        assert_eq!(
            feed.metadata.api_endpoint,
            "https://bomdrop.com.au/api/feed.json"
        );
        assert_eq!(feed.metadata.generated, "2025-10-23T01:02:03.000Z");
    }

    #[test]
    fn test_metadata_wire_names() {
        let site = site();
        let value = serde_json::to_value(Feed::build(&site, generated())).unwrap();
        let metadata = value["metadata"].as_object().unwrap();
        assert_eq!(metadata["bomTotalCost"], 96_500_000.0);
        assert!(!metadata.contains_key("referenceTotal"));
        for key in ["totalItems", "apiEndpoint", "generated", "version"] {
            assert!(metadata.contains_key(key), "{key}");
        }
    }

    #[test]
    fn test_items_carry_derived_values() {
        let site = site();
        let feed = Feed::build(&site, generated());
        let value = serde_json::to_value(&feed).unwrap();
        let ambulance = value["comparisons"]
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["id"] == "ambulance")
            .unwrap();
        assert_eq!(ambulance["quantity"], 275);
        assert_eq!(ambulance["totalValue"], 96_250_000.0);
        assert_eq!(ambulance["url"], "https://bomdrop.com.au/compare/ambulance/");
        assert_eq!(ambulance["cost"], 350_000.0);
        assert!(ambulance["lastVerified"].is_string());
    }

    #[test]
    fn test_quantities_match_calculator() {
        let site = site();
        let feed = Feed::build(&site, generated());
        for item in &feed.comparisons {
            assert_eq!(
                item.quantity,
                crate::quantity::calculate_quantity(item.record.cost.get(), 96_500_000.0).unwrap()
            );
        }
    }

    #[test]
    fn test_category_counts_sum_to_total() {
        let site = site();
        let feed = Feed::build(&site, generated());
        let value = serde_json::to_value(&feed).unwrap();
        let counts = value["statistics"]["categoryCounts"].as_object().unwrap();
        let sum: u64 = counts.values().map(|v| v.as_u64().unwrap()).sum();
        assert_eq!(
            sum,
            value["statistics"]["totalComparisons"].as_u64().unwrap()
        );
        assert_eq!(counts.len(), site.dataset().get_all_categories().len());
    }

    #[test]
    fn test_response_headers() {
        let site = site();
        let response = FeedResponse::new(&Feed::build(&site, generated())).unwrap();
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
        assert!(response
            .header("Cache-Control")
            .unwrap()
            .starts_with("public"));
        let parsed: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert!(parsed["metadata"].is_object());
    }
}
