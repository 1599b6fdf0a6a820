//! Site map entries and their XML serialization.

use chrono::NaiveDate;
use serde::Serialize;

use crate::site::Site;

/// How often a page is expected to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

/// One `<url>` element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: NaiveDate,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

impl SitemapEntry {
    fn new(url: String, last_modified: NaiveDate, freq: ChangeFrequency, priority: f32) -> Self {
        Self {
            url,
            last_modified,
            change_frequency: freq,
            priority,
        }
    }
}

/// All site map entries: static pages, then categories, then comparisons.
///
/// Static and category pages are stamped with `today`; comparison pages with
/// the record's verification date.
pub fn build_sitemap(site: &Site, today: NaiveDate) -> Vec<SitemapEntry> {
    let mut entries = vec![
        SitemapEntry::new(site.home_url(), today, ChangeFrequency::Daily, 1.0),
        SitemapEntry::new(site.page_url("/sources/"), today, ChangeFrequency::Weekly, 0.9),
        SitemapEntry::new(
            site.page_url("/methodology/"),
            today,
            ChangeFrequency::Monthly,
            0.7,
        ),
    ];

    entries.extend(site.dataset().get_all_categories().iter().map(|c| {
        SitemapEntry::new(site.category_url(&c.slug), today, ChangeFrequency::Weekly, 0.8)
    }));

    entries.extend(site.dataset().get_all().iter().map(|r| {
        SitemapEntry::new(
            site.compare_url(&r.id),
            r.last_verified.date(),
            ChangeFrequency::Monthly,
            0.6,
        )
    }));

    entries
}

/// Serialize entries as a sitemaps.org `urlset` document.
pub fn render_sitemap_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.url)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            entry.last_modified.format("%Y-%m-%d")
        ));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.change_frequency.as_str()
        ));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Escape the five XML special characters.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::data::record::fixtures::{category, record};
    use crate::data::Dataset;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 1).unwrap()
    }

    fn site() -> Site {
        let dataset = Dataset::new(
            vec![category("health")],
            vec![record("ambulance", "health", 350_000.0, "9 September 2025")],
        )
        .unwrap();
        Site::new(SiteConfig::default(), dataset).unwrap()
    }

    #[test]
    fn test_entries_in_order() {
        let entries = build_sitemap(&site(), today());
        let urls: Vec<&str> = entries.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://bomdrop.com.au",
                "https://bomdrop.com.au/sources/",
                "https://bomdrop.com.au/methodology/",
                "https://bomdrop.com.au/category/health/",
                "https://bomdrop.com.au/compare/ambulance/",
            ]
        );
        assert_eq!(entries[0].change_frequency, ChangeFrequency::Daily);
        assert_eq!(entries[0].priority, 1.0);
        assert_eq!(entries[3].priority, 0.8);
        assert_eq!(entries[4].change_frequency, ChangeFrequency::Monthly);
    }

    #[test]
    fn test_comparison_uses_verified_date() {
        let entries = build_sitemap(&site(), today());
        assert_eq!(entries[0].last_modified, today());
        assert_eq!(
            entries[4].last_modified,
            NaiveDate::from_ymd_opt(2025, 9, 9).unwrap()
        );
    }

    #[test]
    fn test_xml() {
        let entries = build_sitemap(&site(), today());
        let xml = render_sitemap_xml(&entries);
        assert!(xml.starts_with("<?xml"));
        assert_eq!(xml.matches("<url>").count(), entries.len());
        assert!(xml.contains("<lastmod>2025-09-09</lastmod>"));
        assert!(xml.contains("<priority>0.6</priority>"));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a&b<c>"), "a&amp;b&lt;c&gt;");
        assert_eq!(escape_xml("\"'"), "&quot;&apos;");
    }
}
