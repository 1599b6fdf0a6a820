//! Writing the static site build to disk.
//!
//! [`publish`] is the one place that touches the output directory. Layout:
//!
//! ```text
//! <out>/api/feed.json
//! <out>/bomdrop-sources.csv
//! <out>/sitemap.xml
//! <out>/pages/index.json
//! <out>/pages/categories.json
//! <out>/pages/category/<slug>.json
//! <out>/pages/compare/<id>.json
//! <out>/og/<id>.<ext>
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::BomdropError;
use crate::output::card::{generate_cards, CardBatchReport, CardRenderer};
use crate::output::csv::{build_csv_rows, render_csv, CSV_FILE_NAME};
use crate::output::feed::Feed;
use crate::output::pages::{CategoryIndex, CategoryPage, ComparisonPage, HomePage};
use crate::output::sitemap::{build_sitemap, render_sitemap_xml};
use crate::query::{filter_and_sort, TableQuery};
use crate::site::Site;
use crate::Result;

/// What a build wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PublishReport {
    /// Data and page files, excluding cards
    pub files: Vec<PathBuf>,
    pub cards: CardBatchReport,
}

struct Writer<'a> {
    root: &'a Path,
    files: Vec<PathBuf>,
}

impl Writer<'_> {
    fn write(&mut self, relative: &str, contents: &str) -> Result<()> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| BomdropError::FileWrite {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&path, contents).map_err(|source| BomdropError::FileWrite {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote file");
        self.files.push(path);
        Ok(())
    }

    fn write_json<T: Serialize>(&mut self, relative: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.write(relative, &json)
    }
}

/// Write every export, page model and preview card for `site` into `out_dir`.
///
/// Data files fail fast; card failures are collected in the report.
pub fn publish(
    site: &Site,
    out_dir: impl AsRef<Path>,
    renderer: &dyn CardRenderer,
    generated: DateTime<Utc>,
) -> Result<PublishReport> {
    let root = out_dir.as_ref();
    let mut writer = Writer {
        root,
        files: Vec::new(),
    };
    let dataset = site.dataset();

    writer.write(
        "api/feed.json",
        &Feed::build(site, generated).to_json()?,
    )?;

    let ordered = filter_and_sort(dataset.get_all(), &TableQuery::new(), site.reference_total());
    writer.write(CSV_FILE_NAME, &render_csv(&build_csv_rows(site, ordered)))?;

    let sitemap = build_sitemap(site, generated.date_naive());
    writer.write("sitemap.xml", &render_sitemap_xml(&sitemap))?;

    writer.write_json("pages/index.json", &HomePage::build(site))?;
    writer.write_json("pages/categories.json", &CategoryIndex::build(site))?;
    for category in dataset.get_all_categories() {
        if let Some(page) = CategoryPage::build(site, &category.slug) {
            writer.write_json(&format!("pages/category/{}.json", category.slug), &page)?;
        }
    }
    for record in dataset.get_all() {
        if let Some(page) = ComparisonPage::build(site, &record.id, renderer.extension()) {
            writer.write_json(&format!("pages/compare/{}.json", record.id), &page)?;
        }
    }

    let cards = generate_cards(site, renderer, root.join("og"))?;

    tracing::info!(
        dir = %root.display(),
        files = writer.files.len(),
        cards = cards.generated,
        card_failures = cards.failures.len(),
        "site published"
    );

    Ok(PublishReport {
        files: writer.files,
        cards,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::data::Dataset;
    use crate::output::card::SvgCardRenderer;
    use chrono::TimeZone;

    #[test]
    fn test_publish_layout() {
        let site = Site::new(SiteConfig::default(), Dataset::bundled().unwrap()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let generated = Utc.with_ymd_and_hms(2025, 10, 23, 0, 0, 0).unwrap();
        let report = publish(&site, dir.path(), &SvgCardRenderer::new(), generated).unwrap();

        let root = dir.path();
        assert!(root.join("api/feed.json").is_file());
        assert!(root.join("bomdrop-sources.csv").is_file());
        assert!(root.join("sitemap.xml").is_file());
        assert!(root.join("pages/index.json").is_file());
        assert!(root.join("pages/category/health.json").is_file());
        assert!(root.join("pages/compare/ambulance.json").is_file());
        assert!(root.join("og/ambulance.svg").is_file());

        let ds = site.dataset();
        assert_eq!(
            report.files.len(),
            5 + ds.get_all_categories().len() + ds.len()
        );
        assert_eq!(report.cards.generated, ds.len());

        let csv = std::fs::read_to_string(root.join("bomdrop-sources.csv")).unwrap();
        assert_eq!(csv.lines().count(), ds.len() + 1);

        let feed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(root.join("api/feed.json")).unwrap())
                .unwrap();
        assert_eq!(feed["metadata"]["generated"], "2025-10-23T00:00:00.000Z");
    }
}
