//! Page models: the data each site page renders.
//!
//! Each model is built from a [`Site`] and holds display-ready values. Pages
//! for unknown ids or slugs are `None`; rendering a not-found page is the
//! caller's business.

use serde::Serialize;

use crate::data::{CategoryInfo, ComparisonRecord};
use crate::format;
use crate::site::Site;
use crate::stats::{self, CostRange, GroupSummary};

/// A record as shown in a grid or list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: String,
    pub name: String,
    pub plural_name: String,
    pub icon: String,
    pub category: String,
    pub cost: f64,
    pub cost_display: String,
    pub quantity: u64,
    pub quantity_display: String,
    pub summary: String,
    pub url: String,
}

impl ItemView {
    pub fn new(site: &Site, record: &ComparisonRecord) -> Self {
        let quantity = site.quantity(record);
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            plural_name: site.plural_name(record),
            icon: record.icon.clone(),
            category: record.category.clone(),
            cost: record.cost.get(),
            cost_display: format::dollars(record.cost.get()),
            quantity,
            quantity_display: format::thousands(quantity),
            summary: record.summary().to_string(),
            url: site.compare_url(&record.id),
        }
    }
}

/// A category with its record count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTile {
    #[serde(flatten)]
    pub info: CategoryInfo,
    pub count: usize,
    pub url: String,
}

fn category_tiles(site: &Site) -> Vec<CategoryTile> {
    let counts = stats::category_counts(site.dataset());
    site.dataset()
        .get_all_categories()
        .iter()
        .map(|info| CategoryTile {
            info: info.clone(),
            count: counts.get(&info.slug).unwrap_or(0),
            url: site.category_url(&info.slug),
        })
        .collect()
}

/// The home page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    /// "Instead of $96.5M on BOM.gov.au"
    pub caption: String,
    pub reference_total_display: String,
    pub total_comparisons: usize,
    /// The first `featured_count` records in dataset order
    pub featured: Vec<ItemView>,
    pub categories: Vec<CategoryTile>,
}

impl HomePage {
    pub fn build(site: &Site) -> Self {
        let featured = site
            .dataset()
            .get_all()
            .iter()
            .take(site.config().featured_count)
            .map(|r| ItemView::new(site, r))
            .collect();
        Self {
            caption: site.spend_caption(),
            reference_total_display: format::millions(site.reference_total().get()),
            total_comparisons: site.dataset().len(),
            featured,
            categories: category_tiles(site),
        }
    }
}

/// The category index page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryIndex {
    pub categories: Vec<CategoryTile>,
}

impl CategoryIndex {
    pub fn build(site: &Site) -> Self {
        Self {
            categories: category_tiles(site),
        }
    }
}

/// One category's page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPage {
    pub category: CategoryInfo,
    pub items: Vec<ItemView>,
    pub summary: GroupSummary,
    pub total_cost_display: String,
    /// Rounded to whole dollars. `None` when the category has no records
    pub average_cost_display: Option<String>,
    pub cost_range: Option<CostRange>,
    /// "$98,000 - $350,000"
    pub cost_range_display: Option<String>,
    pub url: String,
}

impl CategoryPage {
    /// The page for `slug`, or `None` if no such category exists.
    pub fn build(site: &Site, slug: &str) -> Option<Self> {
        let category = site.dataset().get_category(slug)?;
        let records = site.dataset().get_by_category(slug);
        let summary = stats::summarize(records.iter().copied());
        let cost_range = stats::cost_range(records.iter().copied());
        Some(Self {
            category: category.clone(),
            items: records.iter().map(|r| ItemView::new(site, r)).collect(),
            total_cost_display: format::dollars(summary.total_cost),
            average_cost_display: summary.average_cost.map(|avg| format::dollars(avg.round())),
            cost_range_display: cost_range
                .as_ref()
                .map(|r| format!("{} - {}", format::dollars(r.min), format::dollars(r.max))),
            cost_range,
            summary,
            url: site.category_url(slug),
        })
    }
}

/// The detail page for one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonPage {
    pub item: ItemView,
    pub description: String,
    /// "275 Ambulances"
    pub headline: String,
    pub caption: String,
    pub share_text: String,
    pub share_url: String,
    /// Site-relative preview card path
    pub card_path: String,
    pub category: Option<CategoryInfo>,
    pub related: Vec<ItemView>,
    pub source: String,
    pub senate_reference: String,
    pub calculation_notes: String,
    pub procurement_context: String,
    pub last_verified: String,
}

impl ComparisonPage {
    /// The page for `id`, or `None` if no such record exists.
    ///
    /// `card_extension` is the file extension of the configured card
    /// renderer.
    pub fn build(site: &Site, id: &str, card_extension: &str) -> Option<Self> {
        let record = site.dataset().get_by_id(id)?;
        let item = ItemView::new(site, record);
        let related = site
            .dataset()
            .related(record, site.config().related_limit)
            .into_iter()
            .map(|r| ItemView::new(site, r))
            .collect();
        Some(Self {
            headline: format!("{} {}", item.quantity_display, item.plural_name),
            description: record.description.clone(),
            caption: site.spend_caption(),
            share_text: site.share_text(record),
            share_url: site.compare_url(&record.id),
            card_path: site.card_path(&record.id, card_extension),
            category: site.category_of(record).cloned(),
            related,
            source: record.source.clone(),
            senate_reference: record.senate_reference.clone(),
            calculation_notes: record.calculation_notes.clone(),
            procurement_context: record.procurement_context.clone(),
            last_verified: record.last_verified.to_string(),
            item,
        })
    }
}
