//! The site context: configuration and dataset, bound together.
//!
//! A [`Site`] is built once at start-up and passed by reference to every
//! page model, export and card generator. It is the only way those callers
//! reach the reference total, so a record's quantity cannot drift between
//! outputs.

use crate::config::SiteConfig;
use crate::data::{CategoryInfo, ComparisonRecord, Dataset};
use crate::format;
use crate::pluralize::Pluralizer;
use crate::quantity::{self, ReferenceTotal};
use crate::Result;

/// Immutable configuration + dataset.
#[derive(Debug, Clone)]
pub struct Site {
    config: SiteConfig,
    dataset: Dataset,
    reference_total: ReferenceTotal,
    pluralizer: Pluralizer,
}

impl Site {
    /// Bind a configuration to a dataset, validating the configuration and
    /// checking that every record's quantity is representable.
    pub fn new(config: SiteConfig, dataset: Dataset) -> Result<Self> {
        let reference_total = config.validate()?;
        for record in dataset.get_all() {
            quantity::checked_quantity(record.cost, reference_total)?;
        }
        Ok(Self {
            config,
            dataset,
            reference_total,
            pluralizer: Pluralizer::default(),
        })
    }

    /// Replace the default pluralizer (e.g. one with irregular overrides).
    pub fn with_pluralizer(mut self, pluralizer: Pluralizer) -> Self {
        self.pluralizer = pluralizer;
        self
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn reference_total(&self) -> ReferenceTotal {
        self.reference_total
    }

    pub fn pluralizer(&self) -> &Pluralizer {
        &self.pluralizer
    }

    /// How many of `record` the reference total buys.
    pub fn quantity(&self, record: &ComparisonRecord) -> u64 {
        quantity::quantity(record.cost, self.reference_total)
    }

    /// `quantity * cost` for a record.
    pub fn total_value(&self, record: &ComparisonRecord) -> f64 {
        self.quantity(record) as f64 * record.cost.get()
    }

    /// The record's name, pluralized for its quantity.
    pub fn plural_name(&self, record: &ComparisonRecord) -> String {
        self.pluralizer.pluralize(&record.name, self.quantity(record))
    }

    /// Absolute URL of the home page.
    pub fn home_url(&self) -> String {
        self.config.base_url.clone()
    }

    /// Absolute URL of a site path such as `/sources/`.
    pub fn page_url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Canonical detail page URL: `<base>/compare/<id>/`.
    pub fn compare_url(&self, id: &str) -> String {
        self.page_url(&format!("/compare/{id}/"))
    }

    /// Category page URL: `<base>/category/<slug>/`.
    pub fn category_url(&self, slug: &str) -> String {
        self.page_url(&format!("/category/{slug}/"))
    }

    /// Site-relative path of a record's preview card.
    pub fn card_path(&self, id: &str, extension: &str) -> String {
        format!("/og/{id}.{extension}")
    }

    /// "Instead of $96.5M on BOM.gov.au"
    pub fn spend_caption(&self) -> String {
        format!(
            "Instead of {} on {}",
            format::millions(self.reference_total.get()),
            self.config.spend_label
        )
    }

    /// "Instead of $96.5M on BOM.gov.au, Australia could buy 275 Ambulances"
    pub fn share_text(&self, record: &ComparisonRecord) -> String {
        format!(
            "{}, {} could buy {} {}",
            self.spend_caption(),
            self.config.buyer,
            format::thousands(self.quantity(record)),
            self.plural_name(record)
        )
    }

    /// The category a record belongs to. Always present for a validated
    /// dataset.
    pub fn category_of(&self, record: &ComparisonRecord) -> Option<&CategoryInfo> {
        self.dataset.get_category(&record.category)
    }
}
