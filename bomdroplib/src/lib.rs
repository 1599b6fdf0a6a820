//! # bomdroplib
//!
//! Derived data for a cost comparison site: how many everyday things a fixed
//! reference total (by default the $96.5M BOM.gov.au redesign) would have
//! bought instead.
//!
//! ## Overview
//!
//! The library loads a dataset of comparison records, each with a unit cost,
//! and derives everything the site publishes from it:
//!
//! - **Quantities**: `floor(reference_total / cost)`, computed in one place
//! - **Plural names**: "275 Ambulances", "5 Tim Tam Packets (200g)"
//! - **Statistics**: category counts, cost range, verification dates
//! - **Queries**: sort, filter and search for the sources table
//! - **Outputs**: JSON feed, CSV, site map, page models, preview cards
//!
//! Everything hangs off an immutable [`Site`], which binds a [`SiteConfig`]
//! to a validated [`Dataset`].
//!
//! ## Example
//!
//! ```rust
//! use bomdroplib::{calculate_quantity, pluralize, Dataset, Site, SiteConfig};
//!
//! assert_eq!(calculate_quantity(350_000.0, 96_500_000.0).unwrap(), 275);
//! assert_eq!(pluralize("City", 3), "Cities");
//!
//! let site = Site::new(SiteConfig::default(), Dataset::bundled().unwrap()).unwrap();
//! let ambulance = site.dataset().get_by_id("ambulance").unwrap();
//! assert_eq!(site.quantity(ambulance), 275);
//! assert_eq!(site.plural_name(ambulance), "Ambulances");
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod output;
pub mod pluralize;
pub mod publish;
pub mod quantity;
pub mod query;
pub mod site;
pub mod stats;
pub mod verify;

pub use config::{SiteConfig, CONFIG_FILE_NAME};
pub use data::{is_safe_slug, CategoryInfo, ComparisonRecord, Dataset, VerifiedDate};
pub use error::{BomdropError, DatasetIssue};
pub use output::{CardRenderer, Feed, SourcesTable, SvgCardRenderer};
pub use pluralize::{pluralize, Pluralizer};
pub use publish::{publish, PublishReport};
pub use quantity::{calculate_quantity, Cost, ReferenceTotal};
pub use query::{filter_and_sort, search, CategoryFilter, SortDirection, SortField, TableQuery};
pub use site::Site;
pub use stats::{cost_range, CostRange, GroupSummary, Statistics, VerificationRange};
pub use verify::{audit_calculations, Inconsistency, VerificationReport};

/// Result type for bomdroplib operations
pub type Result<T> = std::result::Result<T, BomdropError>;
