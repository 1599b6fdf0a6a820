//! Output: everything the site publishes.
//!
//! This module handles the final stage of the pipeline, turning the site
//! context and query results into documents. It provides:
//!
//! - **Feed**: the JSON data feed with derived quantities and statistics
//! - **CSV**: the sources table export
//! - **Sitemap**: site map entries and XML
//! - **SourcesTable**: table-ready headers, rows and footer
//! - **Pages**: home, category and comparison page models
//! - **Cards**: social preview cards behind the `CardRenderer` trait
//!
//! Nothing here filters or sorts on its own; ordering comes from the query
//! stage.
//!
//! ## Example
//!
//! ```rust
//! use bomdroplib::output::{ComparisonPage, SourcesTable};
//! use bomdroplib::query::TableQuery;
//! use bomdroplib::{Dataset, Site, SiteConfig};
//!
//! let site = Site::new(SiteConfig::default(), Dataset::bundled().unwrap()).unwrap();
//! let table = SourcesTable::build(&site, &TableQuery::new());
//! assert_eq!(table.rows.len(), site.dataset().len());
//!
//! let page = ComparisonPage::build(&site, "ambulance", "svg").unwrap();
//! assert_eq!(page.headline, "275 Ambulances");
//! ```

pub mod card;
pub mod csv;
pub mod feed;
pub mod pages;
pub mod sitemap;
pub mod table;

pub use card::{
    generate_cards, CardBatchReport, CardFailure, CardRenderer, PreviewCard, SvgCardRenderer,
};
pub use csv::{build_csv_rows, escape_field, render_csv, CsvRow, CSV_FILE_NAME, CSV_HEADERS};
pub use feed::{Feed, FeedItem, FeedMetadata, FeedResponse, FEED_HEADERS, FEED_PATH};
pub use pages::{CategoryIndex, CategoryPage, CategoryTile, ComparisonPage, HomePage, ItemView};
pub use sitemap::{build_sitemap, render_sitemap_xml, ChangeFrequency, SitemapEntry};
pub use table::{SourcesTable, TableRow};
