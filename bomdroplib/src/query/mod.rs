//! Query processing: filter, sort and search records.
//!
//! This module turns the raw dataset into the ordered record lists that the
//! presentation layer renders. It provides:
//!
//! - **Options**: `SortField`, `SortDirection`, `CategoryFilter`, `TableQuery`
//! - **Table queries**: `filter_and_sort`, stable in both directions
//! - **Search**: substring `search` and the `SearchState` machine
//!
//! ## Example
//!
//! ```rust
//! use bomdroplib::query::{filter_and_sort, SortField, TableQuery};
//! use bomdroplib::{Dataset, ReferenceTotal};
//!
//! let dataset = Dataset::bundled().unwrap();
//! let total = ReferenceTotal::new(96_500_000.0).unwrap();
//! let query = TableQuery::new().sort_by(SortField::Cost).descending();
//! let rows = filter_and_sort(dataset.get_all(), &query, total);
//! assert_eq!(rows.len(), dataset.len());
//! ```

pub mod options;
pub mod queryset;
pub mod search;

pub use options::{CategoryFilter, SortDirection, SortField, TableQuery};
pub use queryset::filter_and_sort;
pub use search::{search, SearchEvent, SearchState};
