//! Dataset loading and lookup.
//!
//! This module owns the static input of the site:
//!
//! - **Records**: `ComparisonRecord` and `CategoryInfo`
//! - **Dates**: `VerifiedDate`, compared as calendar dates
//! - **Accessor**: `Dataset`, validated once and read-only afterwards
//!
//! ## Example
//!
//! ```rust
//! use bomdroplib::data::Dataset;
//!
//! let dataset = Dataset::bundled().unwrap();
//! let first = &dataset.get_all()[0];
//! assert_eq!(dataset.get_by_id(&first.id), Some(first));
//! assert!(dataset.get_by_id("no-such-item").is_none());
//! ```

pub mod dataset;
pub mod date;
pub mod record;

pub use dataset::Dataset;
pub use date::VerifiedDate;
pub use record::{is_safe_slug, CategoryInfo, ComparisonRecord};
