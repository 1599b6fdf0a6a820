//! Options for filtering and sorting the comparison table.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Column to sort the comparison table by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// Item name, case-insensitive
    #[default]
    Name,
    /// Unit cost
    Cost,
    /// Computed quantity
    Quantity,
    /// Category slug
    Category,
    /// Verification date, chronological
    Verified,
}

impl SortField {
    /// All sortable columns, in table order.
    pub const ALL: [SortField; 5] = [
        SortField::Name,
        SortField::Cost,
        SortField::Quantity,
        SortField::Category,
        SortField::Verified,
    ];

    /// Lowercase identifier, as accepted by `FromStr`.
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Cost => "cost",
            SortField::Quantity => "quantity",
            SortField::Category => "category",
            SortField::Verified => "verified",
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" | "label" => Ok(SortField::Name),
            "cost" | "price" => Ok(SortField::Cost),
            "quantity" | "qty" => Ok(SortField::Quantity),
            "category" => Ok(SortField::Category),
            "verified" | "lastverified" | "last-verified" | "date" => Ok(SortField::Verified),
            _ => Err(format!("Unknown sort field: {}", s)),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    /// Ascending (A-Z, smallest first, oldest first)
    #[default]
    Ascending,
    /// Descending (Z-A, largest first, newest first)
    Descending,
}

impl SortDirection {
    /// The other direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Arrow glyph for table headers.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(format!("Unknown sort direction: {}", s)),
        }
    }
}

/// Which categories to keep.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// No filtering
    #[default]
    All,
    /// Only records in this category slug
    Only(String),
}

impl CategoryFilter {
    /// Whether a record in `category` passes the filter.
    pub fn accepts(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(slug) => slug == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(trimmed.to_string()))
        }
    }
}

/// Filter + ordering for one rendering of the comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableQuery {
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub category_filter: CategoryFilter,
}

impl TableQuery {
    /// Name ascending, all categories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: sort column
    pub fn sort_by(mut self, field: SortField) -> Self {
        self.sort_field = field;
        self
    }

    /// Builder: ascending
    pub fn ascending(mut self) -> Self {
        self.sort_direction = SortDirection::Ascending;
        self
    }

    /// Builder: descending
    pub fn descending(mut self) -> Self {
        self.sort_direction = SortDirection::Descending;
        self
    }

    /// Builder: category filter
    pub fn category(mut self, filter: CategoryFilter) -> Self {
        self.category_filter = filter;
        self
    }

    /// Apply a click on a column header.
    ///
    /// Clicking the active column flips its direction; clicking another
    /// column makes it active, ascending.
    pub fn click_header(&mut self, field: SortField) {
        if self.sort_field == field {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_field = field;
            self.sort_direction = SortDirection::Ascending;
        }
    }
}
