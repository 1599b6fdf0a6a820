//! CSV export of the sources table.
//!
//! Every field is quoted; embedded quotes are doubled. Rows follow whatever
//! order the caller's query produced.

use crate::data::ComparisonRecord;
use crate::format;
use crate::site::Site;

/// Header line of the export.
pub const CSV_HEADERS: [&str; 7] = [
    "Name",
    "Cost (AUD)",
    "Quantity",
    "Category",
    "Source",
    "Senate Reference",
    "Last Verified",
];

/// Suggested download file name.
pub const CSV_FILE_NAME: &str = "bomdrop-sources.csv";

/// One exported row, fields in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub fields: [String; 7],
}

impl CsvRow {
    pub fn from_record(site: &Site, record: &ComparisonRecord) -> Self {
        Self {
            fields: [
                record.name.clone(),
                format::plain(record.cost.get()),
                site.quantity(record).to_string(),
                record.category.clone(),
                record.source.clone(),
                record.senate_reference.clone(),
                record.last_verified.to_string(),
            ],
        }
    }

    /// The row as one CSV line, without a trailing newline.
    pub fn to_line(&self) -> String {
        self.fields
            .iter()
            .map(|f| escape_field(f))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Quote a field, doubling any embedded quotes.
pub fn escape_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Rows for `records`, in the given order.
pub fn build_csv_rows<'a, I>(site: &Site, records: I) -> Vec<CsvRow>
where
    I: IntoIterator<Item = &'a ComparisonRecord>,
{
    records
        .into_iter()
        .map(|r| CsvRow::from_record(site, r))
        .collect()
}

/// Render the header and rows, newline-terminated.
pub fn render_csv(rows: &[CsvRow]) -> String {
    let mut output = CSV_HEADERS.join(",");
    output.push('\n');
    for row in rows {
        output.push_str(&row.to_line());
        output.push('\n');
    }
    output
}
