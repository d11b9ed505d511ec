//! Common types used across the back-office

use serde::{Deserialize, Serialize};

/// Pagination parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

/// Date range for queries and reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRange {
    pub from: chrono::NaiveDate,
    pub to: chrono::NaiveDate,
}

/// Format a document number from a counter value, e.g. `IA-00042`
/// or `INV-000042` depending on `width`.
pub fn format_document_number(prefix: &str, seq: i64, width: usize) -> String {
    format!("{}{:0width$}", prefix, seq, width = width)
}

/// Parse the numeric suffix out of a document number such as `INV-000042`.
/// Returns `None` when the prefix does not match or the suffix is not numeric.
pub fn parse_document_suffix(number: &str, prefix: &str) -> Option<i64> {
    number.strip_prefix(prefix)?.parse().ok()
}
