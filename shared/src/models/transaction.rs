//! Financial ledger transactions and end-of-day closings
//!
//! Amounts are string-encoded on the wire and in storage; all arithmetic
//! goes through [`parse_amount`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Types of ledger transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
    Transfer,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
            TransactionType::Transfer => "transfer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            "transfer" => Some(TransactionType::Transfer),
            _ => None,
        }
    }
}

/// Where a transaction came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionSource {
    Manual,
    Invoice,
    Sync,
}

impl TransactionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionSource::Manual => "manual",
            TransactionSource::Invoice => "invoice",
            TransactionSource::Sync => "sync",
        }
    }
}

/// A financial ledger line for a store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerTransaction {
    pub id: Uuid,
    pub txn_type: TransactionType,
    pub cash: String,
    pub bank: String,
    pub upi: String,
    pub loc_code: String,
    pub txn_date: NaiveDate,
    pub note: Option<String>,
    pub source: TransactionSource,
    pub created_at: DateTime<Utc>,
}

/// The manually counted end-of-day closing for a store, one per
/// `(loc_code, close_date)` pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseTransaction {
    pub id: Uuid,
    pub loc_code: String,
    pub close_date: NaiveDate,
    pub close_cash: String,
    pub calculated_cash: i64,
    pub calculated_bank: i64,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Calculated totals for one store and day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DayTotals {
    pub calculated_cash: i64,
    pub calculated_bank: i64,
}

/// Reconciliation outcome for a store/day with a manual close present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloseStatus {
    Match,
    Mismatch,
}

/// Parse the leading integer prefix of a string-encoded amount, so
/// `"129.99"` parses as 129. Returns `None` when no digits lead the value.
pub fn parse_amount_checked(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let mut end = 0;
    for (i, c) in trimmed.char_indices() {
        if c == '-' && i == 0 {
            end = 1;
        } else if c.is_ascii_digit() {
            end = i + c.len_utf8();
        } else {
            break;
        }
    }
    trimmed[..end].parse().ok()
}

/// Parse a string-encoded amount as an integer, treating unparsable
/// values as 0. Day-total sums use this so one garbage entry never
/// poisons a whole day.
pub fn parse_amount(raw: &str) -> i64 {
    parse_amount_checked(raw).unwrap_or(0)
}

/// Sum a day's transactions into cash and bank buckets.
///
/// UPI amounts fold into the bank bucket for reconciliation even though
/// they are stored separately on each transaction (business rule, flagged
/// for business-owner confirmation).
pub fn sum_day_totals<'a, I>(rows: I) -> DayTotals
where
    I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
{
    let mut totals = DayTotals::default();
    for (cash, bank, upi) in rows {
        totals.calculated_cash += parse_amount(cash);
        totals.calculated_bank += parse_amount(bank) + parse_amount(upi);
    }
    totals
}

/// Compare a calculated cash total against the manually entered close.
/// Exact equality, no tolerance; a counted value with no leading integer
/// is always a mismatch (it must not pass as 0 on an empty day).
pub fn closing_status(calculated_cash: i64, close_cash: &str) -> CloseStatus {
    match parse_amount_checked(close_cash) {
        Some(counted) if counted == calculated_cash => CloseStatus::Match,
        _ => CloseStatus::Mismatch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_plain() {
        assert_eq!(parse_amount("100"), 100);
        assert_eq!(parse_amount(" 250 "), 250);
        assert_eq!(parse_amount("-40"), -40);
    }

    #[test]
    fn test_parse_amount_truncates_decimals() {
        assert_eq!(parse_amount("129.99"), 129);
        assert_eq!(parse_amount("100.00"), 100);
    }

    #[test]
    fn test_parse_amount_defaults_to_zero() {
        assert_eq!(parse_amount(""), 0);
        assert_eq!(parse_amount("abc"), 0);
        assert_eq!(parse_amount("-"), 0);
    }

    #[test]
    fn test_sum_day_totals_folds_upi_into_bank() {
        let rows = vec![("100", "50", "20"), ("30", "0", "10")];
        let totals = sum_day_totals(rows);
        assert_eq!(totals.calculated_cash, 130);
        assert_eq!(totals.calculated_bank, 80);
    }

    #[test]
    fn test_closing_status_exact_equality() {
        assert_eq!(closing_status(130, "130"), CloseStatus::Match);
        assert_eq!(closing_status(130, "129.99"), CloseStatus::Mismatch);
        assert_eq!(closing_status(130, "131"), CloseStatus::Mismatch);
    }

    #[test]
    fn test_closing_status_unparsable_close_mismatches() {
        assert_eq!(closing_status(0, "abc"), CloseStatus::Mismatch);
        assert_eq!(closing_status(0, ""), CloseStatus::Mismatch);
        assert_eq!(closing_status(0, "-"), CloseStatus::Mismatch);
        assert_eq!(closing_status(0, "0"), CloseStatus::Match);
    }

    #[test]
    fn test_parse_amount_checked() {
        assert_eq!(parse_amount_checked("129.99"), Some(129));
        assert_eq!(parse_amount_checked("-40"), Some(-40));
        assert_eq!(parse_amount_checked("abc"), None);
        assert_eq!(parse_amount_checked(""), None);
    }
}
