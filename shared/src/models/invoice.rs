//! Sales invoices
//!
//! Invoice lines carry a typed snapshot of the item as it looked at the
//! time of sale, so later edits or deletions of the item never change a
//! posted invoice.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Item details captured at the moment of sale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub item_id: Option<Uuid>,
    pub item_group_id: Option<Uuid>,
    pub sku: String,
    pub name: String,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// One invoice line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub item: ItemSnapshot,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

impl InvoiceLine {
    /// Build a line with its total computed from quantity and unit price
    pub fn new(item: ItemSnapshot, quantity: i64, unit_price: Decimal) -> Self {
        let line_total = unit_price * Decimal::from(quantity);
        Self {
            item,
            quantity,
            unit_price,
            line_total,
        }
    }
}

/// A posted sales invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesInvoice {
    pub id: Uuid,
    pub number: String,
    pub loc_code: String,
    pub customer: Option<String>,
    pub warehouse: String,
    pub lines: Vec<InvoiceLine>,
    pub total: Decimal,
    /// Payment split, string-encoded like ledger transactions
    pub cash: String,
    pub bank: String,
    pub upi: String,
    pub invoice_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Sum line totals into an invoice total
pub fn invoice_total(lines: &[InvoiceLine]) -> Decimal {
    lines.iter().map(|l| l.line_total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn snapshot(sku: &str) -> ItemSnapshot {
        ItemSnapshot {
            item_id: None,
            item_group_id: None,
            sku: sku.to_string(),
            name: sku.to_string(),
            size: None,
            color: None,
        }
    }

    #[test]
    fn test_line_total() {
        let line = InvoiceLine::new(snapshot("RUN-42"), 3, dec("199.50"));
        assert_eq!(line.line_total, dec("598.50"));
    }

    #[test]
    fn test_invoice_total_sums_lines() {
        let lines = vec![
            InvoiceLine::new(snapshot("RUN-42"), 2, dec("100")),
            InvoiceLine::new(snapshot("RUN-43"), 1, dec("50.25")),
        ];
        assert_eq!(invoice_total(&lines), dec("250.25"));
    }
}
