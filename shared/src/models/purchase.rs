//! Purchase receiving documents

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One received line: an item reference and the quantity received
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub item_ref: String,
    pub item_group_id: Option<Uuid>,
    pub quantity: i64,
    pub unit_cost: Option<Decimal>,
}

/// A posted purchase receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub id: Uuid,
    pub number: String,
    pub supplier: String,
    pub warehouse: String,
    pub lines: Vec<ReceiptLine>,
    pub received_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}
