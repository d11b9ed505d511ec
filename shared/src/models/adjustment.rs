//! Inventory adjustment documents

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of an adjustment document. Deltas hit the stock ledger only
/// on the draft -> adjusted transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentStatus {
    Draft,
    Adjusted,
}

impl AdjustmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentStatus::Draft => "draft",
            AdjustmentStatus::Adjusted => "adjusted",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(AdjustmentStatus::Draft),
            "adjusted" => Some(AdjustmentStatus::Adjusted),
            _ => None,
        }
    }
}

/// One line of an adjustment: an item reference (id, SKU or name) and a
/// signed quantity delta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentLine {
    pub item_ref: String,
    pub item_group_id: Option<Uuid>,
    pub quantity_adjusted: i64,
}

/// An inventory adjustment document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryAdjustment {
    pub id: Uuid,
    pub number: String,
    pub status: AdjustmentStatus,
    pub warehouse: String,
    pub reason: Option<String>,
    pub lines: Vec<AdjustmentLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
