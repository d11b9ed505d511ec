//! Purchase receiving
//!
//! Receiving a purchase posts every line's quantity into the stock ledger
//! at the receiving warehouse. Lines are independent: one unresolvable
//! item is logged and skipped while the rest land.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::sequence::SequenceService;
use crate::services::stock_ledger::{StockAdjustOutcome, StockLedgerService};
use shared::models::{PurchaseReceipt, ReceiptLine};
use shared::validation::validate_warehouse_name;

const RECEIPT_COUNTER: &str = "purchase_receipt";
const RECEIPT_PREFIX: &str = "PR-";

/// Purchasing service
#[derive(Clone)]
pub struct PurchasingService {
    db: PgPool,
}

/// Input for receiving a purchase
#[derive(Debug, Deserialize)]
pub struct ReceivePurchaseInput {
    pub supplier: String,
    pub warehouse: String,
    pub received_on: Option<NaiveDate>,
    pub lines: Vec<ReceiptLine>,
}

/// Result of receiving: the receipt plus per-line stock outcomes
#[derive(Debug, Serialize)]
pub struct ReceivePurchaseResult {
    pub receipt: PurchaseReceipt,
    pub line_results: Vec<StockAdjustOutcome>,
}

/// Row for receipt queries
#[derive(Debug, FromRow)]
struct ReceiptRow {
    id: Uuid,
    number: String,
    supplier: String,
    warehouse: String,
    lines: Json<Vec<ReceiptLine>>,
    received_on: NaiveDate,
    created_at: chrono::DateTime<Utc>,
}

impl From<ReceiptRow> for PurchaseReceipt {
    fn from(row: ReceiptRow) -> Self {
        PurchaseReceipt {
            id: row.id,
            number: row.number,
            supplier: row.supplier,
            warehouse: row.warehouse,
            lines: row.lines.0,
            received_on: row.received_on,
            created_at: row.created_at,
        }
    }
}

const RECEIPT_COLUMNS: &str = "id, number, supplier, warehouse, lines, received_on, created_at";

impl PurchasingService {
    /// Create a new PurchasingService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Receive a purchase: create the numbered receipt, then post each
    /// line's quantity to the stock ledger best-effort.
    pub async fn receive(&self, input: ReceivePurchaseInput) -> AppResult<ReceivePurchaseResult> {
        if input.supplier.trim().is_empty() {
            return Err(AppError::Validation {
                field: "supplier".to_string(),
                message: "Supplier must not be empty".to_string(),
            });
        }
        if let Err(msg) = validate_warehouse_name(&input.warehouse) {
            return Err(AppError::Validation {
                field: "warehouse".to_string(),
                message: msg.to_string(),
            });
        }
        if input.lines.is_empty() {
            return Err(AppError::Validation {
                field: "lines".to_string(),
                message: "Receipt must have at least one line".to_string(),
            });
        }
        if input.lines.iter().any(|l| l.quantity <= 0) {
            return Err(AppError::Validation {
                field: "lines".to_string(),
                message: "Received quantities must be positive".to_string(),
            });
        }

        let number = SequenceService::new(self.db.clone())
            .next_number(RECEIPT_COUNTER, RECEIPT_PREFIX)
            .await?;
        let received_on = input.received_on.unwrap_or_else(|| Utc::now().date_naive());

        let row = sqlx::query_as::<_, ReceiptRow>(&format!(
            r#"
            INSERT INTO purchase_receipts (number, supplier, warehouse, lines, received_on)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            RECEIPT_COLUMNS
        ))
        .bind(&number)
        .bind(input.supplier.trim())
        .bind(input.warehouse.trim())
        .bind(Json(&input.lines))
        .bind(received_on)
        .fetch_one(&self.db)
        .await?;
        let receipt: PurchaseReceipt = row.into();

        let ledger = StockLedgerService::new(self.db.clone());
        let mut line_results = Vec::with_capacity(receipt.lines.len());
        for line in &receipt.lines {
            let outcome = ledger
                .adjust_stock(
                    &line.item_ref,
                    line.quantity,
                    &receipt.warehouse,
                    line.item_group_id,
                )
                .await?;

            if !outcome.success {
                tracing::warn!(
                    number = %receipt.number,
                    item_ref = %line.item_ref,
                    "receipt line skipped"
                );
            }
            line_results.push(outcome);
        }

        Ok(ReceivePurchaseResult {
            receipt,
            line_results,
        })
    }

    /// Get a receipt by id
    pub async fn get(&self, id: Uuid) -> AppResult<PurchaseReceipt> {
        let row = sqlx::query_as::<_, ReceiptRow>(&format!(
            "SELECT {} FROM purchase_receipts WHERE id = $1",
            RECEIPT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Receipt".to_string()))?;

        Ok(row.into())
    }

    /// List receipts, newest first
    pub async fn list(&self) -> AppResult<Vec<PurchaseReceipt>> {
        let rows = sqlx::query_as::<_, ReceiptRow>(&format!(
            "SELECT {} FROM purchase_receipts ORDER BY created_at DESC",
            RECEIPT_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
