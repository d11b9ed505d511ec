//! Inventory adjustment documents
//!
//! Adjustments are created as drafts and only touch the stock ledger when
//! applied. Applying walks the lines best-effort: an unresolvable item is
//! reported and skipped, never aborting the batch. There is no transaction
//! tying the status change to the stock mutations; a crash between them
//! leaves the two inconsistent (accepted gap).

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::sequence::SequenceService;
use crate::services::stock_ledger::{StockAdjustOutcome, StockLedgerService};
use shared::models::{AdjustmentLine, AdjustmentStatus, InventoryAdjustment};
use shared::validation::validate_warehouse_name;

/// Counter id shared by all adjustment documents
const ADJUSTMENT_COUNTER: &str = "inventory_adjustment";
const ADJUSTMENT_PREFIX: &str = "IA-";

/// Adjustment service
#[derive(Clone)]
pub struct AdjustmentService {
    db: PgPool,
}

/// Input for creating an adjustment draft
#[derive(Debug, Deserialize)]
pub struct CreateAdjustmentInput {
    pub warehouse: String,
    pub reason: Option<String>,
    pub lines: Vec<AdjustmentLine>,
}

/// Input for updating a draft
#[derive(Debug, Deserialize)]
pub struct UpdateAdjustmentInput {
    pub warehouse: Option<String>,
    pub reason: Option<String>,
    pub lines: Option<Vec<AdjustmentLine>>,
}

/// Result of applying an adjustment: the document plus per-line outcomes
#[derive(Debug, Serialize)]
pub struct ApplyAdjustmentResult {
    pub adjustment: InventoryAdjustment,
    pub line_results: Vec<StockAdjustOutcome>,
}

/// Row for adjustment queries
#[derive(Debug, FromRow)]
struct AdjustmentRow {
    id: Uuid,
    number: String,
    status: String,
    warehouse: String,
    reason: Option<String>,
    lines: Json<Vec<AdjustmentLine>>,
    created_at: chrono::DateTime<Utc>,
    updated_at: chrono::DateTime<Utc>,
}

impl AdjustmentRow {
    fn into_model(self) -> AppResult<InventoryAdjustment> {
        let status = AdjustmentStatus::from_str(&self.status)
            .ok_or_else(|| AppError::Internal(format!("Unknown adjustment status {}", self.status)))?;
        Ok(InventoryAdjustment {
            id: self.id,
            number: self.number,
            status,
            warehouse: self.warehouse,
            reason: self.reason,
            lines: self.lines.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const ADJUSTMENT_COLUMNS: &str = "id, number, status, warehouse, reason, lines, created_at, updated_at";

impl AdjustmentService {
    /// Create a new AdjustmentService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create an adjustment draft with a fresh document number
    pub async fn create(&self, input: CreateAdjustmentInput) -> AppResult<InventoryAdjustment> {
        if let Err(msg) = validate_warehouse_name(&input.warehouse) {
            return Err(AppError::Validation {
                field: "warehouse".to_string(),
                message: msg.to_string(),
            });
        }
        if input.lines.is_empty() {
            return Err(AppError::Validation {
                field: "lines".to_string(),
                message: "Adjustment must have at least one line".to_string(),
            });
        }

        let number = SequenceService::new(self.db.clone())
            .next_number(ADJUSTMENT_COUNTER, ADJUSTMENT_PREFIX)
            .await?;

        let row = sqlx::query_as::<_, AdjustmentRow>(&format!(
            r#"
            INSERT INTO inventory_adjustments (number, status, warehouse, reason, lines)
            VALUES ($1, 'draft', $2, $3, $4)
            RETURNING {}
            "#,
            ADJUSTMENT_COLUMNS
        ))
        .bind(&number)
        .bind(input.warehouse.trim())
        .bind(&input.reason)
        .bind(Json(&input.lines))
        .fetch_one(&self.db)
        .await?;

        row.into_model()
    }

    /// Get an adjustment by id
    pub async fn get(&self, id: Uuid) -> AppResult<InventoryAdjustment> {
        let row = sqlx::query_as::<_, AdjustmentRow>(&format!(
            "SELECT {} FROM inventory_adjustments WHERE id = $1",
            ADJUSTMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Adjustment".to_string()))?;

        row.into_model()
    }

    /// List adjustments, newest first
    pub async fn list(&self) -> AppResult<Vec<InventoryAdjustment>> {
        let rows = sqlx::query_as::<_, AdjustmentRow>(&format!(
            "SELECT {} FROM inventory_adjustments ORDER BY created_at DESC",
            ADJUSTMENT_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(AdjustmentRow::into_model).collect()
    }

    /// Update a draft. Applied adjustments are immutable.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateAdjustmentInput,
    ) -> AppResult<InventoryAdjustment> {
        let existing = self.get(id).await?;
        if existing.status != AdjustmentStatus::Draft {
            return Err(AppError::InvalidStateTransition(
                "Only draft adjustments can be edited".to_string(),
            ));
        }

        let warehouse = input
            .warehouse
            .map(|w| w.trim().to_string())
            .unwrap_or(existing.warehouse);
        if let Err(msg) = validate_warehouse_name(&warehouse) {
            return Err(AppError::Validation {
                field: "warehouse".to_string(),
                message: msg.to_string(),
            });
        }
        let reason = input.reason.or(existing.reason);
        let lines = input.lines.unwrap_or(existing.lines);

        let row = sqlx::query_as::<_, AdjustmentRow>(&format!(
            r#"
            UPDATE inventory_adjustments
            SET warehouse = $1, reason = $2, lines = $3, updated_at = now()
            WHERE id = $4
            RETURNING {}
            "#,
            ADJUSTMENT_COLUMNS
        ))
        .bind(&warehouse)
        .bind(&reason)
        .bind(Json(&lines))
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        row.into_model()
    }

    /// Apply a draft: flip its status to adjusted, then post every line's
    /// delta to the stock ledger best-effort.
    pub async fn apply(&self, id: Uuid) -> AppResult<ApplyAdjustmentResult> {
        let adjustment = self.get(id).await?;
        if adjustment.status == AdjustmentStatus::Adjusted {
            return Err(AppError::InvalidStateTransition(
                "Adjustment has already been applied".to_string(),
            ));
        }

        let row = sqlx::query_as::<_, AdjustmentRow>(&format!(
            r#"
            UPDATE inventory_adjustments
            SET status = 'adjusted', updated_at = now()
            WHERE id = $1
            RETURNING {}
            "#,
            ADJUSTMENT_COLUMNS
        ))
        .bind(id)
        .fetch_one(&self.db)
        .await?;
        let adjustment = row.into_model()?;

        let line_results = self.post_lines(&adjustment, 1).await?;

        Ok(ApplyAdjustmentResult {
            adjustment,
            line_results,
        })
    }

    /// Delete an adjustment. An applied document has its deltas reversed
    /// (negated, best-effort) before the row is removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<Vec<StockAdjustOutcome>> {
        let adjustment = self.get(id).await?;

        let line_results = if adjustment.status == AdjustmentStatus::Adjusted {
            self.post_lines(&adjustment, -1).await?
        } else {
            Vec::new()
        };

        sqlx::query("DELETE FROM inventory_adjustments WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(line_results)
    }

    /// Post every line's delta (or its negation) to the stock ledger.
    /// Failures are collected per line, not raised.
    async fn post_lines(
        &self,
        adjustment: &InventoryAdjustment,
        sign: i64,
    ) -> AppResult<Vec<StockAdjustOutcome>> {
        let ledger = StockLedgerService::new(self.db.clone());
        let mut results = Vec::with_capacity(adjustment.lines.len());

        for line in &adjustment.lines {
            let outcome = ledger
                .adjust_stock(
                    &line.item_ref,
                    line.quantity_adjusted.saturating_mul(sign),
                    &adjustment.warehouse,
                    line.item_group_id,
                )
                .await?;

            if !outcome.success {
                tracing::warn!(
                    number = %adjustment.number,
                    item_ref = %line.item_ref,
                    "adjustment line skipped"
                );
            }
            results.push(outcome);
        }

        Ok(results)
    }
}
