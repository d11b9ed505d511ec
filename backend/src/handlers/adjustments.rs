//! HTTP handlers for inventory adjustments and direct stock updates

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::adjustment::{
    AdjustmentService, ApplyAdjustmentResult, CreateAdjustmentInput, UpdateAdjustmentInput,
};
use crate::services::stock_ledger::{StockAdjustOutcome, StockLedgerService};
use crate::AppState;
use shared::models::InventoryAdjustment;

/// One direct stock update request
#[derive(Debug, Deserialize)]
pub struct StockUpdateInput {
    pub item_ref: String,
    pub item_group_id: Option<Uuid>,
    pub quantity: i64,
    pub warehouse: String,
}

/// Apply a batch of signed stock deltas directly, without an adjustment
/// document. Lines are independent; each reports its own outcome.
pub async fn adjust_stock(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(inputs): Json<Vec<StockUpdateInput>>,
) -> AppResult<Json<Vec<StockAdjustOutcome>>> {
    let ledger = StockLedgerService::new(state.db);

    let mut outcomes = Vec::with_capacity(inputs.len());
    for input in &inputs {
        let outcome = ledger
            .adjust_stock(
                &input.item_ref,
                input.quantity,
                &input.warehouse,
                input.item_group_id,
            )
            .await?;
        outcomes.push(outcome);
    }

    Ok(Json(outcomes))
}

/// Create an adjustment draft
pub async fn create_adjustment(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(input): Json<CreateAdjustmentInput>,
) -> AppResult<Json<InventoryAdjustment>> {
    let service = AdjustmentService::new(state.db);
    let adjustment = service.create(input).await?;
    Ok(Json(adjustment))
}

/// Get an adjustment by id
pub async fn get_adjustment(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(adjustment_id): Path<Uuid>,
) -> AppResult<Json<InventoryAdjustment>> {
    let service = AdjustmentService::new(state.db);
    let adjustment = service.get(adjustment_id).await?;
    Ok(Json(adjustment))
}

/// List adjustments
pub async fn list_adjustments(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<InventoryAdjustment>>> {
    let service = AdjustmentService::new(state.db);
    let adjustments = service.list().await?;
    Ok(Json(adjustments))
}

/// Update a draft adjustment
pub async fn update_adjustment(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(adjustment_id): Path<Uuid>,
    Json(input): Json<UpdateAdjustmentInput>,
) -> AppResult<Json<InventoryAdjustment>> {
    let service = AdjustmentService::new(state.db);
    let adjustment = service.update(adjustment_id, input).await?;
    Ok(Json(adjustment))
}

/// Apply a draft adjustment to the stock ledger
pub async fn apply_adjustment(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(adjustment_id): Path<Uuid>,
) -> AppResult<Json<ApplyAdjustmentResult>> {
    let service = AdjustmentService::new(state.db);
    let result = service.apply(adjustment_id).await?;
    Ok(Json(result))
}

/// Delete an adjustment, reversing its deltas if it was applied
pub async fn delete_adjustment(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(adjustment_id): Path<Uuid>,
) -> AppResult<Json<Vec<StockAdjustOutcome>>> {
    let service = AdjustmentService::new(state.db);
    let reversals = service.delete(adjustment_id).await?;
    Ok(Json(reversals))
}
