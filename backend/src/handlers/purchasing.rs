//! HTTP handlers for purchase receiving

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::purchasing::{
    PurchasingService, ReceivePurchaseInput, ReceivePurchaseResult,
};
use crate::AppState;
use shared::models::PurchaseReceipt;

/// Receive a purchase into a warehouse
pub async fn receive_purchase(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(input): Json<ReceivePurchaseInput>,
) -> AppResult<Json<ReceivePurchaseResult>> {
    let service = PurchasingService::new(state.db);
    let result = service.receive(input).await?;
    Ok(Json(result))
}

/// Get a receipt by id
pub async fn get_receipt(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(receipt_id): Path<Uuid>,
) -> AppResult<Json<PurchaseReceipt>> {
    let service = PurchasingService::new(state.db);
    let receipt = service.get(receipt_id).await?;
    Ok(Json(receipt))
}

/// List receipts
pub async fn list_receipts(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<PurchaseReceipt>>> {
    let service = PurchasingService::new(state.db);
    let receipts = service.list().await?;
    Ok(Json(receipts))
}
