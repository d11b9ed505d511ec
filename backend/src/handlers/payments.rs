//! HTTP handlers for manual payment entries and transaction listings

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::transaction::{CreatePaymentInput, TransactionFilter, TransactionService};
use crate::AppState;
use shared::models::LedgerTransaction;

/// Record a manual payment entry
pub async fn create_payment(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(input): Json<CreatePaymentInput>,
) -> AppResult<Json<LedgerTransaction>> {
    let service = TransactionService::new(state.db);
    let transaction = service.create_payment(input).await?;
    Ok(Json(transaction))
}

/// List transactions with optional store/type/date filters
pub async fn list_transactions(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(filter): Query<TransactionFilter>,
) -> AppResult<Json<Vec<LedgerTransaction>>> {
    let service = TransactionService::new(state.db);
    let transactions = service.list_transactions(filter).await?;
    Ok(Json(transactions))
}
