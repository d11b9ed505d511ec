//! HTTP handlers for daily cash/bank closings

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::reconciliation::{ReconciliationService, SaveClosingInput, StoreDayClose};
use crate::AppState;
use shared::models::{CloseTransaction, DayTotals};

/// Query for the admin closing view
#[derive(Debug, Deserialize)]
pub struct CloseViewQuery {
    pub date: NaiveDate,
}

/// Save (or overwrite) the manual closing for a store/day
pub async fn save_closing(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(input): Json<SaveClosingInput>,
) -> AppResult<Json<CloseTransaction>> {
    let service = ReconciliationService::new(state.db);
    let closing = service.save_closing(input).await?;
    Ok(Json(closing))
}

/// Get the saved closing for a store/day
pub async fn get_closing(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path((loc_code, date)): Path<(String, NaiveDate)>,
) -> AppResult<Json<CloseTransaction>> {
    let service = ReconciliationService::new(state.db);
    let closing = service.get_closing(&loc_code, date).await?;
    Ok(Json(closing))
}

/// Calculated cash/bank totals for a store/day, without saving anything
pub async fn day_totals(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path((loc_code, date)): Path<(String, NaiveDate)>,
) -> AppResult<Json<DayTotals>> {
    let service = ReconciliationService::new(state.db);
    let totals = service.compute_store_day(&loc_code, date).await?;
    Ok(Json(totals))
}

/// Admin reconciliation view across all stores for one day
pub async fn admin_close_view(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<CloseViewQuery>,
) -> AppResult<Json<Vec<StoreDayClose>>> {
    current_user.0.require_admin()?;
    let service = ReconciliationService::new(state.db);
    let view = service.admin_close_view(query.date).await?;
    Ok(Json(view))
}
