//! HTTP handlers for reports and exports

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::report::{ReportService, SalesSummaryRow};
use crate::AppState;
use shared::types::DateRange;

/// Query for report endpoints: a date range plus an optional store filter
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub loc_code: Option<String>,
}

/// Sales summary per store and day
pub async fn sales_summary(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<Vec<SalesSummaryRow>>> {
    let service = ReportService::new(state.db);
    let range = DateRange {
        from: query.from,
        to: query.to,
    };
    let summary = service.sales_summary(range, query.loc_code).await?;
    Ok(Json(summary))
}

/// Export transactions as CSV
pub async fn export_transactions(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<ReportQuery>,
) -> AppResult<(HeaderMap, String)> {
    let service = ReportService::new(state.db);
    let range = DateRange {
        from: query.from,
        to: query.to,
    };
    let csv = service.export_transactions_csv(range, query.loc_code).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"transactions.csv\""),
    );

    Ok((headers, csv))
}
