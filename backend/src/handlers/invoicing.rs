//! HTTP handlers for sales invoicing

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::invoicing::{CreateInvoiceInput, CreateInvoiceResult, InvoicingService};
use crate::AppState;
use shared::models::SalesInvoice;

/// Query filters for invoice listings
#[derive(Debug, Default, Deserialize)]
pub struct InvoiceListQuery {
    pub loc_code: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Create an invoice
pub async fn create_invoice(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(input): Json<CreateInvoiceInput>,
) -> AppResult<Json<CreateInvoiceResult>> {
    let service = InvoicingService::new(state.db);
    let result = service.create_invoice(input).await?;
    Ok(Json(result))
}

/// Get an invoice by id
pub async fn get_invoice(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(invoice_id): Path<Uuid>,
) -> AppResult<Json<SalesInvoice>> {
    let service = InvoicingService::new(state.db);
    let invoice = service.get(invoice_id).await?;
    Ok(Json(invoice))
}

/// List invoices with optional store and date filters
pub async fn list_invoices(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<InvoiceListQuery>,
) -> AppResult<Json<Vec<SalesInvoice>>> {
    let service = InvoicingService::new(state.db);
    let invoices = service.list(query.loc_code, query.from, query.to).await?;
    Ok(Json(invoices))
}
