//! Sales invoicing
//!
//! Creating an invoice pulls a fresh number from the per-prefix counter,
//! posts the document, decrements stock per line best-effort, and mirrors
//! the payment split into an auto-generated income transaction. A
//! duplicate invoice number surfaces as a 409; the caller re-requests.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use crate::error::{map_db_error, AppError, AppResult};
use crate::services::sequence::SequenceService;
use crate::services::stock_ledger::{StockAdjustOutcome, StockLedgerService};
use crate::services::transaction::{CreatePaymentInput, TransactionService};
use rust_decimal::Decimal;
use shared::models::{
    invoice_total, InvoiceLine, ItemSnapshot, SalesInvoice, TransactionType,
};
use shared::validation::{validate_loc_code, validate_warehouse_name};

const INVOICE_PREFIX: &str = "INV-";

/// Invoicing service
#[derive(Clone)]
pub struct InvoicingService {
    db: PgPool,
}

/// One requested invoice line: an item reference plus quantity and price
#[derive(Debug, Deserialize)]
pub struct InvoiceLineInput {
    pub item_ref: String,
    pub item_group_id: Option<Uuid>,
    pub quantity: i64,
    pub unit_price: Decimal,
}

/// Input for creating an invoice
#[derive(Debug, Deserialize)]
pub struct CreateInvoiceInput {
    pub loc_code: String,
    pub customer: Option<String>,
    pub warehouse: String,
    pub invoice_date: Option<NaiveDate>,
    pub lines: Vec<InvoiceLineInput>,
    /// Payment split, string-encoded like ledger transactions
    pub cash: Option<String>,
    pub bank: Option<String>,
    pub upi: Option<String>,
}

/// Result of invoice creation: the document plus per-line stock outcomes
#[derive(Debug, Serialize)]
pub struct CreateInvoiceResult {
    pub invoice: SalesInvoice,
    pub line_results: Vec<StockAdjustOutcome>,
}

/// Row for invoice queries
#[derive(Debug, FromRow)]
struct InvoiceRow {
    id: Uuid,
    number: String,
    loc_code: String,
    customer: Option<String>,
    warehouse: String,
    lines: Json<Vec<InvoiceLine>>,
    total: Decimal,
    cash: String,
    bank: String,
    upi: String,
    invoice_date: NaiveDate,
    created_at: chrono::DateTime<Utc>,
}

impl From<InvoiceRow> for SalesInvoice {
    fn from(row: InvoiceRow) -> Self {
        SalesInvoice {
            id: row.id,
            number: row.number,
            loc_code: row.loc_code,
            customer: row.customer,
            warehouse: row.warehouse,
            lines: row.lines.0,
            total: row.total,
            cash: row.cash,
            bank: row.bank,
            upi: row.upi,
            invoice_date: row.invoice_date,
            created_at: row.created_at,
        }
    }
}

const INVOICE_COLUMNS: &str =
    "id, number, loc_code, customer, warehouse, lines, total, cash, bank, upi, invoice_date, created_at";

impl InvoicingService {
    /// Create a new InvoicingService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create an invoice, decrement stock and mirror the payment split
    /// into the transaction ledger.
    pub async fn create_invoice(&self, input: CreateInvoiceInput) -> AppResult<CreateInvoiceResult> {
        if let Err(msg) = validate_loc_code(&input.loc_code) {
            return Err(AppError::Validation {
                field: "loc_code".to_string(),
                message: msg.to_string(),
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
                message: "Invoice must have at least one line".to_string(),
            });
        }
        if input.lines.iter().any(|l| l.quantity <= 0) {
            return Err(AppError::Validation {
                field: "lines".to_string(),
                message: "Invoice quantities must be positive".to_string(),
            });
        }

        let ledger = StockLedgerService::new(self.db.clone());

        // Snapshot each line's item at sale time. An unresolvable
        // reference still produces a line; its stock application will
        // report failure below.
        let mut lines = Vec::with_capacity(input.lines.len());
        for line in &input.lines {
            let snapshot = ledger
                .lookup_snapshot(&line.item_ref, line.item_group_id)
                .await?
                .unwrap_or_else(|| ItemSnapshot {
                    item_id: None,
                    item_group_id: line.item_group_id,
                    sku: line.item_ref.clone(),
                    name: line.item_ref.clone(),
                    size: None,
                    color: None,
                });
            lines.push(InvoiceLine::new(snapshot, line.quantity, line.unit_price));
        }
        let total = invoice_total(&lines);

        let number = SequenceService::new(self.db.clone())
            .next_invoice_number(INVOICE_PREFIX)
            .await?;
        let invoice_date = input.invoice_date.unwrap_or_else(|| Utc::now().date_naive());
        let cash = input.cash.unwrap_or_else(|| "0".to_string());
        let bank = input.bank.unwrap_or_else(|| "0".to_string());
        let upi = input.upi.unwrap_or_else(|| "0".to_string());

        let row = sqlx::query_as::<_, InvoiceRow>(&format!(
            r#"
            INSERT INTO sales_invoices (number, loc_code, customer, warehouse, lines, total,
                                        cash, bank, upi, invoice_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            INVOICE_COLUMNS
        ))
        .bind(&number)
        .bind(&input.loc_code)
        .bind(&input.customer)
        .bind(input.warehouse.trim())
        .bind(Json(&lines))
        .bind(total)
        .bind(&cash)
        .bind(&bank)
        .bind(&upi)
        .bind(invoice_date)
        .fetch_one(&self.db)
        .await
        .map_err(|e| map_db_error(e, "invoice number"))?;
        let invoice: SalesInvoice = row.into();

        // Decrement stock per line, best-effort
        let mut line_results = Vec::with_capacity(input.lines.len());
        for line in &input.lines {
            let outcome = ledger
                .adjust_stock(
                    &line.item_ref,
                    -line.quantity,
                    &invoice.warehouse,
                    line.item_group_id,
                )
                .await?;

            if !outcome.success {
                tracing::warn!(
                    number = %invoice.number,
                    item_ref = %line.item_ref,
                    "invoice line skipped in stock ledger"
                );
            }
            line_results.push(outcome);
        }

        // Mirror the payment split into the ledger
        TransactionService::new(self.db.clone())
            .create_invoice_transaction(CreatePaymentInput {
                txn_type: TransactionType::Income,
                cash: Some(invoice.cash.clone()),
                bank: Some(invoice.bank.clone()),
                upi: Some(invoice.upi.clone()),
                loc_code: invoice.loc_code.clone(),
                txn_date: Some(invoice.invoice_date),
                note: Some(format!("Invoice {}", invoice.number)),
            })
            .await?;

        Ok(CreateInvoiceResult {
            invoice,
            line_results,
        })
    }

    /// Get an invoice by id
    pub async fn get(&self, id: Uuid) -> AppResult<SalesInvoice> {
        let row = sqlx::query_as::<_, InvoiceRow>(&format!(
            "SELECT {} FROM sales_invoices WHERE id = $1",
            INVOICE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Invoice".to_string()))?;

        Ok(row.into())
    }

    /// List invoices with optional store and date filters
    pub async fn list(
        &self,
        loc_code: Option<String>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<SalesInvoice>> {
        let rows = sqlx::query_as::<_, InvoiceRow>(&format!(
            r#"
            SELECT {}
            FROM sales_invoices
            WHERE ($1::text IS NULL OR loc_code = $1)
              AND ($2::date IS NULL OR invoice_date >= $2)
              AND ($3::date IS NULL OR invoice_date <= $3)
            ORDER BY invoice_date DESC, created_at DESC
            "#,
            INVOICE_COLUMNS
        ))
        .bind(&loc_code)
        .bind(from)
        .bind(to)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
