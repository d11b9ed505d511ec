//! Payment entry and transaction listing

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{LedgerTransaction, TransactionSource, TransactionType};
use shared::validation::validate_loc_code;

/// Transaction service for manual payment entries and listings
#[derive(Clone)]
pub struct TransactionService {
    db: PgPool,
}

/// Input for recording a payment entry
#[derive(Debug, Deserialize)]
pub struct CreatePaymentInput {
    pub txn_type: TransactionType,
    pub cash: Option<String>,
    pub bank: Option<String>,
    pub upi: Option<String>,
    pub loc_code: String,
    pub txn_date: Option<NaiveDate>,
    pub note: Option<String>,
}

/// Filters for listing transactions
#[derive(Debug, Default, Deserialize)]
pub struct TransactionFilter {
    pub loc_code: Option<String>,
    pub txn_type: Option<TransactionType>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Row for transaction queries
#[derive(Debug, FromRow)]
struct TransactionRow {
    id: Uuid,
    txn_type: String,
    cash: String,
    bank: String,
    upi: String,
    loc_code: String,
    txn_date: NaiveDate,
    note: Option<String>,
    source: String,
    created_at: chrono::DateTime<Utc>,
}

impl TransactionRow {
    fn into_model(self) -> AppResult<LedgerTransaction> {
        let txn_type = TransactionType::from_str(&self.txn_type)
            .ok_or_else(|| AppError::Internal(format!("Unknown transaction type {}", self.txn_type)))?;
        let source = match self.source.as_str() {
            "manual" => TransactionSource::Manual,
            "invoice" => TransactionSource::Invoice,
            "sync" => TransactionSource::Sync,
            other => {
                return Err(AppError::Internal(format!(
                    "Unknown transaction source {}",
                    other
                )))
            }
        };

        Ok(LedgerTransaction {
            id: self.id,
            txn_type,
            cash: self.cash,
            bank: self.bank,
            upi: self.upi,
            loc_code: self.loc_code,
            txn_date: self.txn_date,
            note: self.note,
            source,
            created_at: self.created_at,
        })
    }
}

const TRANSACTION_COLUMNS: &str =
    "id, txn_type, cash, bank, upi, loc_code, txn_date, note, source, created_at";

impl TransactionService {
    /// Create a new TransactionService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a manual payment entry
    pub async fn create_payment(&self, input: CreatePaymentInput) -> AppResult<LedgerTransaction> {
        self.insert(input, TransactionSource::Manual).await
    }

    /// Record the auto-generated transaction mirroring an invoice's
    /// payment split
    pub async fn create_invoice_transaction(
        &self,
        input: CreatePaymentInput,
    ) -> AppResult<LedgerTransaction> {
        self.insert(input, TransactionSource::Invoice).await
    }

    async fn insert(
        &self,
        input: CreatePaymentInput,
        source: TransactionSource,
    ) -> AppResult<LedgerTransaction> {
        if let Err(msg) = validate_loc_code(&input.loc_code) {
            return Err(AppError::Validation {
                field: "loc_code".to_string(),
                message: msg.to_string(),
            });
        }

        let cash = input.cash.unwrap_or_else(|| "0".to_string());
        let bank = input.bank.unwrap_or_else(|| "0".to_string());
        let upi = input.upi.unwrap_or_else(|| "0".to_string());
        let txn_date = input.txn_date.unwrap_or_else(|| Utc::now().date_naive());

        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            INSERT INTO transactions (txn_type, cash, bank, upi, loc_code, txn_date, note, source)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            TRANSACTION_COLUMNS
        ))
        .bind(input.txn_type.as_str())
        .bind(&cash)
        .bind(&bank)
        .bind(&upi)
        .bind(&input.loc_code)
        .bind(txn_date)
        .bind(&input.note)
        .bind(source.as_str())
        .fetch_one(&self.db)
        .await?;

        row.into_model()
    }

    /// List transactions with optional store/type/date filters
    pub async fn list_transactions(
        &self,
        filter: TransactionFilter,
    ) -> AppResult<Vec<LedgerTransaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            SELECT {}
            FROM transactions
            WHERE ($1::text IS NULL OR loc_code = $1)
              AND ($2::text IS NULL OR txn_type = $2)
              AND ($3::date IS NULL OR txn_date >= $3)
              AND ($4::date IS NULL OR txn_date <= $4)
            ORDER BY txn_date DESC, created_at DESC
            "#,
            TRANSACTION_COLUMNS
        ))
        .bind(&filter.loc_code)
        .bind(filter.txn_type.map(|t| t.as_str()))
        .bind(filter.from)
        .bind(filter.to)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(TransactionRow::into_model).collect()
    }
}
