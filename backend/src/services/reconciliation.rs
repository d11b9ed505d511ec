//! Cash/bank closing reconciliation
//!
//! Sums a store's transactions for one calendar day and compares them
//! against the manually counted closing. Read-only apart from the closing
//! upsert.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{closing_status, sum_day_totals, CloseStatus, CloseTransaction, DayTotals};
use shared::validation::validate_loc_code;

/// Reconciliation service
#[derive(Clone)]
pub struct ReconciliationService {
    db: PgPool,
}

/// Input for saving a manual closing
#[derive(Debug, Deserialize)]
pub struct SaveClosingInput {
    pub loc_code: String,
    pub close_date: NaiveDate,
    /// Manually counted cash, string-encoded like transaction amounts
    pub close_cash: String,
    pub note: Option<String>,
}

/// One store's reconciliation line in the admin closing view
#[derive(Debug, Serialize)]
pub struct StoreDayClose {
    pub loc_code: String,
    pub calculated_cash: i64,
    pub calculated_bank: i64,
    pub has_manual_close: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_cash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CloseStatus>,
}

/// Row for closing queries
#[derive(Debug, FromRow)]
struct CloseRow {
    id: Uuid,
    loc_code: String,
    close_date: NaiveDate,
    close_cash: String,
    calculated_cash: i64,
    calculated_bank: i64,
    note: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<CloseRow> for CloseTransaction {
    fn from(row: CloseRow) -> Self {
        CloseTransaction {
            id: row.id,
            loc_code: row.loc_code,
            close_date: row.close_date,
            close_cash: row.close_cash,
            calculated_cash: row.calculated_cash,
            calculated_bank: row.calculated_bank,
            note: row.note,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl ReconciliationService {
    /// Create a new ReconciliationService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Sum a store's transactions for one calendar day into cash and bank
    /// buckets. UPI amounts fold into the bank bucket.
    pub async fn compute_store_day(
        &self,
        loc_code: &str,
        date: NaiveDate,
    ) -> AppResult<DayTotals> {
        let rows = sqlx::query_as::<_, (String, String, String)>(
            "SELECT cash, bank, upi FROM transactions WHERE loc_code = $1 AND txn_date = $2",
        )
        .bind(loc_code)
        .bind(date)
        .fetch_all(&self.db)
        .await?;

        Ok(sum_day_totals(
            rows.iter()
                .map(|(cash, bank, upi)| (cash.as_str(), bank.as_str(), upi.as_str())),
        ))
    }

    /// Upsert the manual closing for a store/day, snapshotting the
    /// calculated totals at save time.
    pub async fn save_closing(&self, input: SaveClosingInput) -> AppResult<CloseTransaction> {
        if let Err(msg) = validate_loc_code(&input.loc_code) {
            return Err(AppError::Validation {
                field: "loc_code".to_string(),
                message: msg.to_string(),
            });
        }
        if input.close_cash.trim().is_empty() {
            return Err(AppError::Validation {
                field: "close_cash".to_string(),
                message: "Counted cash must not be empty".to_string(),
            });
        }

        let totals = self
            .compute_store_day(&input.loc_code, input.close_date)
            .await?;

        let row = sqlx::query_as::<_, CloseRow>(
            r#"
            INSERT INTO close_transactions (loc_code, close_date, close_cash, calculated_cash, calculated_bank, note)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (loc_code, close_date) DO UPDATE
                SET close_cash = EXCLUDED.close_cash,
                    calculated_cash = EXCLUDED.calculated_cash,
                    calculated_bank = EXCLUDED.calculated_bank,
                    note = EXCLUDED.note,
                    updated_at = now()
            RETURNING id, loc_code, close_date, close_cash, calculated_cash, calculated_bank,
                      note, created_at, updated_at
            "#,
        )
        .bind(&input.loc_code)
        .bind(input.close_date)
        .bind(input.close_cash.trim())
        .bind(totals.calculated_cash)
        .bind(totals.calculated_bank)
        .bind(&input.note)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Get the saved closing for a store/day
    pub async fn get_closing(
        &self,
        loc_code: &str,
        date: NaiveDate,
    ) -> AppResult<CloseTransaction> {
        let row = sqlx::query_as::<_, CloseRow>(
            r#"
            SELECT id, loc_code, close_date, close_cash, calculated_cash, calculated_bank,
                   note, created_at, updated_at
            FROM close_transactions
            WHERE loc_code = $1 AND close_date = $2
            "#,
        )
        .bind(loc_code)
        .bind(date)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Closing".to_string()))?;

        Ok(row.into())
    }

    /// Admin view across all stores for a day: calculated totals plus a
    /// Match/Mismatch flag wherever a manual close exists. Stores appear
    /// if they have transactions or a closing for the day.
    pub async fn admin_close_view(&self, date: NaiveDate) -> AppResult<Vec<StoreDayClose>> {
        let loc_codes = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT loc_code FROM transactions WHERE txn_date = $1
            UNION
            SELECT loc_code FROM close_transactions WHERE close_date = $1
            ORDER BY loc_code
            "#,
        )
        .bind(date)
        .fetch_all(&self.db)
        .await?;

        let mut view = Vec::with_capacity(loc_codes.len());
        for loc_code in loc_codes {
            let totals = self.compute_store_day(&loc_code, date).await?;

            let manual = sqlx::query_scalar::<_, String>(
                "SELECT close_cash FROM close_transactions WHERE loc_code = $1 AND close_date = $2",
            )
            .bind(&loc_code)
            .bind(date)
            .fetch_optional(&self.db)
            .await?;

            let status = manual
                .as_deref()
                .map(|close_cash| closing_status(totals.calculated_cash, close_cash));

            view.push(StoreDayClose {
                loc_code,
                calculated_cash: totals.calculated_cash,
                calculated_bank: totals.calculated_bank,
                has_manual_close: manual.is_some(),
                close_cash: manual,
                status,
            });
        }

        Ok(view)
    }
}
