//! Reporting: sales summaries and CSV exports

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::error::{AppError, AppResult};
use shared::types::DateRange;

/// Reporting service
#[derive(Clone)]
pub struct ReportService {
    db: PgPool,
}

/// One sales-summary bucket: a store and day
#[derive(Debug, Serialize, FromRow)]
pub struct SalesSummaryRow {
    pub loc_code: String,
    pub invoice_date: NaiveDate,
    pub invoice_count: i64,
    pub units_sold: i64,
    pub revenue: Decimal,
}

impl ReportService {
    /// Create a new ReportService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Sales summary per store and day over a date range
    pub async fn sales_summary(
        &self,
        range: DateRange,
        loc_code: Option<String>,
    ) -> AppResult<Vec<SalesSummaryRow>> {
        if range.from > range.to {
            return Err(AppError::Validation {
                field: "from".to_string(),
                message: "Range start must not be after range end".to_string(),
            });
        }

        let rows = sqlx::query_as::<_, SalesSummaryRow>(
            r#"
            SELECT loc_code, invoice_date,
                   COUNT(*) as invoice_count,
                   COALESCE(SUM(
                       (SELECT COALESCE(SUM((l->>'quantity')::bigint), 0)
                        FROM jsonb_array_elements(lines) l)
                   ), 0) as units_sold,
                   COALESCE(SUM(total), 0) as revenue
            FROM sales_invoices
            WHERE invoice_date >= $1 AND invoice_date <= $2
              AND ($3::text IS NULL OR loc_code = $3)
            GROUP BY loc_code, invoice_date
            ORDER BY loc_code, invoice_date
            "#,
        )
        .bind(range.from)
        .bind(range.to)
        .bind(&loc_code)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Export transactions for a store/date range as CSV
    pub async fn export_transactions_csv(
        &self,
        range: DateRange,
        loc_code: Option<String>,
    ) -> AppResult<String> {
        let rows = sqlx::query_as::<_, (String, String, String, String, String, NaiveDate)>(
            r#"
            SELECT txn_type, cash, bank, upi, loc_code, txn_date
            FROM transactions
            WHERE txn_date >= $1 AND txn_date <= $2
              AND ($3::text IS NULL OR loc_code = $3)
            ORDER BY txn_date, created_at
            "#,
        )
        .bind(range.from)
        .bind(range.to)
        .bind(&loc_code)
        .fetch_all(&self.db)
        .await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(["type", "cash", "bank", "upi", "loc_code", "date"])
            .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;

        for (txn_type, cash, bank, upi, loc, date) in rows {
            writer
                .write_record([
                    txn_type.as_str(),
                    cash.as_str(),
                    bank.as_str(),
                    upi.as_str(),
                    loc.as_str(),
                    date.to_string().as_str(),
                ])
                .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV flush failed: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV encoding: {}", e)))
    }
}
