//! Document number sequencing
//!
//! All document numbers come from counter rows bumped with a single
//! `INSERT .. ON CONFLICT DO UPDATE .. RETURNING` statement, which is safe
//! under concurrent requests. Invoice numbers used to be derived by
//! scanning the latest invoice and incrementing its suffix; that read race
//! produced duplicate numbers, so they now share the atomic counter
//! primitive, seeded once from the highest existing invoice suffix.

use sqlx::PgPool;

use crate::error::AppResult;
use shared::types::{format_document_number, parse_document_suffix};

/// Width of generic document suffixes, e.g. `IA-00042`
const DOCUMENT_SUFFIX_WIDTH: usize = 5;

/// Width of invoice suffixes, e.g. `INV-000042`
const INVOICE_SUFFIX_WIDTH: usize = 6;

/// Sequence service producing monotonically-increasing document numbers
#[derive(Clone)]
pub struct SequenceService {
    db: PgPool,
}

impl SequenceService {
    /// Create a new SequenceService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Next number for a shared counter, zero-padded to 5 digits
    /// (e.g. `next_number("inventory_adjustment", "IA-")` -> `IA-00001`).
    pub async fn next_number(&self, counter_id: &str, prefix: &str) -> AppResult<String> {
        let seq = self.bump(counter_id).await?;
        Ok(format_document_number(prefix, seq, DOCUMENT_SUFFIX_WIDTH))
    }

    /// Next invoice number for a prefix, zero-padded to 6 digits.
    ///
    /// On first use the per-prefix counter is seeded from the highest
    /// suffix already present in `sales_invoices`, so numbering continues
    /// where historical data left off. The seed insert uses
    /// `ON CONFLICT DO NOTHING`, so two concurrent first calls still end
    /// up bumping one counter row.
    pub async fn next_invoice_number(&self, prefix: &str) -> AppResult<String> {
        let counter_id = format!("invoice:{}", prefix);

        let seeded = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM counters WHERE id = $1)",
        )
        .bind(&counter_id)
        .fetch_one(&self.db)
        .await?;

        if !seeded {
            let latest = sqlx::query_scalar::<_, Option<String>>(
                r#"
                SELECT MAX(number)
                FROM sales_invoices
                WHERE number LIKE $1 || '%'
                "#,
            )
            .bind(prefix)
            .fetch_one(&self.db)
            .await?;

            let seed = latest
                .as_deref()
                .and_then(|number| parse_document_suffix(number, prefix))
                .unwrap_or(0);

            sqlx::query("INSERT INTO counters (id, seq) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING")
                .bind(&counter_id)
                .bind(seed)
                .execute(&self.db)
                .await?;
        }

        let seq = self.bump(&counter_id).await?;
        Ok(format_document_number(prefix, seq, INVOICE_SUFFIX_WIDTH))
    }

    /// Atomically increment a counter row, creating it at 1 when missing
    async fn bump(&self, counter_id: &str) -> AppResult<i64> {
        let seq = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO counters (id, seq)
            VALUES ($1, 1)
            ON CONFLICT (id) DO UPDATE SET seq = counters.seq + 1
            RETURNING seq
            "#,
        )
        .bind(counter_id)
        .fetch_one(&self.db)
        .await?;

        Ok(seq)
    }
}
