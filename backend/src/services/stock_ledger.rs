//! Stock ledger updater
//!
//! Resolves an item reference (id, SKU or name; standalone or inside a
//! group) and applies a signed quantity delta to its per-warehouse stock
//! counters. Callers processing batches treat a per-line failure as a
//! logged, skipped line, never as an abort.
//!
//! The whole warehouse-stock array is written back to the owning row, so
//! concurrent adjustments to the same item are last-writer-wins. Accepted
//! gap inherited from the original system.

use serde::Serialize;
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppResult;
use shared::models::{
    adjust_warehouse_stock, resolve_variant_index, ItemSnapshot, ItemVariant, WarehouseStock,
};

/// Stock ledger service
#[derive(Clone)]
pub struct StockLedgerService {
    db: PgPool,
}

/// Outcome of a single stock adjustment
#[derive(Debug, Clone, Serialize)]
pub struct StockAdjustOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StockAdjustOutcome {
    pub fn applied(item_name: String) -> Self {
        Self {
            success: true,
            item_name: Some(item_name),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            item_name: None,
            error: Some(error.into()),
        }
    }
}

/// Standalone item row carrying its stock list
#[derive(Debug, FromRow)]
struct ItemStockRow {
    id: Uuid,
    sku: String,
    name: String,
    warehouse_stocks: Json<Vec<WarehouseStock>>,
}

/// Item group row carrying its embedded variants
#[derive(Debug, FromRow)]
struct GroupRow {
    id: Uuid,
    variants: Json<Vec<ItemVariant>>,
}

/// Where a resolved item's stock list lives: a standalone item row or a
/// variant embedded in a group row. The updater operates on either without
/// branching at the call sites.
enum StockHolder {
    Item(ItemStockRow),
    GroupVariant {
        group_id: Uuid,
        variants: Vec<ItemVariant>,
        index: usize,
    },
}

impl StockHolder {
    fn item_name(&self) -> &str {
        match self {
            StockHolder::Item(row) => &row.name,
            StockHolder::GroupVariant {
                variants, index, ..
            } => &variants[*index].name,
        }
    }

    fn snapshot(&self, item_group_id: Option<Uuid>) -> ItemSnapshot {
        match self {
            StockHolder::Item(row) => ItemSnapshot {
                item_id: Some(row.id),
                item_group_id: None,
                sku: row.sku.clone(),
                name: row.name.clone(),
                size: None,
                color: None,
            },
            StockHolder::GroupVariant {
                variants, index, ..
            } => {
                let variant = &variants[*index];
                ItemSnapshot {
                    item_id: Some(variant.id),
                    item_group_id,
                    sku: variant.sku.clone(),
                    name: variant.name.clone(),
                    size: variant.size.clone(),
                    color: variant.color.clone(),
                }
            }
        }
    }
}

impl StockLedgerService {
    /// Create a new StockLedgerService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Apply a signed quantity delta to an item's counters at a warehouse.
    ///
    /// Resolution order: standalone item by id, then SKU, then name; when
    /// unresolved and a group id is supplied, the same order against that
    /// group's variants. An unresolved reference reports failure rather
    /// than erroring, and an unknown warehouse name creates a fresh stock
    /// record seeded with the delta.
    pub async fn adjust_stock(
        &self,
        item_ref: &str,
        delta: i64,
        warehouse: &str,
        item_group_id: Option<Uuid>,
    ) -> AppResult<StockAdjustOutcome> {
        let holder = match self.resolve(item_ref, item_group_id).await? {
            Some(holder) => holder,
            None => {
                tracing::warn!(item_ref, ?item_group_id, "stock adjust: item not found");
                return Ok(StockAdjustOutcome::failed("Item not found"));
            }
        };

        let item_name = holder.item_name().to_string();

        match holder {
            StockHolder::Item(row) => {
                let mut stocks = row.warehouse_stocks.0;
                adjust_warehouse_stock(&mut stocks, warehouse, delta);

                sqlx::query("UPDATE items SET warehouse_stocks = $1, updated_at = now() WHERE id = $2")
                    .bind(Json(&stocks))
                    .bind(row.id)
                    .execute(&self.db)
                    .await?;
            }
            StockHolder::GroupVariant {
                group_id,
                mut variants,
                index,
            } => {
                adjust_warehouse_stock(&mut variants[index].warehouse_stocks, warehouse, delta);

                sqlx::query("UPDATE item_groups SET variants = $1, updated_at = now() WHERE id = $2")
                    .bind(Json(&variants))
                    .bind(group_id)
                    .execute(&self.db)
                    .await?;
            }
        }

        tracing::debug!(item = %item_name, delta, warehouse, "stock adjusted");
        Ok(StockAdjustOutcome::applied(item_name))
    }

    /// Resolve an item reference to a typed snapshot without touching stock
    pub async fn lookup_snapshot(
        &self,
        item_ref: &str,
        item_group_id: Option<Uuid>,
    ) -> AppResult<Option<ItemSnapshot>> {
        Ok(self
            .resolve(item_ref, item_group_id)
            .await?
            .map(|holder| holder.snapshot(item_group_id)))
    }

    async fn resolve(
        &self,
        item_ref: &str,
        item_group_id: Option<Uuid>,
    ) -> AppResult<Option<StockHolder>> {
        if let Ok(id) = Uuid::parse_str(item_ref) {
            let row = sqlx::query_as::<_, ItemStockRow>(
                "SELECT id, sku, name, warehouse_stocks FROM items WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

            if let Some(row) = row {
                return Ok(Some(StockHolder::Item(row)));
            }
        }

        let row = sqlx::query_as::<_, ItemStockRow>(
            "SELECT id, sku, name, warehouse_stocks FROM items WHERE sku = $1",
        )
        .bind(item_ref)
        .fetch_optional(&self.db)
        .await?;

        if let Some(row) = row {
            return Ok(Some(StockHolder::Item(row)));
        }

        let row = sqlx::query_as::<_, ItemStockRow>(
            "SELECT id, sku, name, warehouse_stocks FROM items WHERE name = $1",
        )
        .bind(item_ref)
        .fetch_optional(&self.db)
        .await?;

        if let Some(row) = row {
            return Ok(Some(StockHolder::Item(row)));
        }

        // Standalone lookup failed; repeat the resolution inside the
        // supplied group, if any.
        if let Some(group_id) = item_group_id {
            let group = sqlx::query_as::<_, GroupRow>(
                "SELECT id, variants FROM item_groups WHERE id = $1",
            )
            .bind(group_id)
            .fetch_optional(&self.db)
            .await?;

            if let Some(group) = group {
                let variants = group.variants.0;
                if let Some(index) = resolve_variant_index(&variants, item_ref) {
                    return Ok(Some(StockHolder::GroupVariant {
                        group_id: group.id,
                        variants,
                        index,
                    }));
                }
            }
        }

        Ok(None)
    }
}
