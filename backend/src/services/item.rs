//! Item and item-group management
//!
//! An item lives either standalone or as a variant inside exactly one
//! group. Moving between the two representations deletes one copy and
//! inserts the other; the stock list travels with the move.

use chrono::Utc;
use serde::Deserialize;
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use crate::error::{map_db_error, AppError, AppResult};
use rust_decimal::Decimal;
use shared::models::{Item, ItemGroup, ItemVariant, WarehouseStock};
use shared::validation::{validate_sku, validate_warehouse_name};

/// Item service
#[derive(Clone)]
pub struct ItemService {
    db: PgPool,
}

/// Opening stock for one warehouse when creating an item
#[derive(Debug, Deserialize)]
pub struct OpeningStockInput {
    pub warehouse: String,
    pub quantity: i64,
    pub value: Option<Decimal>,
}

/// Input for creating a standalone item
#[derive(Debug, Deserialize)]
pub struct CreateItemInput {
    pub sku: String,
    pub name: String,
    pub category: Option<String>,
    #[serde(default)]
    pub opening_stocks: Vec<OpeningStockInput>,
}

/// Input for updating an item's descriptive fields
#[derive(Debug, Deserialize)]
pub struct UpdateItemInput {
    pub name: Option<String>,
    pub category: Option<String>,
}

/// Input for creating an item group
#[derive(Debug, Deserialize)]
pub struct CreateGroupInput {
    pub name: String,
}

/// Input for adding a variant to a group
#[derive(Debug, Deserialize)]
pub struct AddVariantInput {
    pub sku: String,
    pub name: String,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Row for item queries
#[derive(Debug, FromRow)]
struct ItemRow {
    id: Uuid,
    sku: String,
    name: String,
    category: Option<String>,
    warehouse_stocks: Json<Vec<WarehouseStock>>,
    created_at: chrono::DateTime<Utc>,
    updated_at: chrono::DateTime<Utc>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: row.id,
            sku: row.sku,
            name: row.name,
            category: row.category,
            warehouse_stocks: row.warehouse_stocks.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Row for group queries
#[derive(Debug, FromRow)]
struct GroupRow {
    id: Uuid,
    name: String,
    variants: Json<Vec<ItemVariant>>,
    created_at: chrono::DateTime<Utc>,
    updated_at: chrono::DateTime<Utc>,
}

impl From<GroupRow> for ItemGroup {
    fn from(row: GroupRow) -> Self {
        ItemGroup {
            id: row.id,
            name: row.name,
            variants: row.variants.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const ITEM_COLUMNS: &str = "id, sku, name, category, warehouse_stocks, created_at, updated_at";
const GROUP_COLUMNS: &str = "id, name, variants, created_at, updated_at";

impl ItemService {
    /// Create a new ItemService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a standalone item, optionally with opening stock per
    /// warehouse (opening quantity also seeds on-hand and available).
    pub async fn create_item(&self, input: CreateItemInput) -> AppResult<Item> {
        if let Err(msg) = validate_sku(&input.sku) {
            return Err(AppError::Validation {
                field: "sku".to_string(),
                message: msg.to_string(),
            });
        }
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Item name must not be empty".to_string(),
            });
        }

        let mut stocks = Vec::with_capacity(input.opening_stocks.len());
        for opening in &input.opening_stocks {
            if let Err(msg) = validate_warehouse_name(&opening.warehouse) {
                return Err(AppError::Validation {
                    field: "opening_stocks".to_string(),
                    message: msg.to_string(),
                });
            }
            let mut stock = WarehouseStock::new(opening.warehouse.trim());
            stock.opening_stock = opening.quantity.max(0);
            stock.opening_stock_value = opening.value.unwrap_or(Decimal::ZERO);
            stock.physical_opening_stock = stock.opening_stock;
            stock.apply_delta(stock.opening_stock);
            stocks.push(stock);
        }

        let row = sqlx::query_as::<_, ItemRow>(&format!(
            r#"
            INSERT INTO items (sku, name, category, warehouse_stocks)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(input.sku.trim())
        .bind(input.name.trim())
        .bind(&input.category)
        .bind(Json(&stocks))
        .fetch_one(&self.db)
        .await
        .map_err(|e| map_db_error(e, "sku"))?;

        Ok(row.into())
    }

    /// Get an item by id
    pub async fn get_item(&self, id: Uuid) -> AppResult<Item> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {} FROM items WHERE id = $1",
            ITEM_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Item".to_string()))?;

        Ok(row.into())
    }

    /// List items, newest first
    pub async fn list_items(&self) -> AppResult<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {} FROM items ORDER BY created_at DESC",
            ITEM_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Update descriptive fields of an item
    pub async fn update_item(&self, id: Uuid, input: UpdateItemInput) -> AppResult<Item> {
        let existing = self.get_item(id).await?;
        let name = input.name.unwrap_or(existing.name);
        let category = input.category.or(existing.category);

        let row = sqlx::query_as::<_, ItemRow>(&format!(
            r#"
            UPDATE items SET name = $1, category = $2, updated_at = now()
            WHERE id = $3
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(name.trim())
        .bind(&category)
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Administrative delete of a standalone item
    pub async fn delete_item(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Item".to_string()));
        }

        Ok(())
    }

    /// Create an empty item group
    pub async fn create_group(&self, input: CreateGroupInput) -> AppResult<ItemGroup> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Group name must not be empty".to_string(),
            });
        }

        let row = sqlx::query_as::<_, GroupRow>(&format!(
            r#"
            INSERT INTO item_groups (name, variants)
            VALUES ($1, '[]'::jsonb)
            RETURNING {}
            "#,
            GROUP_COLUMNS
        ))
        .bind(input.name.trim())
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Get a group by id
    pub async fn get_group(&self, id: Uuid) -> AppResult<ItemGroup> {
        let row = sqlx::query_as::<_, GroupRow>(&format!(
            "SELECT {} FROM item_groups WHERE id = $1",
            GROUP_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Item group".to_string()))?;

        Ok(row.into())
    }

    /// List groups, newest first
    pub async fn list_groups(&self) -> AppResult<Vec<ItemGroup>> {
        let rows = sqlx::query_as::<_, GroupRow>(&format!(
            "SELECT {} FROM item_groups ORDER BY created_at DESC",
            GROUP_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Add a fresh variant to a group
    pub async fn add_variant(&self, group_id: Uuid, input: AddVariantInput) -> AppResult<ItemGroup> {
        if let Err(msg) = validate_sku(&input.sku) {
            return Err(AppError::Validation {
                field: "sku".to_string(),
                message: msg.to_string(),
            });
        }

        let mut group = self.get_group(group_id).await?;
        if group.variants.iter().any(|v| v.sku == input.sku) {
            return Err(AppError::DuplicateEntry("variant sku".to_string()));
        }

        group.variants.push(ItemVariant {
            id: Uuid::new_v4(),
            sku: input.sku.trim().to_string(),
            name: input.name.trim().to_string(),
            size: input.size,
            color: input.color,
            warehouse_stocks: Vec::new(),
        });

        self.persist_variants(group_id, &group.variants).await?;
        self.get_group(group_id).await
    }

    /// Move a standalone item into a group. The item row is deleted and
    /// its stock list travels into the new variant, which keeps the
    /// item's id.
    pub async fn move_item_to_group(&self, item_id: Uuid, group_id: Uuid) -> AppResult<ItemGroup> {
        let item = self.get_item(item_id).await?;
        let mut group = self.get_group(group_id).await?;

        if group.variants.iter().any(|v| v.sku == item.sku) {
            return Err(AppError::DuplicateEntry("variant sku".to_string()));
        }

        group.variants.push(ItemVariant {
            id: item.id,
            sku: item.sku,
            name: item.name,
            size: None,
            color: None,
            warehouse_stocks: item.warehouse_stocks,
        });

        self.persist_variants(group_id, &group.variants).await?;

        sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(item_id)
            .execute(&self.db)
            .await?;

        self.get_group(group_id).await
    }

    /// Extract a variant back into a standalone item. The variant is
    /// removed from the group and inserted as an item row keeping its id
    /// and stock list.
    pub async fn extract_variant(&self, group_id: Uuid, variant_id: Uuid) -> AppResult<Item> {
        let mut group = self.get_group(group_id).await?;

        let index = group
            .variants
            .iter()
            .position(|v| v.id == variant_id)
            .ok_or_else(|| AppError::NotFound("Variant".to_string()))?;
        let variant = group.variants.remove(index);

        let row = sqlx::query_as::<_, ItemRow>(&format!(
            r#"
            INSERT INTO items (id, sku, name, category, warehouse_stocks)
            VALUES ($1, $2, $3, NULL, $4)
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(variant.id)
        .bind(&variant.sku)
        .bind(&variant.name)
        .bind(Json(&variant.warehouse_stocks))
        .fetch_one(&self.db)
        .await
        .map_err(|e| map_db_error(e, "sku"))?;

        self.persist_variants(group_id, &group.variants).await?;

        Ok(row.into())
    }

    /// Delete an empty item group
    pub async fn delete_group(&self, id: Uuid) -> AppResult<()> {
        let group = self.get_group(id).await?;
        if !group.variants.is_empty() {
            return Err(AppError::InvalidStateTransition(
                "Group still has variants".to_string(),
            ));
        }

        sqlx::query("DELETE FROM item_groups WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    async fn persist_variants(&self, group_id: Uuid, variants: &[ItemVariant]) -> AppResult<()> {
        sqlx::query("UPDATE item_groups SET variants = $1, updated_at = now() WHERE id = $2")
            .bind(Json(variants))
            .bind(group_id)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}
