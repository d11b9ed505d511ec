//! Items, item groups and per-warehouse stock counters
//!
//! Warehouse names are free text with no canonical registry; matching is
//! case-insensitive and whitespace-trimmed everywhere stock is touched.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named bucket of quantity counters attached to an item.
///
/// `available_for_sale` is stored redundantly alongside `stock_on_hand`
/// and `committed_stock` and moves in lockstep with on-hand on every
/// adjustment. The physical-count mirrors track the same counters as seen
/// during physical stock takes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WarehouseStock {
    pub warehouse: String,
    pub opening_stock: i64,
    pub opening_stock_value: Decimal,
    pub stock_on_hand: i64,
    pub committed_stock: i64,
    pub available_for_sale: i64,
    pub physical_opening_stock: i64,
    pub physical_stock_on_hand: i64,
    pub physical_committed_stock: i64,
    pub physical_available_for_sale: i64,
}

impl Default for WarehouseStock {
    fn default() -> Self {
        Self {
            warehouse: String::new(),
            opening_stock: 0,
            opening_stock_value: Decimal::ZERO,
            stock_on_hand: 0,
            committed_stock: 0,
            available_for_sale: 0,
            physical_opening_stock: 0,
            physical_stock_on_hand: 0,
            physical_committed_stock: 0,
            physical_available_for_sale: 0,
        }
    }
}

impl WarehouseStock {
    /// Create an empty stock record for a warehouse
    pub fn new(warehouse: impl Into<String>) -> Self {
        Self {
            warehouse: warehouse.into(),
            ..Self::default()
        }
    }

    /// Create a record seeded with a first-stock delta (clamped at zero)
    pub fn seeded(warehouse: impl Into<String>, delta: i64) -> Self {
        let mut stock = Self::new(warehouse);
        stock.apply_delta(delta);
        stock
    }

    /// Case-insensitive, whitespace-trimmed warehouse name match
    pub fn matches_warehouse(&self, name: &str) -> bool {
        normalize_warehouse_name(&self.warehouse) == normalize_warehouse_name(name)
    }

    /// Move on-hand, available-for-sale and their physical mirrors by
    /// `delta`, clamping each counter at zero; extreme deltas saturate
    /// instead of overflowing. Committed stock is never touched here.
    pub fn apply_delta(&mut self, delta: i64) {
        self.stock_on_hand = self.stock_on_hand.saturating_add(delta).max(0);
        self.available_for_sale = self.available_for_sale.saturating_add(delta).max(0);
        self.physical_stock_on_hand = self.physical_stock_on_hand.saturating_add(delta).max(0);
        self.physical_available_for_sale =
            self.physical_available_for_sale.saturating_add(delta).max(0);
    }
}

/// Canonical form used for warehouse-name comparison
pub fn normalize_warehouse_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Apply a signed delta to the matching warehouse record in a stock list,
/// creating the record when the warehouse has never held this item.
/// A missing warehouse is an implicit "first stock" event, not an error.
pub fn adjust_warehouse_stock(stocks: &mut Vec<WarehouseStock>, warehouse: &str, delta: i64) {
    match stocks.iter_mut().find(|s| s.matches_warehouse(warehouse)) {
        Some(stock) => stock.apply_delta(delta),
        None => stocks.push(WarehouseStock::seeded(warehouse.trim(), delta)),
    }
}

/// A standalone item with its own stock list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub category: Option<String>,
    pub warehouse_stocks: Vec<WarehouseStock>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A variant embedded in an item group, carrying its own stock list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemVariant {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub size: Option<String>,
    pub color: Option<String>,
    #[serde(default)]
    pub warehouse_stocks: Vec<WarehouseStock>,
}

impl ItemVariant {
    /// Check whether this variant answers to an item reference, which may
    /// be its id, its SKU or its name.
    pub fn matches_ref(&self, item_ref: &str, parsed_id: Option<Uuid>) -> bool {
        if let Some(id) = parsed_id {
            if self.id == id {
                return true;
            }
        }
        self.sku == item_ref || self.name == item_ref
    }
}

/// A named collection of item variants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemGroup {
    pub id: Uuid,
    pub name: String,
    pub variants: Vec<ItemVariant>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ItemGroup {
    /// Resolve a variant by id, then SKU, then name — the same resolution
    /// order used for standalone items.
    pub fn resolve_variant_mut(&mut self, item_ref: &str) -> Option<&mut ItemVariant> {
        let idx = resolve_variant_index(&self.variants, item_ref)?;
        self.variants.get_mut(idx)
    }
}

/// Find the index of the variant answering to `item_ref`, trying id first,
/// then SKU, then name.
pub fn resolve_variant_index(variants: &[ItemVariant], item_ref: &str) -> Option<usize> {
    if let Ok(id) = Uuid::parse_str(item_ref) {
        if let Some(idx) = variants.iter().position(|v| v.id == id) {
            return Some(idx);
        }
    }
    variants
        .iter()
        .position(|v| v.sku == item_ref)
        .or_else(|| variants.iter().position(|v| v.name == item_ref))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_delta_increments_all_mirrors() {
        let mut stock = WarehouseStock::new("Main");
        stock.apply_delta(5);
        assert_eq!(stock.stock_on_hand, 5);
        assert_eq!(stock.available_for_sale, 5);
        assert_eq!(stock.physical_stock_on_hand, 5);
        assert_eq!(stock.physical_available_for_sale, 5);
    }

    #[test]
    fn test_apply_delta_clamps_at_zero() {
        let mut stock = WarehouseStock::new("Main");
        stock.apply_delta(3);
        stock.apply_delta(-10);
        assert_eq!(stock.stock_on_hand, 0);
        assert_eq!(stock.available_for_sale, 0);
    }

    #[test]
    fn test_committed_stock_untouched() {
        let mut stock = WarehouseStock::new("Main");
        stock.committed_stock = 4;
        stock.physical_committed_stock = 4;
        stock.apply_delta(7);
        assert_eq!(stock.committed_stock, 4);
        assert_eq!(stock.physical_committed_stock, 4);
    }

    #[test]
    fn test_extreme_deltas_saturate() {
        let mut stock = WarehouseStock::new("Main");
        stock.apply_delta(i64::MAX);
        stock.apply_delta(i64::MAX);
        assert_eq!(stock.stock_on_hand, i64::MAX);

        stock.apply_delta(i64::MIN);
        assert_eq!(stock.stock_on_hand, 0);
        assert_eq!(stock.available_for_sale, 0);
    }

    #[test]
    fn test_warehouse_match_case_and_whitespace_insensitive() {
        let stock = WarehouseStock::new("Central Warehouse");
        assert!(stock.matches_warehouse("central warehouse"));
        assert!(stock.matches_warehouse("  CENTRAL WAREHOUSE  "));
        assert!(!stock.matches_warehouse("Central"));
    }

    #[test]
    fn test_adjust_creates_record_for_unknown_warehouse() {
        let mut stocks = vec![WarehouseStock::new("Main")];
        adjust_warehouse_stock(&mut stocks, "Outlet", 6);
        assert_eq!(stocks.len(), 2);
        assert_eq!(stocks[1].warehouse, "Outlet");
        assert_eq!(stocks[1].stock_on_hand, 6);
    }

    #[test]
    fn test_adjust_accumulates_into_same_record() {
        let mut stocks = Vec::new();
        adjust_warehouse_stock(&mut stocks, "warehouse", 5);
        adjust_warehouse_stock(&mut stocks, " Warehouse ", 5);
        assert_eq!(stocks.len(), 1);
        assert_eq!(stocks[0].stock_on_hand, 10);
    }

    #[test]
    fn test_negative_seed_clamped() {
        let mut stocks = Vec::new();
        adjust_warehouse_stock(&mut stocks, "Main", -5);
        assert_eq!(stocks.len(), 1);
        assert_eq!(stocks[0].stock_on_hand, 0);
    }

    #[test]
    fn test_resolve_variant_by_id_sku_name() {
        let variant_id = Uuid::new_v4();
        let mut group = ItemGroup {
            id: Uuid::new_v4(),
            name: "Runner".to_string(),
            variants: vec![ItemVariant {
                id: variant_id,
                sku: "RUN-42-BLK".to_string(),
                name: "Runner 42 Black".to_string(),
                size: Some("42".to_string()),
                color: Some("Black".to_string()),
                warehouse_stocks: Vec::new(),
            }],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(group.resolve_variant_mut(&variant_id.to_string()).is_some());
        assert!(group.resolve_variant_mut("RUN-42-BLK").is_some());
        assert!(group.resolve_variant_mut("Runner 42 Black").is_some());
        assert!(group.resolve_variant_mut("RUN-43-BLK").is_none());
    }
}
