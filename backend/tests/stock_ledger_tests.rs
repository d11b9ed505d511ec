//! Stock ledger tests
//!
//! Tests for per-warehouse stock bookkeeping including:
//! - Counters never go below zero, regardless of delta sequence
//! - Warehouse matching is case-insensitive and whitespace-trimmed
//! - Unknown warehouses are seeded, never erroring
//! - Item references resolve by id, then SKU, then name

use proptest::prelude::*;

use shared::models::{
    adjust_warehouse_stock, normalize_warehouse_name, resolve_variant_index, ItemVariant,
    WarehouseStock,
};
use uuid::Uuid;

fn variant(id: Uuid, sku: &str, name: &str) -> ItemVariant {
    ItemVariant {
        id,
        sku: sku.to_string(),
        name: name.to_string(),
        size: None,
        color: None,
        warehouse_stocks: Vec::new(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Stock moves on-hand and available-for-sale together
    #[test]
    fn test_delta_moves_paired_counters() {
        let mut stocks = Vec::new();
        adjust_warehouse_stock(&mut stocks, "Main", 12);
        adjust_warehouse_stock(&mut stocks, "Main", -4);

        assert_eq!(stocks.len(), 1);
        assert_eq!(stocks[0].stock_on_hand, 8);
        assert_eq!(stocks[0].available_for_sale, 8);
        assert_eq!(stocks[0].physical_stock_on_hand, 8);
        assert_eq!(stocks[0].physical_available_for_sale, 8);
    }

    /// An oversell clamps at zero instead of going negative
    #[test]
    fn test_oversell_clamps_at_zero() {
        let mut stocks = Vec::new();
        adjust_warehouse_stock(&mut stocks, "Main", 3);
        adjust_warehouse_stock(&mut stocks, "Main", -10);

        assert_eq!(stocks[0].stock_on_hand, 0);
        assert_eq!(stocks[0].available_for_sale, 0);
    }

    /// Committed stock is independent of on-hand adjustments
    #[test]
    fn test_committed_stock_not_moved() {
        let mut stock = WarehouseStock::new("Main");
        stock.committed_stock = 5;
        stock.apply_delta(10);
        stock.apply_delta(-3);

        assert_eq!(stock.committed_stock, 5);
        assert_eq!(stock.stock_on_hand, 7);
    }

    /// "Main", "main" and " MAIN " are the same warehouse
    #[test]
    fn test_warehouse_name_variants_share_a_record() {
        let mut stocks = Vec::new();
        adjust_warehouse_stock(&mut stocks, "Main", 4);
        adjust_warehouse_stock(&mut stocks, "main", 4);
        adjust_warehouse_stock(&mut stocks, " MAIN ", 2);

        assert_eq!(stocks.len(), 1);
        assert_eq!(stocks[0].stock_on_hand, 10);
    }

    /// First stock at a new warehouse creates the record
    #[test]
    fn test_unknown_warehouse_is_seeded() {
        let mut stocks = vec![WarehouseStock::new("Main")];
        adjust_warehouse_stock(&mut stocks, "Outlet 2", 9);

        assert_eq!(stocks.len(), 2);
        assert_eq!(stocks[1].warehouse, "Outlet 2");
        assert_eq!(stocks[1].stock_on_hand, 9);
        assert_eq!(stocks[0].stock_on_hand, 0);
    }

    /// A negative first delta seeds an empty record, not a negative one
    #[test]
    fn test_negative_seed_clamps() {
        let mut stocks = Vec::new();
        adjust_warehouse_stock(&mut stocks, "Outlet", -7);

        assert_eq!(stocks.len(), 1);
        assert_eq!(stocks[0].stock_on_hand, 0);
    }

    /// Resolution prefers id over SKU over name
    #[test]
    fn test_resolution_order_id_sku_name() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        // Second variant's SKU collides with the first variant's id string
        let variants = vec![
            variant(a, "SNK-001", "Sneaker Black"),
            variant(b, &a.to_string(), "Sneaker White"),
        ];

        // id wins even though a later SKU matches the same string
        assert_eq!(resolve_variant_index(&variants, &a.to_string()), Some(0));
        assert_eq!(resolve_variant_index(&variants, "SNK-001"), Some(0));
        assert_eq!(resolve_variant_index(&variants, "Sneaker White"), Some(1));
        assert_eq!(resolve_variant_index(&variants, "SNK-999"), None);
    }

    /// SKU match beats a name match on a different variant
    #[test]
    fn test_sku_beats_name() {
        let variants = vec![
            variant(Uuid::new_v4(), "Runner", "Sprinter"),
            variant(Uuid::new_v4(), "SPR-01", "Runner"),
        ];

        // "Runner" is variant 0's SKU and variant 1's name
        assert_eq!(resolve_variant_index(&variants, "Runner"), Some(0));
    }

    /// A batch with an unresolvable middle line still lands the other
    /// lines; the bad line reports failure without aborting the loop
    #[test]
    fn test_batch_skips_unresolvable_line() {
        let mut variants = vec![
            variant(Uuid::new_v4(), "RUN-42-BLK", "Runner 42 Black"),
            variant(Uuid::new_v4(), "RUN-43-BLK", "Runner 43 Black"),
        ];

        // Lines post one at a time, resolve-then-apply, exactly as the
        // adjustment/receipt/invoice loops do
        let lines = ["RUN-42-BLK", "RUN-99-XXX", "RUN-43-BLK"];
        let mut outcomes = Vec::with_capacity(lines.len());
        for item_ref in lines {
            match resolve_variant_index(&variants, item_ref) {
                Some(index) => {
                    adjust_warehouse_stock(&mut variants[index].warehouse_stocks, "Main", 5);
                    outcomes.push(true);
                }
                None => outcomes.push(false),
            }
        }

        assert_eq!(outcomes, vec![true, false, true]);
        assert_eq!(variants[0].warehouse_stocks[0].stock_on_hand, 5);
        assert_eq!(variants[1].warehouse_stocks[0].stock_on_hand, 5);
    }

    #[test]
    fn test_normalize_warehouse_name() {
        assert_eq!(normalize_warehouse_name("  Main Store "), "main store");
        assert_eq!(normalize_warehouse_name("MAIN STORE"), "main store");
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn delta_strategy() -> impl Strategy<Value = i64> {
        -500i64..500
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Counters never go negative under any delta sequence
        #[test]
        fn prop_counters_never_negative(
            deltas in prop::collection::vec(delta_strategy(), 1..30)
        ) {
            let mut stocks = Vec::new();
            for delta in deltas {
                adjust_warehouse_stock(&mut stocks, "Main", delta);
            }

            prop_assert_eq!(stocks.len(), 1);
            prop_assert!(stocks[0].stock_on_hand >= 0);
            prop_assert!(stocks[0].available_for_sale >= 0);
            prop_assert!(stocks[0].physical_stock_on_hand >= 0);
            prop_assert!(stocks[0].physical_available_for_sale >= 0);
        }

        /// On-hand and available-for-sale stay in lockstep when both start
        /// from zero
        #[test]
        fn prop_on_hand_tracks_available(
            deltas in prop::collection::vec(delta_strategy(), 1..30)
        ) {
            let mut stocks = Vec::new();
            for delta in deltas {
                adjust_warehouse_stock(&mut stocks, "Main", delta);
            }

            prop_assert_eq!(stocks[0].stock_on_hand, stocks[0].available_for_sale);
            prop_assert_eq!(stocks[0].stock_on_hand, stocks[0].physical_stock_on_hand);
        }

        /// All casings and paddings of one warehouse name land in one record
        #[test]
        fn prop_warehouse_normalization_single_record(
            deltas in prop::collection::vec((0i64..100, 0usize..4), 1..20)
        ) {
            let spellings = ["Central", "central", " CENTRAL ", "CeNtRaL"];
            let mut stocks = Vec::new();
            let mut expected = 0i64;

            for (delta, which) in deltas {
                adjust_warehouse_stock(&mut stocks, spellings[which], delta);
                expected += delta;
            }

            prop_assert_eq!(stocks.len(), 1);
            // All deltas non-negative, so no clamping interferes
            prop_assert_eq!(stocks[0].stock_on_hand, expected);
        }

        /// A delta and its negation cancel exactly when stock covers it,
        /// so reversing an applied adjustment restores the prior counters
        #[test]
        fn prop_reversal_restores_counters(
            start in 0i64..10_000,
            delta in 0i64..10_000
        ) {
            let mut stocks = Vec::new();
            adjust_warehouse_stock(&mut stocks, "Main", start);

            adjust_warehouse_stock(&mut stocks, "Main", delta);
            adjust_warehouse_stock(&mut stocks, "Main", -delta);

            prop_assert_eq!(stocks[0].stock_on_hand, start);
            prop_assert_eq!(stocks[0].available_for_sale, start);
        }

        /// Positive-only sequences sum exactly (no spurious clamping)
        #[test]
        fn prop_positive_deltas_sum_exactly(
            deltas in prop::collection::vec(1i64..200, 1..20)
        ) {
            let mut stocks = Vec::new();
            let total: i64 = deltas.iter().sum();
            for delta in deltas {
                adjust_warehouse_stock(&mut stocks, "Main", delta);
            }

            prop_assert_eq!(stocks[0].stock_on_hand, total);
        }
    }
}
