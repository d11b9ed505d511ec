//! Invoicing tests
//!
//! Tests for invoice arithmetic and line snapshots including:
//! - Line totals are quantity times unit price
//! - The invoice total is the exact sum of line totals
//! - Snapshots freeze item identity at sale time

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::{invoice_total, InvoiceLine, ItemSnapshot};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn snapshot(sku: &str, name: &str) -> ItemSnapshot {
    ItemSnapshot {
        item_id: None,
        item_group_id: None,
        sku: sku.to_string(),
        name: name.to_string(),
        size: None,
        color: None,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_line_total_is_quantity_times_price() {
        let line = InvoiceLine::new(snapshot("RUN-42-BLK", "Runner 42 Black"), 3, dec("1499.00"));
        assert_eq!(line.line_total, dec("4497.00"));
    }

    #[test]
    fn test_invoice_total_sums_lines() {
        let lines = vec![
            InvoiceLine::new(snapshot("RUN-42-BLK", "Runner 42 Black"), 2, dec("1499.00")),
            InvoiceLine::new(snapshot("SNK-40-WHT", "Sneaker 40 White"), 1, dec("999.50")),
        ];

        assert_eq!(invoice_total(&lines), dec("3997.50"));
    }

    #[test]
    fn test_empty_invoice_totals_zero() {
        assert_eq!(invoice_total(&[]), Decimal::ZERO);
    }

    /// The line keeps the snapshot it was created with
    #[test]
    fn test_line_snapshot_is_frozen() {
        let line = InvoiceLine::new(snapshot("RUN-42-BLK", "Runner 42 Black"), 1, dec("100"));
        assert_eq!(line.item.sku, "RUN-42-BLK");
        assert_eq!(line.item.name, "Runner 42 Black");
        assert!(line.item.item_id.is_none());
    }

    /// Fractional unit prices carry exact decimal arithmetic
    #[test]
    fn test_no_floating_point_drift() {
        let lines: Vec<InvoiceLine> = (0..10)
            .map(|_| InvoiceLine::new(snapshot("S", "S"), 1, dec("0.10")))
            .collect();

        assert_eq!(invoice_total(&lines), dec("1.00"));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn price_strategy() -> impl Strategy<Value = Decimal> {
        // Prices in the 0.01..10000.00 range with two decimal places
        (1i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The invoice total equals the sum of quantity * unit_price
        #[test]
        fn prop_total_is_sum_of_products(
            lines in prop::collection::vec((1i64..100, price_strategy()), 1..15)
        ) {
            let built: Vec<InvoiceLine> = lines
                .iter()
                .map(|(qty, price)| InvoiceLine::new(snapshot("S", "S"), *qty, *price))
                .collect();

            let expected: Decimal = lines
                .iter()
                .map(|(qty, price)| *price * Decimal::from(*qty))
                .sum();

            prop_assert_eq!(invoice_total(&built), expected);
        }

        /// Adding a line increases the total by exactly that line's total
        #[test]
        fn prop_total_is_additive(
            lines in prop::collection::vec((1i64..100, price_strategy()), 1..10),
            extra_qty in 1i64..100,
            extra_price in price_strategy()
        ) {
            let mut built: Vec<InvoiceLine> = lines
                .iter()
                .map(|(qty, price)| InvoiceLine::new(snapshot("S", "S"), *qty, *price))
                .collect();
            let before = invoice_total(&built);

            let extra = InvoiceLine::new(snapshot("X", "X"), extra_qty, extra_price);
            let extra_total = extra.line_total;
            built.push(extra);

            prop_assert_eq!(invoice_total(&built), before + extra_total);
        }
    }
}
