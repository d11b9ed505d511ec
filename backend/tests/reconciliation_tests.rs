//! Cash/bank reconciliation tests
//!
//! Tests for end-of-day closing calculation including:
//! - Cash and bank buckets sum per day, with UPI folding into bank
//! - String-encoded amounts parse as their leading integer prefix
//! - Match requires exact integer equality against the counted cash

use proptest::prelude::*;

use shared::models::{closing_status, parse_amount, sum_day_totals, CloseStatus};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// A day's cash bucket is the sum of cash amounts
    #[test]
    fn test_cash_bucket_sums() {
        let rows = vec![("500", "0", "0"), ("250", "0", "0"), ("0", "100", "0")];
        let totals = sum_day_totals(rows);

        assert_eq!(totals.calculated_cash, 750);
        assert_eq!(totals.calculated_bank, 100);
    }

    /// UPI amounts count towards the bank bucket
    #[test]
    fn test_upi_folds_into_bank() {
        let rows = vec![("0", "200", "150"), ("0", "0", "50")];
        let totals = sum_day_totals(rows);

        assert_eq!(totals.calculated_cash, 0);
        assert_eq!(totals.calculated_bank, 400);
    }

    /// Refunds entered as negative amounts reduce the bucket
    #[test]
    fn test_negative_amounts_subtract() {
        let rows = vec![("500", "0", "0"), ("-120", "0", "0")];
        let totals = sum_day_totals(rows);

        assert_eq!(totals.calculated_cash, 380);
    }

    /// Unparseable amounts contribute zero instead of failing the day
    #[test]
    fn test_garbage_amounts_count_as_zero() {
        let rows = vec![("abc", "n/a", ""), ("100", "", "")];
        let totals = sum_day_totals(rows);

        assert_eq!(totals.calculated_cash, 100);
        assert_eq!(totals.calculated_bank, 0);
    }

    /// Decimal-looking entries truncate to their integer prefix
    #[test]
    fn test_decimal_entry_truncates() {
        assert_eq!(parse_amount("129.99"), 129);

        let rows = vec![("129.99", "0", "0")];
        assert_eq!(sum_day_totals(rows).calculated_cash, 129);
    }

    /// Counted cash must match the calculated total exactly
    #[test]
    fn test_closing_exact_match() {
        assert_eq!(closing_status(750, "750"), CloseStatus::Match);
        assert_eq!(closing_status(750, "749"), CloseStatus::Mismatch);
        assert_eq!(closing_status(750, "751"), CloseStatus::Mismatch);
    }

    /// Decimal counted values compare by their integer prefix
    #[test]
    fn test_decimal_close_compares_integer_prefix() {
        // "129.99" parses as 129, so it matches a calculated 129
        assert_eq!(closing_status(129, "129.99"), CloseStatus::Match);
        // and mismatches the rounded-up 130
        assert_eq!(closing_status(130, "129.99"), CloseStatus::Mismatch);
    }

    /// A counted value with no leading digits never matches, even on a
    /// day whose calculated cash is zero
    #[test]
    fn test_unparsable_close_mismatches_zero_day() {
        assert_eq!(closing_status(0, "abc"), CloseStatus::Mismatch);
        assert_eq!(closing_status(0, "n/a"), CloseStatus::Mismatch);
        assert_eq!(closing_status(0, ""), CloseStatus::Mismatch);
        // A genuine zero still reconciles
        assert_eq!(closing_status(0, "0"), CloseStatus::Match);
    }

    /// An empty day reconciles to zero totals
    #[test]
    fn test_empty_day_is_zero() {
        let totals = sum_day_totals(Vec::new());
        assert_eq!(totals.calculated_cash, 0);
        assert_eq!(totals.calculated_bank, 0);
        assert_eq!(closing_status(totals.calculated_cash, "0"), CloseStatus::Match);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn amount_strategy() -> impl Strategy<Value = i64> {
        -10_000i64..10_000
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Summing integer-encoded rows equals the integer sums
        #[test]
        fn prop_day_totals_equal_integer_sums(
            rows in prop::collection::vec(
                (amount_strategy(), amount_strategy(), amount_strategy()),
                0..30
            )
        ) {
            let encoded: Vec<(String, String, String)> = rows
                .iter()
                .map(|(c, b, u)| (c.to_string(), b.to_string(), u.to_string()))
                .collect();

            let totals = sum_day_totals(
                encoded.iter().map(|(c, b, u)| (c.as_str(), b.as_str(), u.as_str())),
            );

            let cash: i64 = rows.iter().map(|(c, _, _)| c).sum();
            let bank: i64 = rows.iter().map(|(_, b, u)| b + u).sum();

            prop_assert_eq!(totals.calculated_cash, cash);
            prop_assert_eq!(totals.calculated_bank, bank);
        }

        /// A closing saved from the calculated total always matches
        #[test]
        fn prop_self_close_always_matches(total in amount_strategy()) {
            prop_assert_eq!(
                closing_status(total, &total.to_string()),
                CloseStatus::Match
            );
        }

        /// A non-numeric counted value mismatches every possible total
        #[test]
        fn prop_unparsable_close_never_matches(total in amount_strategy()) {
            prop_assert_eq!(closing_status(total, "n/a"), CloseStatus::Mismatch);
        }

        /// Any off-by-n counted value mismatches
        #[test]
        fn prop_offset_close_mismatches(
            total in amount_strategy(),
            offset in 1i64..1000
        ) {
            prop_assert_eq!(
                closing_status(total, &(total + offset).to_string()),
                CloseStatus::Mismatch
            );
        }

        /// parse_amount agrees with i64 parsing on plain integers
        #[test]
        fn prop_parse_amount_integer_identity(n in any::<i32>()) {
            prop_assert_eq!(parse_amount(&n.to_string()), i64::from(n));
        }

        /// A fractional part never changes the parsed integer prefix
        #[test]
        fn prop_parse_amount_ignores_fraction(n in 0i64..1_000_000, frac in 0u32..100) {
            let encoded = format!("{}.{:02}", n, frac);
            prop_assert_eq!(parse_amount(&encoded), n);
        }
    }
}
