//! Quotation totals tests
//!
//! Verifies line subtotal arithmetic and the 15% VAT computation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{line_subtotal, quotation_totals, vat_rate};

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

mod totals {
    use super::*;

    #[test]
    fn vat_rate_is_fifteen_percent() {
        assert_eq!(vat_rate(), dec("0.15"));
    }

    #[test]
    fn line_subtotal_is_quantity_times_price() {
        assert_eq!(line_subtotal(3, dec("19.99")), dec("59.97"));
        assert_eq!(line_subtotal(1, dec("0.50")), dec("0.50"));
    }

    #[test]
    fn totals_over_single_line() {
        let totals = quotation_totals(&[(2, dec("100.00"))]);
        assert_eq!(totals.subtotal, dec("200.00"));
        assert_eq!(totals.tax, dec("30.00"));
        assert_eq!(totals.total, dec("230.00"));
    }

    #[test]
    fn totals_over_multiple_lines() {
        let totals = quotation_totals(&[
            (2, dec("10.00")),
            (1, dec("5.50")),
            (4, dec("2.25")),
        ]);
        // 20.00 + 5.50 + 9.00 = 34.50
        assert_eq!(totals.subtotal, dec("34.50"));
        // 34.50 * 0.15 = 5.175, rounded to 5.18
        assert_eq!(totals.tax, dec("5.18"));
        assert_eq!(totals.total, dec("39.68"));
    }

    #[test]
    fn tax_is_rounded_to_two_decimals() {
        let totals = quotation_totals(&[(1, dec("0.10"))]);
        // 0.10 * 0.15 = 0.015, banker's rounding to 0.02
        assert_eq!(totals.tax, dec("0.02"));
    }

    #[test]
    fn empty_quotation_totals_are_zero() {
        let totals = quotation_totals(&[]);
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod property_tests {
    use super::*;

    /// Strategy for generating valid unit prices
    fn price_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=100_000i64).prop_map(|n| Decimal::new(n, 2)) // 0.01 to 1000.00
    }

    fn line_strategy() -> impl Strategy<Value = (i32, Decimal)> {
        (1..100i32, price_strategy())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Subtotal equals the sum of line subtotals
        #[test]
        fn prop_subtotal_is_sum_of_lines(lines in prop::collection::vec(line_strategy(), 1..10)) {
            let totals = quotation_totals(&lines);
            let expected: Decimal = lines
                .iter()
                .map(|(quantity, unit_price)| line_subtotal(*quantity, *unit_price))
                .sum();
            prop_assert_eq!(totals.subtotal, expected);
        }

        /// Total always equals subtotal plus tax
        #[test]
        fn prop_total_is_subtotal_plus_tax(lines in prop::collection::vec(line_strategy(), 1..10)) {
            let totals = quotation_totals(&lines);
            prop_assert_eq!(totals.total, totals.subtotal + totals.tax);
        }

        /// Tax never exceeds the nominal 15% by more than the rounding step
        #[test]
        fn prop_tax_tracks_rate(lines in prop::collection::vec(line_strategy(), 1..10)) {
            let totals = quotation_totals(&lines);
            let nominal = totals.subtotal * vat_rate();
            let delta = (totals.tax - nominal).abs();
            prop_assert!(delta <= dec("0.005"));
        }
    }
}
