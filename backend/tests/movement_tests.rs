//! Stock ledger tests
//!
//! Tests for movement application including:
//! - Input movements always add to stock
//! - Output movements subtract and never overdraw
//! - Rejected movements leave stock untouched

use proptest::prelude::*;
use shared::{apply_movement, MovementType, StockError};

// ============================================================================
// Unit Tests
// ============================================================================

mod movement_type {
    use super::*;

    #[test]
    fn parses_known_types() {
        assert_eq!(MovementType::parse("input").unwrap(), MovementType::Input);
        assert_eq!(MovementType::parse("output").unwrap(), MovementType::Output);
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!(MovementType::parse("INPUT").unwrap(), MovementType::Input);
        assert_eq!(MovementType::parse("Output").unwrap(), MovementType::Output);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = MovementType::parse("transfer").unwrap_err();
        assert_eq!(
            err,
            StockError::UnsupportedMovementType("transfer".to_string())
        );
    }

    #[test]
    fn round_trips_through_as_str() {
        assert_eq!(MovementType::Input.as_str(), "input");
        assert_eq!(MovementType::Output.as_str(), "output");
    }
}

mod apply {
    use super::*;

    #[test]
    fn input_increases_stock() {
        assert_eq!(apply_movement(10, MovementType::Input, 5).unwrap(), 15);
    }

    #[test]
    fn input_works_from_zero() {
        assert_eq!(apply_movement(0, MovementType::Input, 5).unwrap(), 5);
    }

    #[test]
    fn output_decreases_stock() {
        assert_eq!(apply_movement(10, MovementType::Output, 4).unwrap(), 6);
    }

    #[test]
    fn output_may_drain_stock_to_zero() {
        assert_eq!(apply_movement(7, MovementType::Output, 7).unwrap(), 0);
    }

    #[test]
    fn output_exceeding_stock_is_rejected() {
        // stock=10, output of 20: rejected, stock untouched
        let err = apply_movement(10, MovementType::Output, 20).unwrap_err();
        assert_eq!(
            err,
            StockError::InsufficientStock {
                requested: 20,
                available: 10,
            }
        );
    }

    #[test]
    fn output_from_empty_stock_is_rejected() {
        let err = apply_movement(0, MovementType::Output, 1).unwrap_err();
        assert_eq!(
            err,
            StockError::InsufficientStock {
                requested: 1,
                available: 0,
            }
        );
    }

    #[test]
    fn zero_quantity_is_rejected_for_both_types() {
        assert_eq!(
            apply_movement(10, MovementType::Input, 0).unwrap_err(),
            StockError::InvalidQuantity
        );
        assert_eq!(
            apply_movement(10, MovementType::Output, 0).unwrap_err(),
            StockError::InvalidQuantity
        );
    }

    #[test]
    fn negative_quantity_is_rejected_for_both_types() {
        assert_eq!(
            apply_movement(10, MovementType::Input, -3).unwrap_err(),
            StockError::InvalidQuantity
        );
        assert_eq!(
            apply_movement(10, MovementType::Output, -3).unwrap_err(),
            StockError::InvalidQuantity
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod property_tests {
    use super::*;

    fn stock_strategy() -> impl Strategy<Value = i32> {
        0..100_000i32
    }

    fn quantity_strategy() -> impl Strategy<Value = i32> {
        1..10_000i32
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// For all valid input movements: after = before + q
        #[test]
        fn prop_input_adds_quantity(before in stock_strategy(), q in quantity_strategy()) {
            let after = apply_movement(before, MovementType::Input, q).unwrap();
            prop_assert_eq!(after, before + q);
        }

        /// For all output movements with q <= before: after = before - q
        #[test]
        fn prop_output_subtracts_quantity(q in quantity_strategy(), surplus in 0..10_000i32) {
            let before = q + surplus;
            let after = apply_movement(before, MovementType::Output, q).unwrap();
            prop_assert_eq!(after, before - q);
        }

        /// For all output movements with q > before: the operation fails
        #[test]
        fn prop_overdraw_is_rejected(before in 0..10_000i32, excess in 1..10_000i32) {
            let q = before + excess;
            let err = apply_movement(before, MovementType::Output, q).unwrap_err();
            prop_assert_eq!(
                err,
                StockError::InsufficientStock { requested: q, available: before }
            );
        }

        /// Applying any accepted sequence of movements never drives stock negative
        #[test]
        fn prop_stock_never_negative(
            movements in prop::collection::vec(
                (prop_oneof![Just(MovementType::Input), Just(MovementType::Output)], quantity_strategy()),
                1..50
            )
        ) {
            let mut stock = 0;
            for (movement_type, quantity) in movements {
                if let Ok(new_stock) = apply_movement(stock, movement_type, quantity) {
                    stock = new_stock;
                }
                prop_assert!(stock >= 0);
            }
        }
    }
}
