//! Alert engine tests
//!
//! Tests for the threshold decision table, alert deduplication and the
//! ledger/alert interaction scenarios.

use proptest::prelude::*;
use shared::{alert_message, apply_movement, evaluate_stock_level, Alert, AlertKind, MovementType};

/// In-memory stand-in for one product's ledger row plus its active alerts,
/// wired together the same way the movement pipeline does it: apply the
/// movement, evaluate the post-update stock, create the alert unless the
/// kind is already active.
struct ProductState {
    stock: i32,
    minimum_stock: i32,
    active_alerts: Vec<AlertKind>,
}

impl ProductState {
    fn new(stock: i32, minimum_stock: i32) -> Self {
        Self {
            stock,
            minimum_stock,
            active_alerts: Vec::new(),
        }
    }

    /// Apply a movement; on success evaluate and deduplicate alerts.
    /// On failure nothing changes, mirroring the transaction rollback.
    fn record_movement(&mut self, movement_type: MovementType, quantity: i32) -> Result<(), ()> {
        let new_stock = apply_movement(self.stock, movement_type, quantity).map_err(|_| ())?;
        self.stock = new_stock;

        if let Some(kind) = evaluate_stock_level(self.stock, self.minimum_stock) {
            if !self.active_alerts.contains(&kind) {
                self.active_alerts.push(kind);
            }
        }

        Ok(())
    }
}

// ============================================================================
// Decision Table Tests
// ============================================================================

mod decision_table {
    use super::*;

    #[test]
    fn zero_stock_is_out_of_stock() {
        assert_eq!(evaluate_stock_level(0, 5), Some(AlertKind::OutOfStock));
    }

    #[test]
    fn one_unit_wins_over_low_stock() {
        // 1 <= minimum_stock, but the more specific kind is produced
        assert_eq!(evaluate_stock_level(1, 5), Some(AlertKind::OneUnit));
    }

    #[test]
    fn one_unit_applies_even_with_zero_minimum() {
        assert_eq!(evaluate_stock_level(1, 0), Some(AlertKind::OneUnit));
    }

    #[test]
    fn at_or_below_minimum_is_low_stock() {
        assert_eq!(evaluate_stock_level(5, 5), Some(AlertKind::LowStock));
        assert_eq!(evaluate_stock_level(3, 5), Some(AlertKind::LowStock));
        assert_eq!(evaluate_stock_level(2, 5), Some(AlertKind::LowStock));
    }

    #[test]
    fn above_minimum_produces_no_alert() {
        assert_eq!(evaluate_stock_level(6, 5), None);
        assert_eq!(evaluate_stock_level(100, 5), None);
        assert_eq!(evaluate_stock_level(2, 0), None);
    }

    #[test]
    fn dismissal_marks_an_alert_inactive() {
        let mut alert = Alert {
            id: uuid::Uuid::new_v4(),
            kind: AlertKind::LowStock,
            message: alert_message(AlertKind::LowStock, "Teclado", 5),
            product_id: uuid::Uuid::new_v4(),
            created_at: chrono::Utc::now(),
            deleted_at: None,
        };
        assert!(alert.is_active());

        alert.deleted_at = Some(chrono::Utc::now());
        assert!(!alert.is_active());
    }

    #[test]
    fn messages_name_the_product() {
        let message = alert_message(AlertKind::LowStock, "Teclado", 5);
        assert!(message.contains("Teclado"));
        assert!(message.contains('5'));

        let message = alert_message(AlertKind::OneUnit, "Teclado", 5);
        assert!(message.contains("Teclado"));

        let message = alert_message(AlertKind::OutOfStock, "Teclado", 5);
        assert!(message.contains("agotado"));
    }
}

// ============================================================================
// Ledger/Alert Interaction Scenarios
// ============================================================================

mod scenarios {
    use super::*;

    #[test]
    fn repeated_breach_in_same_band_creates_no_duplicate() {
        // minimum_stock=3, stock=4; two outputs keep stock inside the
        // low-stock band: exactly one low_stock alert
        let mut product = ProductState::new(4, 3);

        product.record_movement(MovementType::Output, 1).unwrap();
        assert_eq!(product.stock, 3);
        assert_eq!(product.active_alerts, vec![AlertKind::LowStock]);

        product.record_movement(MovementType::Output, 1).unwrap();
        assert_eq!(product.stock, 2);
        assert_eq!(product.active_alerts, vec![AlertKind::LowStock]);
    }

    #[test]
    fn threshold_transition_keeps_prior_alerts_active() {
        // minimum_stock=5, stock=5: output of 4 leaves one unit, a further
        // output of 1 drains the stock; both alerts end up active
        let mut product = ProductState::new(5, 5);

        product.record_movement(MovementType::Output, 4).unwrap();
        assert_eq!(product.stock, 1);
        assert_eq!(product.active_alerts, vec![AlertKind::OneUnit]);

        product.record_movement(MovementType::Output, 1).unwrap();
        assert_eq!(product.stock, 0);
        assert_eq!(
            product.active_alerts,
            vec![AlertKind::OneUnit, AlertKind::OutOfStock]
        );
    }

    #[test]
    fn rejected_output_changes_nothing() {
        // stock=10, minimum_stock=3: output of 20 is rejected, stock stays
        // at 10 and no alert is created
        let mut product = ProductState::new(10, 3);

        assert!(product.record_movement(MovementType::Output, 20).is_err());
        assert_eq!(product.stock, 10);
        assert!(product.active_alerts.is_empty());
    }

    #[test]
    fn recovery_creates_no_alert_and_dismisses_nothing() {
        // stock=0 with an active out_of_stock alert: an input of 5 recovers
        // the stock above the minimum, creates no new alert and leaves the
        // prior alert active (dismissal is a separate action)
        let mut product = ProductState::new(1, 3);
        product.record_movement(MovementType::Output, 1).unwrap();
        assert_eq!(product.active_alerts, vec![AlertKind::OutOfStock]);

        product.record_movement(MovementType::Input, 5).unwrap();
        assert_eq!(product.stock, 5);
        assert_eq!(product.active_alerts, vec![AlertKind::OutOfStock]);
    }

    #[test]
    fn input_into_low_band_still_raises_alert() {
        // Alerts are evaluated on the post-movement level regardless of
        // direction: an input that lands inside the band raises low_stock
        let mut product = ProductState::new(0, 5);
        product.record_movement(MovementType::Input, 3).unwrap();
        assert_eq!(product.active_alerts, vec![AlertKind::LowStock]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The decision table produces at most one kind per evaluation,
        /// following the priority order
        #[test]
        fn prop_priority_order(stock in 0..1000i32, minimum in 0..1000i32) {
            let kind = evaluate_stock_level(stock, minimum);
            match kind {
                Some(AlertKind::OutOfStock) => prop_assert_eq!(stock, 0),
                Some(AlertKind::OneUnit) => prop_assert_eq!(stock, 1),
                Some(AlertKind::LowStock) => {
                    prop_assert!(stock > 1);
                    prop_assert!(stock <= minimum);
                }
                None => {
                    prop_assert!(stock >= 2);
                    prop_assert!(stock > minimum);
                }
            }
        }

        /// Stock above the minimum (and above one) never alerts
        #[test]
        fn prop_healthy_stock_never_alerts(stock in 2..1000i32, minimum in 0..1000i32) {
            prop_assume!(stock > minimum);
            prop_assert_eq!(evaluate_stock_level(stock, minimum), None);
        }

        /// A kind never appears twice in the active set, whatever the
        /// movement sequence
        #[test]
        fn prop_no_duplicate_active_kinds(
            minimum in 0..20i32,
            movements in prop::collection::vec(
                (prop_oneof![Just(MovementType::Input), Just(MovementType::Output)], 1..10i32),
                1..50
            )
        ) {
            let mut product = ProductState::new(0, minimum);
            for (movement_type, quantity) in movements {
                let _ = product.record_movement(movement_type, quantity);
            }

            let mut kinds = product.active_alerts.clone();
            kinds.sort_by_key(|k| k.as_str());
            kinds.dedup();
            prop_assert_eq!(kinds.len(), product.active_alerts.len());
        }
    }
}
