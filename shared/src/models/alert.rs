//! Stock alerts and the threshold decision table

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A system-generated notice that a product's stock crossed a threshold
///
/// Alerts are raised by the movement pipeline and dismissed by an explicit
/// administrative action that sets `deleted_at`. At most one active alert of
/// a given kind exists per product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    pub product_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Alert {
    /// An alert is active until it has been dismissed
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Alert kinds, from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    LowStock,
    OneUnit,
    OutOfStock,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::LowStock => "low_stock",
            AlertKind::OneUnit => "one_unit",
            AlertKind::OutOfStock => "out_of_stock",
        }
    }
}

/// Decide which alert, if any, a post-movement stock level warrants
///
/// Evaluated most-specific-first; exactly one kind or none per evaluation.
/// Recovering above a threshold never dismisses previously raised alerts;
/// dismissal is a separate administrative action.
pub fn evaluate_stock_level(current_stock: i32, minimum_stock: i32) -> Option<AlertKind> {
    if current_stock == 0 {
        Some(AlertKind::OutOfStock)
    } else if current_stock == 1 {
        Some(AlertKind::OneUnit)
    } else if current_stock > 0 && current_stock <= minimum_stock {
        Some(AlertKind::LowStock)
    } else {
        None
    }
}

/// Human-facing alert message, in the product's market language
pub fn alert_message(kind: AlertKind, product_name: &str, minimum_stock: i32) -> String {
    match kind {
        AlertKind::LowStock => format!(
            "⚠️ El producto '{}' está por debajo del stock mínimo ({}).",
            product_name, minimum_stock
        ),
        AlertKind::OneUnit => format!(
            "⚠️ Solo queda 1 unidad del producto '{}'.",
            product_name
        ),
        AlertKind::OutOfStock => format!("🚨 El producto '{}' está agotado.", product_name),
    }
}
