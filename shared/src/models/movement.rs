//! Stock movement model and ledger arithmetic
//!
//! A movement is the only way a product's stock changes. The arithmetic is
//! kept here as pure functions so the backend can wrap it in a database
//! transaction and the test suite can exercise it directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A recorded stock-changing event for a product
///
/// Movements are immutable once created; `stock_in_movement` snapshots the
/// product's stock immediately after the movement was applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movement {
    pub id: Uuid,
    pub movement_type: MovementType,
    pub date: DateTime<Utc>,
    pub quantity: i32,
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub stock_in_movement: i32,
    /// Receiving customer, for outputs
    pub customer_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    Input,
    Output,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Input => "input",
            MovementType::Output => "output",
        }
    }

    /// Parse a movement type, case-insensitively
    pub fn parse(s: &str) -> Result<Self, StockError> {
        match s.to_ascii_lowercase().as_str() {
            "input" => Ok(MovementType::Input),
            "output" => Ok(MovementType::Output),
            _ => Err(StockError::UnsupportedMovementType(s.to_string())),
        }
    }
}

impl std::fmt::Display for MovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from applying a movement to a product's stock
///
/// All variants are recoverable at the request boundary: the operation is
/// rejected and nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StockError {
    #[error("Quantity must be a positive integer")]
    InvalidQuantity,

    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: i32, available: i32 },

    #[error("Unsupported movement type: {0}")]
    UnsupportedMovementType(String),
}

/// Apply a movement to a stock level, returning the new stock
///
/// Inputs add unconditionally; outputs must not exceed the current stock.
/// The caller persists the returned value together with the movement record
/// in a single transaction.
pub fn apply_movement(
    current_stock: i32,
    movement_type: MovementType,
    quantity: i32,
) -> Result<i32, StockError> {
    if quantity <= 0 {
        return Err(StockError::InvalidQuantity);
    }

    match movement_type {
        MovementType::Input => Ok(current_stock + quantity),
        MovementType::Output => {
            if quantity > current_stock {
                Err(StockError::InsufficientStock {
                    requested: quantity,
                    available: current_stock,
                })
            } else {
                Ok(current_stock - quantity)
            }
        }
    }
}
