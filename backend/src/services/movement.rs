//! Stock ledger service
//!
//! The only writer of `products.current_stock`. A movement is applied, its
//! snapshot recorded, and the alert engine consulted inside one database
//! transaction: either the stock update, the movement row and any resulting
//! alert all land, or none of them do.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{alert_message, apply_movement, evaluate_stock_level, MovementType};

/// Stock ledger service
#[derive(Clone)]
pub struct MovementService {
    db: PgPool,
}

/// Input for recording a stock movement
#[derive(Debug, Deserialize)]
pub struct RecordMovementInput {
    pub product_id: Uuid,
    /// "input" or "output", case-insensitive
    pub movement_type: String,
    pub quantity: i32,
    pub date: Option<DateTime<Utc>>,
    /// Receiving customer, for outputs
    pub customer_id: Option<Uuid>,
}

/// Movement record with joined display fields
#[derive(Debug, Clone, serde::Serialize, FromRow)]
pub struct MovementRecord {
    pub id: Uuid,
    pub movement_type: String,
    pub date: DateTime<Utc>,
    pub quantity: i32,
    pub product_id: Uuid,
    pub product_name: String,
    /// Product stock immediately after this movement
    pub product_stock: i32,
    pub supplier_name: String,
    pub customer_id: Option<Uuid>,
    pub customer_name: String,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
}

/// Product fields the ledger works with
#[derive(Debug, FromRow)]
struct ProductStockRow {
    id: Uuid,
    name: String,
    current_stock: i32,
    minimum_stock: i32,
}

const MOVEMENT_SELECT: &str = r#"
    SELECT m.id, m.movement_type, m.date, m.quantity, m.product_id,
           p.name AS product_name,
           m.stock_in_movement AS product_stock,
           COALESCE(s.name, '') AS supplier_name,
           m.customer_id,
           COALESCE(c.name, '') AS customer_name,
           u.name AS user_name,
           m.created_at
    FROM movements m
    JOIN products p ON p.id = m.product_id
    LEFT JOIN suppliers s ON s.id = p.supplier_id
    LEFT JOIN customers c ON c.id = m.customer_id
    JOIN users u ON u.id = m.user_id
"#;

impl MovementService {
    /// Create a new MovementService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Apply a stock movement and evaluate alerts
    ///
    /// Runs as a single unit of work: the product row is locked for the
    /// read-modify-write, so concurrent movements against the same product
    /// serialize at the database. On any validation failure the transaction
    /// rolls back with no stock change, no movement and no alert.
    pub async fn record_movement(
        &self,
        user_id: Uuid,
        input: RecordMovementInput,
    ) -> AppResult<MovementRecord> {
        let movement_type = MovementType::parse(&input.movement_type)?;

        let mut tx = self.db.begin().await?;

        let product = sqlx::query_as::<_, ProductStockRow>(
            r#"
            SELECT id, name, current_stock, minimum_stock
            FROM products
            WHERE id = $1 AND deleted_at IS NULL
            FOR UPDATE
            "#,
        )
        .bind(input.product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        if let Some(customer_id) = input.customer_id {
            let customer_exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM customers WHERE id = $1 AND deleted_at IS NULL)",
            )
            .bind(customer_id)
            .fetch_one(&mut *tx)
            .await?;

            if !customer_exists {
                return Err(AppError::NotFound("Customer".to_string()));
            }
        }

        let new_stock = apply_movement(product.current_stock, movement_type, input.quantity)?;

        sqlx::query("UPDATE products SET current_stock = $1, updated_at = NOW() WHERE id = $2")
            .bind(new_stock)
            .bind(product.id)
            .execute(&mut *tx)
            .await?;

        let date = input.date.unwrap_or_else(Utc::now);
        let movement_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO movements (movement_type, date, quantity, product_id, user_id,
                                   stock_in_movement, customer_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(movement_type.as_str())
        .bind(date)
        .bind(input.quantity)
        .bind(product.id)
        .bind(user_id)
        .bind(new_stock)
        .bind(input.customer_id)
        .fetch_one(&mut *tx)
        .await?;

        // Alert engine: evaluate the post-update level, skipping kinds that
        // already have an active alert for this product
        if let Some(kind) = evaluate_stock_level(new_stock, product.minimum_stock) {
            let exists = sqlx::query_scalar::<_, bool>(
                r#"
                SELECT EXISTS(
                    SELECT 1 FROM alerts
                    WHERE product_id = $1 AND type = $2 AND deleted_at IS NULL
                )
                "#,
            )
            .bind(product.id)
            .bind(kind.as_str())
            .fetch_one(&mut *tx)
            .await?;

            if !exists {
                sqlx::query("INSERT INTO alerts (product_id, type, message) VALUES ($1, $2, $3)")
                    .bind(product.id)
                    .bind(kind.as_str())
                    .bind(alert_message(kind, &product.name, product.minimum_stock))
                    .execute(&mut *tx)
                    .await?;

                tracing::debug!(
                    product_id = %product.id,
                    kind = kind.as_str(),
                    stock = new_stock,
                    "Stock alert raised"
                );
            }
        }

        tx.commit().await?;

        self.get_movement(movement_id).await
    }

    /// Get a movement by id
    pub async fn get_movement(&self, movement_id: Uuid) -> AppResult<MovementRecord> {
        let movement = sqlx::query_as::<_, MovementRecord>(&format!(
            "{} WHERE m.id = $1 AND m.deleted_at IS NULL",
            MOVEMENT_SELECT
        ))
        .bind(movement_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Movement".to_string()))?;

        Ok(movement)
    }

    /// List all movements, newest first
    pub async fn list_movements(&self) -> AppResult<Vec<MovementRecord>> {
        let movements = sqlx::query_as::<_, MovementRecord>(&format!(
            "{} WHERE m.deleted_at IS NULL ORDER BY m.created_at DESC",
            MOVEMENT_SELECT
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(movements)
    }
}
