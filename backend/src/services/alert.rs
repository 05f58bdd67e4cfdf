//! Stock alert service
//!
//! Read and dismiss alerts raised by the stock ledger. The movement pipeline
//! is the only creator of alerts; this service never inserts.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Stock alert service
#[derive(Clone)]
pub struct AlertService {
    db: PgPool,
}

/// Alert record with joined display fields
#[derive(Debug, Clone, serde::Serialize, FromRow)]
pub struct AlertRecord {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub product_id: Uuid,
    pub product_name: String,
    pub created_at: DateTime<Utc>,
}

impl AlertService {
    /// Create a new AlertService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List active alerts, newest first
    pub async fn list_alerts(&self) -> AppResult<Vec<AlertRecord>> {
        let alerts = sqlx::query_as::<_, AlertRecord>(
            r#"
            SELECT a.id, a.type AS kind, a.message, a.product_id, p.name AS product_name,
                   a.created_at
            FROM alerts a
            JOIN products p ON p.id = a.product_id
            WHERE a.deleted_at IS NULL
            ORDER BY a.created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(alerts)
    }

    /// Dismiss an active alert
    pub async fn dismiss_alert(&self, alert_id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE alerts SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(alert_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Alert".to_string()));
        }

        Ok(())
    }
}
