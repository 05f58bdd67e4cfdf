//! Supplier administration service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::Supplier;
use shared::validate_phone;

/// Supplier administration service
#[derive(Clone)]
pub struct SupplierService {
    db: PgPool,
}

/// Input for creating a supplier
#[derive(Debug, Deserialize)]
pub struct CreateSupplierInput {
    pub name: String,
    pub email: Option<String>,
    pub tax_id: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Input for updating a supplier
#[derive(Debug, Deserialize)]
pub struct UpdateSupplierInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub tax_id: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct SupplierRow {
    id: Uuid,
    name: String,
    email: Option<String>,
    tax_id: String,
    phone: Option<String>,
    address: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        Supplier {
            id: row.id,
            name: row.name,
            email: row.email,
            tax_id: row.tax_id,
            phone: row.phone,
            address: row.address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn check_phone(phone: &Option<String>) -> AppResult<()> {
    if let Some(phone) = phone {
        validate_phone(phone).map_err(|msg| AppError::Validation {
            field: "phone".to_string(),
            message: msg.to_string(),
            message_es: "El teléfono debe tener exactamente 10 dígitos".to_string(),
        })?;
    }
    Ok(())
}

impl SupplierService {
    /// Create a new SupplierService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all suppliers
    pub async fn list_suppliers(&self) -> AppResult<Vec<Supplier>> {
        let rows = sqlx::query_as::<_, SupplierRow>(
            r#"
            SELECT id, name, email, tax_id, phone, address, created_at, updated_at
            FROM suppliers
            WHERE deleted_at IS NULL
            ORDER BY name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Supplier::from).collect())
    }

    /// Create a supplier
    pub async fn create_supplier(&self, input: CreateSupplierInput) -> AppResult<Supplier> {
        check_phone(&input.phone)?;

        let row = sqlx::query_as::<_, SupplierRow>(
            r#"
            INSERT INTO suppliers (name, email, tax_id, phone, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, tax_id, phone, address, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.tax_id)
        .bind(&input.phone)
        .bind(&input.address)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Get a supplier by id
    pub async fn get_supplier(&self, supplier_id: Uuid) -> AppResult<Supplier> {
        let row = sqlx::query_as::<_, SupplierRow>(
            r#"
            SELECT id, name, email, tax_id, phone, address, created_at, updated_at
            FROM suppliers
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(supplier_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Supplier".to_string()))?;

        Ok(row.into())
    }

    /// Update a supplier
    pub async fn update_supplier(
        &self,
        supplier_id: Uuid,
        input: UpdateSupplierInput,
    ) -> AppResult<Supplier> {
        let current = self.get_supplier(supplier_id).await?;

        let name = input.name.unwrap_or(current.name);
        let email = input.email.or(current.email);
        let tax_id = input.tax_id.unwrap_or(current.tax_id);
        let phone = input.phone.or(current.phone);
        let address = input.address.or(current.address);

        check_phone(&phone)?;

        let row = sqlx::query_as::<_, SupplierRow>(
            r#"
            UPDATE suppliers
            SET name = $1, email = $2, tax_id = $3, phone = $4, address = $5, updated_at = NOW()
            WHERE id = $6
            RETURNING id, name, email, tax_id, phone, address, created_at, updated_at
            "#,
        )
        .bind(&name)
        .bind(&email)
        .bind(&tax_id)
        .bind(&phone)
        .bind(&address)
        .bind(supplier_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Soft-delete a supplier
    pub async fn delete_supplier(&self, supplier_id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE suppliers SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(supplier_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        Ok(())
    }
}
