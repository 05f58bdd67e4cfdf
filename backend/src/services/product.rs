//! Product catalog service
//!
//! Catalog CRUD only: `current_stock` belongs to the stock ledger and is
//! never writable through this surface.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::Product;

/// Product catalog service
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Input for creating a product
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub price: Decimal,
    pub minimum_stock: i32,
    pub status: String,
    pub supplier_id: Uuid,
}

/// Input for updating a product
#[derive(Debug, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub price: Option<Decimal>,
    pub minimum_stock: Option<i32>,
    pub status: Option<String>,
    pub supplier_id: Option<Uuid>,
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    category_id: Option<Uuid>,
    price: Decimal,
    current_stock: i32,
    minimum_stock: i32,
    status: String,
    supplier_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            description: row.description,
            category_id: row.category_id,
            price: row.price,
            current_stock: row.current_stock,
            minimum_stock: row.minimum_stock,
            status: row.status,
            supplier_id: row.supplier_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const PRODUCT_COLUMNS: &str = "id, name, description, category_id, price, current_stock, \
     minimum_stock, status, supplier_id, created_at, updated_at";

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all products
    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products WHERE deleted_at IS NULL ORDER BY name",
            PRODUCT_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Create a product
    ///
    /// New products start with zero stock; stock is introduced through an
    /// input movement.
    pub async fn create_product(&self, input: CreateProductInput) -> AppResult<Product> {
        self.validate(&input.price, input.minimum_stock)?;
        self.check_references(input.supplier_id, input.category_id).await?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO products (name, description, category_id, price, minimum_stock, status, supplier_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.category_id)
        .bind(input.price)
        .bind(input.minimum_stock)
        .bind(&input.status)
        .bind(input.supplier_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Get a product by id
    pub async fn get_product(&self, product_id: Uuid) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products WHERE id = $1 AND deleted_at IS NULL",
            PRODUCT_COLUMNS
        ))
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(row.into())
    }

    /// Update a product's catalog fields
    pub async fn update_product(
        &self,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> AppResult<Product> {
        let current = self.get_product(product_id).await?;

        let name = input.name.unwrap_or(current.name);
        let description = input.description.or(current.description);
        let category_id = input.category_id.or(current.category_id);
        let price = input.price.unwrap_or(current.price);
        let minimum_stock = input.minimum_stock.unwrap_or(current.minimum_stock);
        let status = input.status.unwrap_or(current.status);
        let supplier_id = input.supplier_id.unwrap_or(current.supplier_id);

        self.validate(&price, minimum_stock)?;
        self.check_references(supplier_id, category_id).await?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products
            SET name = $1, description = $2, category_id = $3, price = $4,
                minimum_stock = $5, status = $6, supplier_id = $7, updated_at = NOW()
            WHERE id = $8
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(&name)
        .bind(&description)
        .bind(category_id)
        .bind(price)
        .bind(minimum_stock)
        .bind(&status)
        .bind(supplier_id)
        .bind(product_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Soft-delete a product
    pub async fn delete_product(&self, product_id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE products SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(product_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        Ok(())
    }

    fn validate(&self, price: &Decimal, minimum_stock: i32) -> AppResult<()> {
        if *price < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "price".to_string(),
                message: "Price cannot be negative".to_string(),
                message_es: "El precio no puede ser negativo".to_string(),
            });
        }

        if minimum_stock < 0 {
            return Err(AppError::Validation {
                field: "minimum_stock".to_string(),
                message: "Minimum stock cannot be negative".to_string(),
                message_es: "El stock mínimo no puede ser negativo".to_string(),
            });
        }

        Ok(())
    }

    async fn check_references(
        &self,
        supplier_id: Uuid,
        category_id: Option<Uuid>,
    ) -> AppResult<()> {
        let supplier_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1 AND deleted_at IS NULL)",
        )
        .bind(supplier_id)
        .fetch_one(&self.db)
        .await?;

        if !supplier_exists {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        if let Some(category_id) = category_id {
            let category_exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1 AND deleted_at IS NULL)",
            )
            .bind(category_id)
            .fetch_one(&self.db)
            .await?;

            if !category_exists {
                return Err(AppError::NotFound("Category".to_string()));
            }
        }

        Ok(())
    }
}
