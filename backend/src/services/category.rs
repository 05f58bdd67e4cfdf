//! Product category service

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::Category;

/// Product category service
#[derive(Clone)]
pub struct CategoryService {
    db: PgPool,
}

/// Input for creating a category
#[derive(Debug, Deserialize)]
pub struct CreateCategoryInput {
    pub name: String,
    pub description: Option<String>,
}

/// Input for updating a category
#[derive(Debug, Deserialize)]
pub struct UpdateCategoryInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl CategoryService {
    /// Create a new CategoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all categories
    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM categories
            WHERE deleted_at IS NULL
            ORDER BY name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Create a category
    pub async fn create_category(&self, input: CreateCategoryInput) -> AppResult<Category> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Get a category by id
    pub async fn get_category(&self, category_id: Uuid) -> AppResult<Category> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM categories
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(category_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Category".to_string()))?;

        Ok(row.into())
    }

    /// Update a category
    pub async fn update_category(
        &self,
        category_id: Uuid,
        input: UpdateCategoryInput,
    ) -> AppResult<Category> {
        let current = self.get_category(category_id).await?;

        let name = input.name.unwrap_or(current.name);
        let description = input.description.or(current.description);

        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            UPDATE categories
            SET name = $1, description = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(&name)
        .bind(&description)
        .bind(category_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Soft-delete a category
    pub async fn delete_category(&self, category_id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE categories SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(category_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Category".to_string()));
        }

        Ok(())
    }
}
