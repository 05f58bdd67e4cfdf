//! User administration service

use bcrypt::{hash, DEFAULT_COST};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Role, User};
use shared::{validate_email, validate_password, validate_phone};

/// User administration service
#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

/// Input for creating a user account
#[derive(Debug, Deserialize)]
pub struct CreateUserInput {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: Role,
    pub phone: Option<String>,
}

/// Input for updating a user account
#[derive(Debug, Deserialize)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub role: Option<Role>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: String,
    role: String,
    phone: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AppResult<User> {
        let role = Role::parse(&self.role)
            .ok_or_else(|| AppError::Internal(format!("Unknown role in database: {}", self.role)))?;
        Ok(User {
            id: self.id,
            email: self.email,
            name: self.name,
            role,
            phone: self.phone,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const USER_COLUMNS: &str = "id, email, name, role, phone, is_active, created_at, updated_at";

impl UserService {
    /// Create a new UserService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all users
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE deleted_at IS NULL ORDER BY created_at DESC",
            USER_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    /// Create a user account
    pub async fn create_user(&self, input: CreateUserInput) -> AppResult<User> {
        validate_email(&input.email).map_err(|msg| AppError::Validation {
            field: "email".to_string(),
            message: msg.to_string(),
            message_es: "Formato de correo inválido".to_string(),
        })?;

        validate_password(&input.password).map_err(|msg| AppError::Validation {
            field: "password".to_string(),
            message: msg.to_string(),
            message_es: "La contraseña debe tener al menos 8 caracteres".to_string(),
        })?;

        if let Some(phone) = &input.phone {
            validate_phone(phone).map_err(|msg| AppError::Validation {
                field: "phone".to_string(),
                message: msg.to_string(),
                message_es: "El teléfono debe tener exactamente 10 dígitos".to_string(),
            })?;
        }

        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE email = $1 AND deleted_at IS NULL",
        )
        .bind(&input.email)
        .fetch_one(&self.db)
        .await?;

        if existing > 0 {
            return Err(AppError::DuplicateEntry("email".to_string()));
        }

        let password_hash = hash(&input.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (email, name, password_hash, role, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&input.email)
        .bind(&input.name)
        .bind(&password_hash)
        .bind(input.role.as_str())
        .bind(&input.phone)
        .fetch_one(&self.db)
        .await?;

        row.into_user()
    }

    /// Get a user by id
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1 AND deleted_at IS NULL",
            USER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        row.into_user()
    }

    /// Update a user account
    pub async fn update_user(&self, user_id: Uuid, input: UpdateUserInput) -> AppResult<User> {
        let current = self.get_user(user_id).await?;

        let name = input.name.unwrap_or(current.name);
        let role = input.role.unwrap_or(current.role);
        let phone = input.phone.or(current.phone);
        let is_active = input.is_active.unwrap_or(current.is_active);

        if let Some(phone) = &phone {
            validate_phone(phone).map_err(|msg| AppError::Validation {
                field: "phone".to_string(),
                message: msg.to_string(),
                message_es: "El teléfono debe tener exactamente 10 dígitos".to_string(),
            })?;
        }

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET name = $1, role = $2, phone = $3, is_active = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&name)
        .bind(role.as_str())
        .bind(&phone)
        .bind(is_active)
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        row.into_user()
    }

    /// Soft-delete a user account
    pub async fn delete_user(&self, user_id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(user_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User".to_string()));
        }

        Ok(())
    }
}
