//! Authentication service for login, token management and password flows

use base64::{engine::general_purpose::URL_SAFE_NO_PAD as BASE64, Engine as _};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{Role, User};
use shared::validate_password;

type HmacSha256 = Hmac<Sha256>;

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    jwt_secret: String,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
    reset_token_expiry: i64,
    frontend_url: String,
}

/// Input for logging in
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Authentication tokens
#[derive(Debug, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Response after successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: User,
    #[serde(flatten)]
    pub tokens: AuthTokens,
}

/// Input for changing the password of the logged-in user
#[derive(Debug, Deserialize)]
pub struct ChangePasswordInput {
    pub old_password: String,
    pub new_password: String,
}

/// Input for requesting a password-reset link
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordInput {
    pub email: String,
}

/// Input for completing a password reset
#[derive(Debug, Deserialize)]
pub struct ResetPasswordInput {
    pub uid: Uuid,
    pub token: String,
    pub new_password: String,
}

/// User info from database
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    name: String,
    role: String,
    phone: Option<String>,
    is_active: bool,
    created_at: chrono::DateTime<Utc>,
    updated_at: chrono::DateTime<Utc>,
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

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            jwt_secret: config.jwt.secret.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
            refresh_token_expiry: config.jwt.refresh_token_expiry,
            reset_token_expiry: config.jwt.reset_token_expiry,
            frontend_url: config.frontend.url.clone(),
        }
    }

    /// Authenticate user with email and password
    pub async fn login(&self, input: LoginInput) -> AppResult<LoginResponse> {
        let user = self
            .find_by_email(&input.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !user.is_active {
            return Err(AppError::InactiveUser);
        }

        let valid = verify(&input.password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        // Update last login
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(user.id)
            .execute(&self.db)
            .await?;

        let role = Role::parse(&user.role)
            .ok_or_else(|| AppError::Internal(format!("Unknown role in database: {}", user.role)))?;

        let tokens = self.generate_tokens(user.id, role)?;
        self.store_refresh_token(user.id, &tokens.refresh_token).await?;

        Ok(LoginResponse {
            message: "Login successful".to_string(),
            user: user.into_user()?,
            tokens,
        })
    }

    /// Refresh access token using refresh token
    pub async fn refresh_token(&self, refresh_token: &str) -> AppResult<AuthTokens> {
        let token_hash = Self::hash_token(refresh_token);

        let row = sqlx::query_as::<_, (Uuid, String)>(
            r#"
            SELECT rt.user_id, u.role
            FROM refresh_tokens rt
            JOIN users u ON u.id = rt.user_id
            WHERE rt.token_hash = $1
              AND rt.expires_at > NOW()
              AND rt.revoked_at IS NULL
              AND u.is_active = true
              AND u.deleted_at IS NULL
            "#,
        )
        .bind(&token_hash)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidToken)?;

        let (user_id, role_str) = row;
        let role = Role::parse(&role_str)
            .ok_or_else(|| AppError::Internal(format!("Unknown role in database: {}", role_str)))?;

        // Revoke old refresh token
        sqlx::query("UPDATE refresh_tokens SET revoked_at = NOW() WHERE token_hash = $1")
            .bind(&token_hash)
            .execute(&self.db)
            .await?;

        let tokens = self.generate_tokens(user_id, role)?;
        self.store_refresh_token(user_id, &tokens.refresh_token).await?;

        Ok(tokens)
    }

    /// Change the password of the logged-in user
    pub async fn change_password(&self, user_id: Uuid, input: ChangePasswordInput) -> AppResult<()> {
        let password_hash = sqlx::query_scalar::<_, String>(
            "SELECT password_hash FROM users WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        let valid = verify(&input.old_password, &password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            return Err(AppError::Validation {
                field: "old_password".to_string(),
                message: "Current password is incorrect".to_string(),
                message_es: "La contraseña actual es incorrecta".to_string(),
            });
        }

        self.set_password(user_id, &input.new_password).await
    }

    /// Request a password-reset link for the given email
    ///
    /// Token delivery is delegated to the mail collaborator; the backend only
    /// produces and logs the link.
    pub async fn forgot_password(&self, email: &str) -> AppResult<String> {
        let user = self.find_by_email(email).await?.ok_or_else(|| AppError::Validation {
            field: "email".to_string(),
            message: "No user with that email found".to_string(),
            message_es: "No existe un usuario con ese correo".to_string(),
        })?;

        let expires_at = (Utc::now() + Duration::seconds(self.reset_token_expiry)).timestamp();
        let token = self.make_reset_token(user.id, &user.password_hash, expires_at)?;
        let reset_url = format!(
            "{}/reset-password?uid={}&token={}",
            self.frontend_url, user.id, token
        );

        tracing::info!(email = %email, "Password reset link generated: {}", reset_url);

        Ok(format!(
            "A password recovery email has been sent to {}.",
            email
        ))
    }

    /// Complete a password reset using a token from the reset link
    pub async fn reset_password(&self, input: ResetPasswordInput) -> AppResult<()> {
        let password_hash = sqlx::query_scalar::<_, String>(
            "SELECT password_hash FROM users WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(input.uid)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        self.verify_reset_token(input.uid, &password_hash, &input.token)?;
        self.set_password(input.uid, &input.new_password).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRow>> {
        let user = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, name, role, phone, is_active, created_at, updated_at
            FROM users
            WHERE email = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    async fn set_password(&self, user_id: Uuid, new_password: &str) -> AppResult<()> {
        validate_password(new_password).map_err(|msg| AppError::Validation {
            field: "new_password".to_string(),
            message: msg.to_string(),
            message_es: "La contraseña debe tener al menos 8 caracteres".to_string(),
        })?;

        let password_hash = hash(new_password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        sqlx::query("UPDATE users SET password_hash = $1, updated_at = NOW() WHERE id = $2")
            .bind(&password_hash)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Generate access and refresh tokens
    fn generate_tokens(&self, user_id: Uuid, role: Role) -> AppResult<AuthTokens> {
        let now = Utc::now();
        let access_exp = now + Duration::seconds(self.access_token_expiry);

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.as_str().to_string(),
            exp: access_exp.timestamp(),
            iat: now.timestamp(),
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

        // Refresh token (simple random token)
        let refresh_token = Uuid::new_v4().to_string();

        Ok(AuthTokens {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Store refresh token in database
    async fn store_refresh_token(&self, user_id: Uuid, token: &str) -> AppResult<()> {
        let token_hash = Self::hash_token(token);
        let expires_at = Utc::now() + Duration::seconds(self.refresh_token_expiry);

        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (user_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id)
        .bind(&token_hash)
        .bind(expires_at)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Hash a token for storage
    fn hash_token(token: &str) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        format!("{:x}", hasher.finish())
    }

    /// Build a stateless password-reset token
    ///
    /// The MAC covers the current password hash, so a token stops working as
    /// soon as the password changes.
    fn make_reset_token(
        &self,
        user_id: Uuid,
        password_hash: &str,
        expires_at: i64,
    ) -> AppResult<String> {
        let mac = self.reset_token_mac(user_id, password_hash, expires_at)?;
        Ok(format!("{}.{}", expires_at, BASE64.encode(mac)))
    }

    /// Validate a password-reset token
    fn verify_reset_token(&self, user_id: Uuid, password_hash: &str, token: &str) -> AppResult<()> {
        let (expires_at, mac) = token.split_once('.').ok_or(AppError::InvalidToken)?;
        let expires_at: i64 = expires_at.parse().map_err(|_| AppError::InvalidToken)?;

        if expires_at < Utc::now().timestamp() {
            return Err(AppError::InvalidToken);
        }

        let expected = BASE64.encode(self.reset_token_mac(user_id, password_hash, expires_at)?);
        if mac != expected {
            return Err(AppError::InvalidToken);
        }

        Ok(())
    }

    fn reset_token_mac(
        &self,
        user_id: Uuid,
        password_hash: &str,
        expires_at: i64,
    ) -> AppResult<Vec<u8>> {
        let mut mac = HmacSha256::new_from_slice(self.jwt_secret.as_bytes())
            .map_err(|_| AppError::Internal("Failed to create HMAC".to_string()))?;
        mac.update(format!("{}:{}:{}", user_id, expires_at, password_hash).as_bytes());
        Ok(mac.finalize().into_bytes().to_vec())
    }
}
