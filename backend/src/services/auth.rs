//! Authentication service for user registration, login and token issuing

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{map_db_error, AppError, AppResult};
use crate::middleware::auth::Claims;
use shared::models::{User, UserRole};
use shared::validation::{validate_email, validate_loc_code, validate_password};

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    jwt_secret: String,
    access_token_expiry: i64,
}

/// Input for registering a back-office user
#[derive(Debug, Deserialize)]
pub struct RegisterUserInput {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: UserRole,
    pub loc_code: Option<String>,
}

/// Input for logging in
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Response after a successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

/// User row from the database
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    name: String,
    role: String,
    loc_code: Option<String>,
    is_active: bool,
    created_at: chrono::DateTime<Utc>,
}

impl UserRow {
    fn into_model(self) -> AppResult<User> {
        let role = UserRole::from_str(&self.role)
            .ok_or_else(|| AppError::Internal(format!("Unknown role {}", self.role)))?;
        Ok(User {
            id: self.id,
            email: self.email,
            name: self.name,
            role,
            loc_code: self.loc_code,
            is_active: self.is_active,
            created_at: self.created_at,
        })
    }
}

const USER_COLUMNS: &str = "id, email, password_hash, name, role, loc_code, is_active, created_at";

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            jwt_secret: config.jwt.secret.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
        }
    }

    /// Register a back-office user (admin action)
    pub async fn register(&self, input: RegisterUserInput) -> AppResult<User> {
        if let Err(msg) = validate_email(&input.email) {
            return Err(AppError::Validation {
                field: "email".to_string(),
                message: msg.to_string(),
            });
        }
        if let Err(msg) = validate_password(&input.password) {
            return Err(AppError::Validation {
                field: "password".to_string(),
                message: msg.to_string(),
            });
        }
        if let Some(loc_code) = &input.loc_code {
            if let Err(msg) = validate_loc_code(loc_code) {
                return Err(AppError::Validation {
                    field: "loc_code".to_string(),
                    message: msg.to_string(),
                });
            }
        }

        let password_hash = hash(&input.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (email, password_hash, name, role, loc_code)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(input.email.trim().to_lowercase())
        .bind(&password_hash)
        .bind(input.name.trim())
        .bind(input.role.as_str())
        .bind(&input.loc_code)
        .fetch_one(&self.db)
        .await
        .map_err(|e| map_db_error(e, "email"))?;

        row.into_model()
    }

    /// Log in with email and password, returning a bearer token
    pub async fn login(&self, input: LoginInput) -> AppResult<LoginResponse> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(input.email.trim().to_lowercase())
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        if !row.is_active {
            return Err(AppError::InvalidCredentials);
        }

        let valid = verify(&input.password, &row.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verify failed: {}", e)))?;
        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        let user = row.into_model()?;
        let access_token = self.issue_token(&user)?;

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
            user,
        })
    }

    /// Fetch the current user's profile
    pub async fn me(&self, user_id: Uuid) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        row.into_model()
    }

    fn issue_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role.as_str().to_string(),
            loc_code: user.loc_code.clone(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token encoding failed: {}", e)))
    }
}
