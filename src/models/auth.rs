use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::user;
use crate::error::AppError;

/// Request body for user registration.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    /// Unique username (3-30 chars, letters, digits, underscores).
    #[schema(example = "alice_wonder")]
    pub username: String,
    /// Unique email address.
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Password (at least 6 characters).
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_register_request(payload: &RegisterRequest) -> Result<(), AppError> {
    let username = payload.username.trim();
    if username.chars().count() < 3 || username.chars().count() > 30 {
        return Err(AppError::Validation(
            "Username must be between 3 and 30 characters".into(),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(AppError::Validation(
            "Username can only contain letters, numbers, and underscores".into(),
        ));
    }
    validate_email(payload.email.trim())?;
    if payload.password.len() < 6 || payload.password.len() > 128 {
        return Err(AppError::Validation(
            "Password must be 6-128 characters".into(),
        ));
    }
    Ok(())
}

/// Minimal structural email check: non-empty local part and a dotted domain.
fn validate_email(email: &str) -> Result<(), AppError> {
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        });

    if valid && !email.chars().any(|c| c.is_whitespace()) {
        Ok(())
    } else {
        Err(AppError::Validation("Please provide a valid email".into()))
    }
}

/// Request body for user login.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Username of the account to log into.
    #[schema(example = "alice_wonder")]
    pub username: String,
    /// Account password.
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if payload.username.trim().is_empty() {
        return Err(AppError::Validation("Username is required".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password is required".into()));
    }
    Ok(())
}

/// Public view of a user account (no password hash).
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    /// User ID.
    #[schema(example = 42)]
    pub id: i32,
    /// Username.
    #[schema(example = "alice_wonder")]
    pub username: String,
    /// Email address.
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Role (`user` or `admin`).
    #[schema(example = "user")]
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Successful registration/login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AuthResponse {
    pub user: UserResponse,
    /// Short-lived JWT bearer token.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Longer-lived refresh token.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub refresh_token: String,
}

/// Current authenticated user's profile.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MeResponse {
    pub user: UserResponse,
}
