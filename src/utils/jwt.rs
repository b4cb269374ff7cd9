use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// JWT Claims structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Username
    pub uid: i32,    // User ID
    pub role: String,
    /// Token kind: `access` or `refresh`.
    pub kind: String,
    pub exp: usize, // Expiration timestamp
}

const ACCESS_TOKEN_TTL_HOURS: i64 = 24;
const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

/// Access + refresh token pair issued on register/login.
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

fn sign(
    user_id: i32,
    username: &str,
    role: &str,
    kind: &str,
    ttl: Duration,
    secret: &str,
) -> Result<String> {
    let expiration = Utc::now()
        .checked_add_signed(ttl)
        .ok_or_else(|| anyhow::anyhow!("token expiry overflow"))?
        .timestamp();

    let claims = Claims {
        sub: username.to_owned(),
        uid: user_id,
        role: role.to_owned(),
        kind: kind.to_owned(),
        exp: expiration as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Sign a fresh access/refresh token pair for a user.
pub fn sign_token_pair(user_id: i32, username: &str, role: &str, secret: &str) -> Result<TokenPair> {
    Ok(TokenPair {
        access_token: sign(
            user_id,
            username,
            role,
            "access",
            Duration::hours(ACCESS_TOKEN_TTL_HOURS),
            secret,
        )?,
        refresh_token: sign(
            user_id,
            username,
            role,
            "refresh",
            Duration::days(REFRESH_TOKEN_TTL_DAYS),
            secret,
        )?,
    })
}

/// Verify a token and return its claims. Rejects refresh tokens so they
/// cannot be used as bearer credentials.
pub fn verify_access(token: &str, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    if token_data.claims.kind != "access" {
        anyhow::bail!("not an access token");
    }

    Ok(token_data.claims)
}
