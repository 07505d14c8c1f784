use serde::{Deserialize, Serialize};

use careerdost_store::Document;

/// A user account. Stored as one document; the streak fields change
/// together with `login_dates` in a single write, never separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier (UUIDv4, no dashes).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Email address, unique across users.
    pub email: String,

    /// Argon2id password hash. Never exposed to clients — responses use
    /// [`PublicUser`].
    pub password_hash: String,

    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// Calendar days (`YYYY-MM-DD`, UTC) with at least one login.
    /// Ascending, at most one entry per day.
    #[serde(default)]
    pub login_dates: Vec<String>,

    /// Consecutive-day run ending on the most recent login.
    #[serde(default)]
    pub current_streak: u32,

    /// Best streak ever observed. Only increases.
    #[serde(default)]
    pub max_streak: u32,

    /// RFC 3339 creation timestamp.
    pub created_at: String,

    /// RFC 3339 last update timestamp.
    pub updated_at: String,
}

impl Document for User {
    const COLLECTION: &'static str = "user";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Client-facing projection of a user — everything but the credentials.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub current_streak: u32,
    pub max_streak: u32,
    pub created_at: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            current_streak: user.current_streak,
            max_streak: user.max_streak,
            created_at: user.created_at.clone(),
        }
    }
}

/// A JWT issuance record. Revoking it invalidates the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub issued_at: String,
    pub expires_at: String,
    pub revoked: bool,
}

impl Document for Session {
    const COLLECTION: &'static str = "session";

    fn id(&self) -> &str {
        &self.id
    }
}

/// JWT claims payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user id.
    pub sub: String,
    /// Display name.
    pub name: String,
    /// Session id.
    pub sid: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiration (unix timestamp).
    pub exp: i64,
}

/// Registration request body.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issued token plus its lifetime.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}
