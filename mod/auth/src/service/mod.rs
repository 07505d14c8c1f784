pub mod password;
pub mod session;
pub mod user;

use std::sync::Arc;

use thiserror::Error;

use careerdost_kv::KVStore;
use careerdost_store::{Collection, StoreError};

use crate::model::{Session, User};

/// Auth service error type.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("validation: {0}")]
    Validation(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("storage: {0}")]
    Storage(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(m) => AuthError::NotFound(m),
            StoreError::Conflict(m) => AuthError::Conflict(m),
            StoreError::Storage(m) | StoreError::Serialization(m) => AuthError::Storage(m),
        }
    }
}

impl From<AuthError> for careerdost_core::ServiceError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::NotFound(m) => careerdost_core::ServiceError::NotFound(m),
            AuthError::Conflict(m) => careerdost_core::ServiceError::Conflict(m),
            AuthError::Validation(m) => careerdost_core::ServiceError::Validation(m),
            AuthError::Unauthorized(m) => careerdost_core::ServiceError::Unauthorized(m),
            AuthError::Storage(m) => careerdost_core::ServiceError::Storage(m),
            AuthError::Internal(m) => careerdost_core::ServiceError::Internal(m),
        }
    }
}

/// Configuration for the auth service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Token lifetime in seconds (default: 7 days, matching the client's
    /// "stay signed in for a week" behavior).
    pub token_ttl: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "careerdost-dev-secret-change-me".to_string(),
            token_ttl: 604800, // 7 days
        }
    }
}

/// The Auth service. Holds document collections and configuration.
pub struct AuthService {
    pub(crate) users: Collection<User>,
    pub(crate) sessions: Collection<Session>,
    pub(crate) config: AuthConfig,
}

impl AuthService {
    /// Create a new AuthService over the shared document store.
    pub fn new(kv: Arc<dyn KVStore>, config: AuthConfig) -> Arc<Self> {
        Arc::new(Self {
            users: Collection::new(Arc::clone(&kv)),
            sessions: Collection::new(kv),
            config,
        })
    }
}
