//! Auth module — registration, login, JWT sessions, login streaks.
//!
//! # Resources
//!
//! - **User** — account with email/password credentials and streak counters
//! - **Session** — JWT issuance record, revocable
//!
//! The login flow runs the streak tracker ([`streak::record_login`]) after
//! the password check and persists the user's login history and counters as
//! a single document write. Streak computation is isolated from the core
//! login path: if it fails, authentication still succeeds.
//!
//! # Usage
//!
//! ```ignore
//! use auth::{AuthModule, service::AuthConfig};
//!
//! let module = AuthModule::new(kv, AuthConfig::default())?;
//! let router = module.routes(); // Mount under /auth
//! ```

pub mod api;
pub mod model;
pub mod service;
pub mod streak;

use std::sync::Arc;

use axum::Router;

use careerdost_core::Module;

use crate::service::{AuthConfig, AuthService};

/// Auth module implementing the Module trait.
pub struct AuthModule {
    service: Arc<AuthService>,
}

impl AuthModule {
    /// Create a new AuthModule.
    pub fn new(
        kv: Arc<dyn careerdost_kv::KVStore>,
        config: AuthConfig,
    ) -> Self {
        Self {
            service: AuthService::new(kv, config),
        }
    }

    /// Get a reference to the underlying AuthService.
    pub fn service(&self) -> &Arc<AuthService> {
        &self.service
    }
}

impl Module for AuthModule {
    fn name(&self) -> &str {
        "auth"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}
