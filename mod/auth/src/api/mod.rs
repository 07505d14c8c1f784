mod credentials;
mod me;

use std::sync::Arc;

use axum::Router;

use crate::service::AuthService;

/// Shared application state.
pub type AppState = Arc<AuthService>;

/// Build the auth API router.
///
/// All routes are relative — the caller nests them under `/auth`.
/// `/register` and `/login` must be on the binary's public-path list;
/// everything else expects Claims injected by the edge middleware.
pub fn build_router(svc: Arc<AuthService>) -> Router {
    Router::new()
        .merge(credentials::routes())
        .merge(me::routes())
        .with_state(svc)
}
