//! Route registration — collects all module routes + system endpoints.

use std::sync::Arc;

use axum::response::IntoResponse;
use axum::routing::get;
use axum::{middleware, Router};

use auth::service::AuthService;

use crate::auth_middleware;

/// Build the complete router with all routes.
///
/// Module routes are already `Router<()>` (each module applied its own
/// state); they are nested under `/{module_name}` and everything passes
/// through the JWT middleware, which lets the public paths straight
/// through.
pub fn build_router(auth_svc: Arc<AuthService>, module_routes: Vec<(&str, Router)>) -> Router {
    let mut app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/version", get(version));

    for (name, router) in module_routes {
        app = app.nest(&format!("/{}", name), router);
    }

    app.layer(middleware::from_fn_with_state(
        auth_svc,
        auth_middleware::auth_middleware,
    ))
}

async fn index() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "Career Dost API",
        "status": "running",
    }))
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "careerdostd",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
