//! JWT authentication middleware.
//!
//! Extracts the Bearer token, verifies it through the auth service (which
//! also checks session revocation), and injects a
//! [`careerdost_core::CurrentUser`] into request extensions for handlers.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use auth::service::AuthService;
use careerdost_core::{CurrentUser, ServiceError};

/// Middleware that authenticates every request outside the public list.
pub async fn auth_middleware(
    State(svc): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if is_public_path(&path) {
        return next.run(request).await;
    }

    let token = match extract_bearer(request.headers()) {
        Some(t) => t.to_string(),
        None => {
            return ServiceError::Unauthorized("missing authorization header".into())
                .into_response();
        }
    };

    match svc.verify_token(&token) {
        Ok(claims) => {
            request.extensions_mut().insert(CurrentUser {
                id: claims.sub,
                name: claims.name,
                session: claims.sid,
            });
            next.run(request).await
        }
        Err(e) => ServiceError::from(e).into_response(),
    }
}

/// Extract the Bearer token from the Authorization header.
fn extract_bearer(headers: &axum::http::HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Check if a request path is public (no auth required).
fn is_public_path(path: &str) -> bool {
    matches!(path, "/" | "/health" | "/version")
        || path.starts_with("/auth/register")
        || path.starts_with("/auth/login")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths() {
        assert!(is_public_path("/health"));
        assert!(is_public_path("/auth/login"));
        assert!(is_public_path("/auth/register"));
        assert!(!is_public_path("/auth/me"));
        assert!(!is_public_path("/planner/tasks"));
    }

    #[test]
    fn test_extract_bearer() {
        let mut headers = axum::http::HeaderMap::new();
        headers.insert("authorization", "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(extract_bearer(&headers), Some("abc.def.ghi"));

        headers.insert("authorization", "Basic xyz".parse().unwrap());
        assert_eq!(extract_bearer(&headers), None);
    }
}
