use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};

use careerdost_core::{CurrentUser, ServiceError};

use crate::api::AppState;
use crate::model::{LoginRequest, PublicUser, RegisterRequest};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

/// POST /auth/register — create an account and sign the user in.
async fn register(
    State(svc): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServiceError> {
    let user = svc.register(input).map_err(ServiceError::from)?;
    let issued = svc.issue_token(&user).map_err(ServiceError::from)?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "token": issued.token,
            "expiresIn": issued.expires_in,
            "user": PublicUser::from(&user),
        })),
    ))
}

/// POST /auth/login — verify credentials, record the login for streak
/// tracking, and issue a token. The response carries the refreshed
/// counters for client display.
async fn login(
    State(svc): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let user = svc
        .login(input, chrono::Utc::now())
        .map_err(ServiceError::from)?;
    let issued = svc.issue_token(&user).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "token": issued.token,
        "expiresIn": issued.expires_in,
        "user": PublicUser::from(&user),
    })))
}

/// POST /auth/logout — revoke the session behind the presented token.
async fn logout(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<StatusCode, ServiceError> {
    svc.revoke_session(&user.session).map_err(ServiceError::from)?;
    Ok(StatusCode::NO_CONTENT)
}
