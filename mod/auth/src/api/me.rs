use axum::extract::{Extension, State};
use axum::routing::get;
use axum::{Json, Router};

use careerdost_core::{CurrentUser, ServiceError};

use crate::api::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/streak", get(streak))
}

/// GET /auth/me — current user info.
async fn me(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let user = svc.public_user(&user.id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(user).unwrap()))
}

/// GET /auth/streak — streak counters and login history, a direct read
/// with no recomputation.
async fn streak(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let user = svc.get_user(&user.id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "currentStreak": user.current_streak,
        "maxStreak": user.max_streak,
        "loginDates": user.login_dates,
    })))
}
