use std::sync::Arc;

use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use careerdost_core::{CurrentUser, ServiceError};

use crate::model::CreateContest;
use crate::service::ContestService;

pub type AppState = Arc<ContestService>;

/// Build the contest API router (nested under `/contest`).
pub fn build_router(svc: Arc<ContestService>) -> Router {
    Router::new()
        .route("/contests", get(list_contests).post(create_contest))
        .route("/contests/{id}", put(update_contest).delete(delete_contest))
        .route("/contests/{id}/reminder", put(toggle_reminder))
        .route("/upcoming", get(upcoming))
        .route("/sync", post(sync_upcoming))
        .with_state(svc)
}

async fn list_contests(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let contests = svc.list_contests(&user.id)?;
    Ok(Json(serde_json::json!({"contests": contests})))
}

async fn create_contest(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<CreateContest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServiceError> {
    let contest = svc.create_contest(&user.id, input)?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({"contest": contest}))))
}

async fn update_contest(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(patch): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let contest = svc.update_contest(&user.id, &id, patch)?;
    Ok(Json(serde_json::json!({"contest": contest})))
}

async fn toggle_reminder(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let contest = svc.toggle_reminder(&user.id, &id)?;
    Ok(Json(serde_json::json!({"contest": contest})))
}

async fn delete_contest(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    svc.delete_contest(&user.id, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /contest/upcoming — live list from Codeforces, nothing persisted.
async fn upcoming(
    State(svc): State<AppState>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let contests = svc.upcoming().await?;
    Ok(Json(serde_json::json!({"contests": contests})))
}

/// POST /contest/sync — copy upcoming contests onto the caller's
/// calendar, skipping ones already saved.
async fn sync_upcoming(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let added = svc.sync_upcoming(&user.id).await?;
    Ok(Json(serde_json::json!({
        "added": added.len(),
        "contests": added,
    })))
}
