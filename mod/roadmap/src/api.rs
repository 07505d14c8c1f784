use std::sync::Arc;

use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use careerdost_core::{CurrentUser, ServiceError};

use crate::model::{CloneTemplate, CreateCareerPath};
use crate::service::RoadmapService;

pub type AppState = Arc<RoadmapService>;

/// Build the roadmap API router (nested under `/roadmap`).
pub fn build_router(svc: Arc<RoadmapService>) -> Router {
    Router::new()
        .route("/paths", get(list_paths).post(create_path))
        .route("/paths/{id}", get(get_path).put(update_path).delete(delete_path))
        .route("/paths/{id}/milestones/{index}/toggle", post(toggle_milestone))
        .route("/templates", get(list_templates))
        .route("/clone", post(clone_template))
        .with_state(svc)
}

async fn list_paths(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let paths = svc.list_paths(&user.id)?;
    Ok(Json(serde_json::json!({"careerPaths": paths})))
}

async fn create_path(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<CreateCareerPath>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServiceError> {
    let path = svc.create_path(&user.id, input)?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({"careerPath": path}))))
}

async fn get_path(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let path = svc.get_path(&user.id, &id)?;
    Ok(Json(serde_json::json!({"careerPath": path})))
}

async fn update_path(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(patch): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let path = svc.update_path(&user.id, &id, patch)?;
    Ok(Json(serde_json::json!({"careerPath": path})))
}

async fn toggle_milestone(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((id, index)): Path<(String, usize)>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let path = svc.toggle_milestone(&user.id, &id, index)?;
    Ok(Json(serde_json::json!({"careerPath": path})))
}

async fn delete_path(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    svc.delete_path(&user.id, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_templates(
    State(svc): State<AppState>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let templates = svc.list_templates()?;
    Ok(Json(serde_json::json!({"templates": templates})))
}

async fn clone_template(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<CloneTemplate>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServiceError> {
    let path = svc.clone_template(&user.id, input)?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({"careerPath": path}))))
}
