use std::sync::Arc;

use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use careerdost_core::{CurrentUser, ServiceError};

use crate::model::{CreateGoal, CreateTask};
use crate::service::PlannerService;

pub type AppState = Arc<PlannerService>;

/// Build the planner API router (nested under `/planner`).
pub fn build_router(svc: Arc<PlannerService>) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", get(get_task).put(update_task).delete(delete_task))
        .route("/goals", get(list_goals).post(create_goal))
        .route("/goals/{id}", get(get_goal).put(update_goal).delete(delete_goal))
        .with_state(svc)
}

async fn list_tasks(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let tasks = svc.list_tasks(&user.id)?;
    Ok(Json(serde_json::json!({"tasks": tasks})))
}

async fn create_task(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<CreateTask>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServiceError> {
    let task = svc.create_task(&user.id, input)?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({"task": task}))))
}

async fn get_task(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let task = svc
        .list_tasks(&user.id)?
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| ServiceError::NotFound(format!("task/{}", id)))?;
    Ok(Json(serde_json::json!({"task": task})))
}

async fn update_task(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(patch): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let task = svc.update_task(&user.id, &id, patch)?;
    Ok(Json(serde_json::json!({"task": task})))
}

async fn delete_task(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    svc.delete_task(&user.id, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_goals(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let goals = svc.list_goals(&user.id)?;
    Ok(Json(serde_json::json!({"goals": goals})))
}

async fn create_goal(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<CreateGoal>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServiceError> {
    let goal = svc.create_goal(&user.id, input)?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({"goal": goal}))))
}

async fn get_goal(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let goal = svc
        .list_goals(&user.id)?
        .into_iter()
        .find(|g| g.id == id)
        .ok_or_else(|| ServiceError::NotFound(format!("goal/{}", id)))?;
    Ok(Json(serde_json::json!({"goal": goal})))
}

async fn update_goal(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(patch): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let goal = svc.update_goal(&user.id, &id, patch)?;
    Ok(Json(serde_json::json!({"goal": goal})))
}

async fn delete_goal(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    svc.delete_goal(&user.id, &id)?;
    Ok(StatusCode::NO_CONTENT)
}
