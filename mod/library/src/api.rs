use std::sync::Arc;

use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use careerdost_core::{CurrentUser, ServiceError};

use crate::model::{CreateResource, ResourceQuery};
use crate::service::LibraryService;

pub type AppState = Arc<LibraryService>;

/// Build the library API router (nested under `/library`).
pub fn build_router(svc: Arc<LibraryService>) -> Router {
    Router::new()
        .route("/resources", get(list_resources).post(create_resource))
        .route(
            "/resources/{id}",
            get(get_resource).put(update_resource).delete(delete_resource),
        )
        .route("/resources/{id}/rate", post(rate_resource))
        .route("/resources/{id}/comment", post(comment_resource))
        .route("/resources/{id}/bookmark", post(toggle_bookmark))
        .with_state(svc)
}

async fn list_resources(
    State(svc): State<AppState>,
    Query(query): Query<ResourceQuery>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let resources = svc.list_resources(&query)?;
    Ok(Json(serde_json::json!({"resources": resources})))
}

async fn create_resource(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<CreateResource>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServiceError> {
    let resource = svc.create_resource(&user.id, input)?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({"resource": resource}))))
}

async fn get_resource(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let resource = svc.get_resource(&id)?;
    Ok(Json(serde_json::json!({"resource": resource})))
}

async fn update_resource(
    State(svc): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let resource = svc.update_resource(&id, patch)?;
    Ok(Json(serde_json::json!({"resource": resource})))
}

async fn delete_resource(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    svc.delete_resource(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(serde::Deserialize)]
struct RateBody {
    rating: u8,
}

async fn rate_resource(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(body): Json<RateBody>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let resource = svc.rate(&user.id, &id, body.rating)?;
    Ok(Json(serde_json::json!({"resource": resource})))
}

#[derive(serde::Deserialize)]
struct CommentBody {
    text: String,
}

async fn comment_resource(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(body): Json<CommentBody>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let resource = svc.comment(&user.id, &id, &body.text)?;
    Ok(Json(serde_json::json!({"resource": resource})))
}

async fn toggle_bookmark(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let (resource, bookmarked) = svc.toggle_bookmark(&user.id, &id)?;
    Ok(Json(serde_json::json!({
        "resource": resource,
        "bookmarked": bookmarked,
    })))
}
