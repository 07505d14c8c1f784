use std::sync::Arc;

use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use careerdost_core::{CurrentUser, ServiceError};

use crate::model::{CreatePost, CreateReply};
use crate::service::ForumService;

pub type AppState = Arc<ForumService>;

/// Build the forum API router (nested under `/forum`).
pub fn build_router(svc: Arc<ForumService>) -> Router {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", get(get_post))
        .route("/posts/{id}/replies", post(add_reply))
        .route("/posts/{id}/upvote", post(toggle_upvote))
        .with_state(svc)
}

async fn list_posts(
    State(svc): State<AppState>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let posts = svc.list_posts()?;
    Ok(Json(serde_json::json!({"posts": posts})))
}

async fn create_post(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<CreatePost>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServiceError> {
    let post = svc.create_post(&user.id, &user.name, input)?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({"post": post}))))
}

async fn get_post(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let post = svc.get_post(&id)?;
    Ok(Json(serde_json::json!({"post": post})))
}

async fn add_reply(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(input): Json<CreateReply>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let post = svc.add_reply(&user.id, &user.name, &id, input)?;
    Ok(Json(serde_json::json!({"post": post})))
}

async fn toggle_upvote(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let (post, upvoted) = svc.toggle_upvote(&user.id, &id)?;
    Ok(Json(serde_json::json!({"post": post, "upvoted": upvoted})))
}
