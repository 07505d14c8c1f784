use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use careerdost_core::ServiceError;

use crate::codeforces::CodeforcesClient;
use crate::leetcode::LeetCodeClient;

#[derive(Clone)]
pub struct AppState {
    pub codeforces: Arc<CodeforcesClient>,
    pub leetcode: Arc<LeetCodeClient>,
}

/// Build the platform proxy router (nested under `/platform`).
pub fn build_router(codeforces: Arc<CodeforcesClient>, leetcode: Arc<LeetCodeClient>) -> Router {
    Router::new()
        .route("/codeforces/users/{handle}", get(codeforces_user))
        .route("/leetcode/users/{username}", get(leetcode_user))
        .route(
            "/leetcode/users/{username}/submissions",
            get(leetcode_submissions),
        )
        .with_state(AppState {
            codeforces,
            leetcode,
        })
}

/// GET /platform/codeforces/users/{handle} — proxy Codeforces user.info.
async fn codeforces_user(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let info = state.codeforces.user_info(&handle).await?;
    Ok(Json(info))
}

/// GET /platform/leetcode/users/{username} — proxy the profile query.
async fn leetcode_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let profile = state.leetcode.user_profile(&username).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "username": username,
        "data": profile,
    })))
}

/// GET /platform/leetcode/users/{username}/submissions.
async fn leetcode_submissions(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let submissions = state.leetcode.recent_submissions(&username, 20).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "username": username,
        "data": submissions,
    })))
}
