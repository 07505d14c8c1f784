use std::sync::Arc;

use axum::extract::{Extension, State};
use axum::routing::get;
use axum::{Json, Router};

use careerdost_core::{CurrentUser, ServiceError};

use crate::service::AnalyticsService;

pub type AppState = Arc<AnalyticsService>;

/// Build the analytics API router (nested under `/analytics`).
pub fn build_router(svc: Arc<AnalyticsService>) -> Router {
    Router::new()
        .route("/stats", get(stats))
        .route("/activity", get(activity))
        .route("/skills", get(skills))
        .with_state(svc)
}

/// GET /analytics/stats — dashboard headline numbers.
async fn stats(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let stats = svc.dashboard_stats(&user.id)?;
    Ok(Json(serde_json::to_value(stats).unwrap()))
}

/// GET /analytics/activity — daily activity heatmap data.
async fn activity(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let heatmap = svc.activity_heatmap(&user.id)?;
    Ok(Json(serde_json::to_value(heatmap).unwrap()))
}

/// GET /analytics/skills — skill radar data from milestone skills.
async fn skills(
    State(svc): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let skills = svc.skill_distribution(&user.id)?;
    Ok(Json(serde_json::to_value(skills).unwrap()))
}
