//! Analytics module — read-only aggregation for the dashboard.
//!
//! Computes everything on demand from the other modules' services; it
//! owns no documents of its own.

pub mod api;
pub mod service;

use std::sync::Arc;

use axum::Router;

use careerdost_core::Module;

use crate::service::AnalyticsService;

pub struct AnalyticsModule {
    service: Arc<AnalyticsService>,
}

impl AnalyticsModule {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        auth: Arc<auth::service::AuthService>,
        planner: Arc<planner::service::PlannerService>,
        roadmap: Arc<roadmap::service::RoadmapService>,
        contest: Arc<contest::service::ContestService>,
        library: Arc<library::service::LibraryService>,
    ) -> Self {
        Self {
            service: AnalyticsService::new(auth, planner, roadmap, contest, library),
        }
    }
}

impl Module for AnalyticsModule {
    fn name(&self) -> &str {
        "analytics"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}
