//! Roadmap module — career paths with milestone checklists.
//!
//! A career path is one document holding its milestones inline, plus a
//! precomputed `progress` percentage. The percentage is never derived at
//! read time: every mutation path (create, update, milestone toggle,
//! template clone) recomputes it through [`progress::milestone_progress`]
//! and stores it together with the milestones in the same write.
//!
//! Paths without an owner are templates; cloning one stamps the caller as
//! owner and restarts progress from its milestones.

pub mod api;
pub mod model;
pub mod progress;
pub mod service;

use std::sync::Arc;

use axum::Router;

use careerdost_core::Module;

use crate::service::RoadmapService;

pub struct RoadmapModule {
    service: Arc<RoadmapService>,
}

impl RoadmapModule {
    pub fn new(kv: Arc<dyn careerdost_kv::KVStore>) -> Self {
        Self {
            service: RoadmapService::new(kv),
        }
    }

    pub fn service(&self) -> &Arc<RoadmapService> {
        &self.service
    }
}

impl Module for RoadmapModule {
    fn name(&self) -> &str {
        "roadmap"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}
