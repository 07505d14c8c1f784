//! Planner module — daily task tracking and longer-horizon goals.
//!
//! Both resources are strictly per-user: every read and write is scoped to
//! the authenticated owner, and a foreign id behaves like a missing one.

pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use careerdost_core::Module;

use crate::service::PlannerService;

pub struct PlannerModule {
    service: Arc<PlannerService>,
}

impl PlannerModule {
    pub fn new(kv: Arc<dyn careerdost_kv::KVStore>) -> Self {
        Self {
            service: PlannerService::new(kv),
        }
    }

    pub fn service(&self) -> &Arc<PlannerService> {
        &self.service
    }
}

impl Module for PlannerModule {
    fn name(&self) -> &str {
        "planner"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}
