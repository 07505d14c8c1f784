//! Contest module — a per-user calendar of competitive-programming
//! contests, with live upcoming-contest data pulled through the platform
//! module's Codeforces client.

pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use careerdost_core::Module;
use platform::CodeforcesClient;

use crate::service::ContestService;

pub struct ContestModule {
    service: Arc<ContestService>,
}

impl ContestModule {
    pub fn new(kv: Arc<dyn careerdost_kv::KVStore>, codeforces: Arc<CodeforcesClient>) -> Self {
        Self {
            service: ContestService::new(kv, codeforces),
        }
    }

    pub fn service(&self) -> &Arc<ContestService> {
        &self.service
    }
}

impl Module for ContestModule {
    fn name(&self) -> &str {
        "contest"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}
