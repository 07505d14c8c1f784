//! Forum module — community posts with replies and upvotes.
//!
//! Posts are public: everyone reads everything, authorship is stamped from
//! the authenticated user. Replies and upvotes live inline in the post
//! document, so each interaction is a single-document update.

pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use careerdost_core::Module;

use crate::service::ForumService;

pub struct ForumModule {
    service: Arc<ForumService>,
}

impl ForumModule {
    pub fn new(kv: Arc<dyn careerdost_kv::KVStore>) -> Self {
        Self {
            service: ForumService::new(kv),
        }
    }

    pub fn service(&self) -> &Arc<ForumService> {
        &self.service
    }
}

impl Module for ForumModule {
    fn name(&self) -> &str {
        "forum"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}
