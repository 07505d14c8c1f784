//! Library module — a shared catalogue of learning resources.
//!
//! Unlike the per-user planner data, resources are community-wide: every
//! user browses the same approved set, with per-user ratings, comments and
//! bookmarks embedded in the resource document. Full-text search runs on a
//! Tantivy index the service keeps in sync with the document store.

pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use careerdost_core::Module;
use careerdost_search::SearchIndex;

use crate::service::LibraryService;

pub struct LibraryModule {
    service: Arc<LibraryService>,
}

impl LibraryModule {
    pub fn new(kv: Arc<dyn careerdost_kv::KVStore>, search: Arc<dyn SearchIndex>) -> Self {
        Self {
            service: LibraryService::new(kv, search),
        }
    }

    pub fn service(&self) -> &Arc<LibraryService> {
        &self.service
    }
}

impl Module for LibraryModule {
    fn name(&self) -> &str {
        "library"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}
